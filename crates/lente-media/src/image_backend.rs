//! Single-frame backend decoding a still image asset.

use lente_base::{FrameBuffer, FrameInfo};
use lente_capture::{CaptureError, DecodeBackend};
use std::fs;
use std::path::PathBuf;

/// Decodes one still image; the single frame, then end of stream.
///
/// The encoded bytes are read at `open` (so a missing file surfaces as
/// `Unavailable` from `start`) and decoded lazily on the first
/// `next_frame` (so malformed data surfaces as `Decode` where the
/// `next_frame` contract expects it).
pub struct ImageBackend {
    path: PathBuf,
    encoded: Option<Vec<u8>>,
    drained: bool,
}

impl ImageBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoded: None,
            drained: false,
        }
    }
}

impl DecodeBackend for ImageBackend {
    fn open(&mut self) -> Result<(), CaptureError> {
        let bytes = fs::read(&self.path).map_err(|err| {
            CaptureError::Unavailable(format!("{}: {err}", self.path.display()))
        })?;
        self.encoded = Some(bytes);
        self.drained = false;
        Ok(())
    }

    fn next_frame(&mut self, buf: &mut FrameBuffer) -> Result<bool, CaptureError> {
        if self.drained {
            return Ok(false);
        }
        let encoded = self
            .encoded
            .as_ref()
            .ok_or_else(|| CaptureError::Unavailable("asset not open".to_string()))?;

        let frame = lente_image::decode_image(encoded)
            .map_err(|err| CaptureError::Decode(err.to_string()))?;

        buf.prepare(FrameInfo::new(frame.width, frame.height, frame.elem_size))?;
        buf.frame_mut().copy_from_slice(&frame.data);

        self.drained = true;
        Ok(true)
    }

    fn close(&mut self) {
        self.encoded = None;
        self.drained = false;
    }
}
