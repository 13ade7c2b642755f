//! Raw frame-sequence container (`.lseq`).
//!
//! Layout: magic `LSEQ`, then width, height and element size as
//! little-endian `u32`s, then frames of exactly
//! `width * height * elem_size` bytes back to back. The frame count is
//! implied by the file length; a trailing partial frame is malformed.

use lente_base::{FrameBuffer, FrameInfo};
use lente_capture::{CaptureError, DecodeBackend};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

const MAGIC: [u8; 4] = *b"LSEQ";
const HEADER_LEN: usize = 16;

/// Writes `.lseq` assets, one fixed-size frame at a time.
#[derive(Debug)]
pub struct SequenceWriter {
    writer: BufWriter<File>,
    info: FrameInfo,
}

impl SequenceWriter {
    /// Create the file at `path` and write the header.
    pub fn create(path: impl AsRef<Path>, info: FrameInfo) -> io::Result<Self> {
        if info.byte_len().filter(|&len| len > 0).is_none() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "zero or overflowing dimensions",
            ));
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&MAGIC)?;
        writer.write_all(&info.width.to_le_bytes())?;
        writer.write_all(&info.height.to_le_bytes())?;
        writer.write_all(&info.elem_size.to_le_bytes())?;
        Ok(Self { writer, info })
    }

    /// Append one frame. `data` must be exactly one frame long.
    pub fn write_frame(&mut self, data: &[u8]) -> io::Result<()> {
        let expected = self.info.byte_len().unwrap_or(0);
        if data.len() != expected {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("frame is {} bytes, expected {expected}", data.len()),
            ));
        }
        self.writer.write_all(data)
    }

    /// Flush and close the file.
    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Pull-driven backend reading `.lseq` assets.
pub struct SequenceBackend {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    info: FrameInfo,
}

impl SequenceBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reader: None,
            info: FrameInfo::default(),
        }
    }

    fn read_header(reader: &mut BufReader<File>) -> Result<FrameInfo, CaptureError> {
        let mut header = [0u8; HEADER_LEN];
        reader
            .read_exact(&mut header)
            .map_err(|err| CaptureError::Decode(format!("truncated header: {err}")))?;
        if header[..4] != MAGIC {
            return Err(CaptureError::Decode("bad magic".to_string()));
        }

        let field = |offset: usize| {
            u32::from_le_bytes([
                header[offset],
                header[offset + 1],
                header[offset + 2],
                header[offset + 3],
            ])
        };
        let info = FrameInfo::new(field(4), field(8), field(12));
        match info.byte_len() {
            Some(len) if len > 0 => Ok(info),
            _ => Err(CaptureError::Decode(
                "zero or overflowing dimensions in header".to_string(),
            )),
        }
    }
}

impl DecodeBackend for SequenceBackend {
    fn open(&mut self) -> Result<(), CaptureError> {
        let file = File::open(&self.path).map_err(|err| {
            CaptureError::Unavailable(format!("{}: {err}", self.path.display()))
        })?;
        let mut reader = BufReader::new(file);
        self.info = Self::read_header(&mut reader)?;
        self.reader = Some(reader);
        log::debug!(
            "opened {}: {}x{}x{}",
            self.path.display(),
            self.info.width,
            self.info.height,
            self.info.elem_size
        );
        Ok(())
    }

    fn next_frame(&mut self, buf: &mut FrameBuffer) -> Result<bool, CaptureError> {
        let info = self.info;
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| CaptureError::Unavailable("asset not open".to_string()))?;

        buf.prepare(info)?;

        // Distinguish a clean end of stream (zero bytes) from a trailing
        // partial frame (malformed).
        let frame = buf.frame_mut();
        let mut filled = 0;
        while filled < frame.len() {
            match reader.read(&mut frame[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CaptureError::Io(err.to_string())),
            }
        }
        if filled == 0 {
            return Ok(false);
        }
        if filled < frame.len() {
            return Err(CaptureError::Decode(format!(
                "truncated frame: {filled} of {} bytes",
                frame.len()
            )));
        }
        Ok(true)
    }

    fn close(&mut self) {
        self.reader = None;
    }
}
