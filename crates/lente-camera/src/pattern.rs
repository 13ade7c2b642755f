//! Synthetic camera backend producing a moving RGB gradient.
//!
//! Stands in for platform capture so the push pipeline stays exercisable on
//! any machine.

use crate::CameraConfig;
use lente_base::{FrameBuffer, FrameInfo};
use lente_capture::{CameraBackend, CaptureError};
use std::collections::BTreeMap;

const UID_DEFAULT: &str = "pattern:0";
const UID_INVERTED: &str = "pattern:1";

/// Enumerate the synthetic devices, name to uid. Built fresh per call.
pub fn sources() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("Test Pattern".to_string(), UID_DEFAULT.to_string());
    map.insert("Test Pattern (inverted)".to_string(), UID_INVERTED.to_string());
    map
}

pub struct PatternBackend {
    uid: Option<String>,
    width: u32,
    height: u32,
    inverted: bool,
    tick: u64,
    open: bool,
}

impl PatternBackend {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            uid: config.device().map(str::to_string),
            width: config.width(),
            height: config.height(),
            inverted: false,
            tick: 0,
            open: false,
        }
    }
}

impl CameraBackend for PatternBackend {
    fn open(&mut self) -> Result<(), CaptureError> {
        self.inverted = match self.uid.as_deref() {
            None | Some(UID_DEFAULT) => false,
            Some(UID_INVERTED) => true,
            Some(other) => {
                return Err(CaptureError::Unavailable(format!(
                    "unknown device uid: {other}"
                )));
            }
        };
        self.tick = 0;
        self.open = true;
        Ok(())
    }

    fn capture_frame(&mut self, buf: &mut FrameBuffer) -> Result<(), CaptureError> {
        if !self.open {
            return Err(CaptureError::Unavailable("device not open".to_string()));
        }
        buf.prepare(FrameInfo::new(self.width, self.height, 3))?;

        let tick = self.tick;
        self.tick = self.tick.wrapping_add(1);

        let width = self.width as usize;
        let inverted = self.inverted;
        for (i, pixel) in buf.frame_mut().chunks_exact_mut(3).enumerate() {
            let x = (i % width) as u64;
            let y = (i / width) as u64;
            let mut rgb = [
                (x + tick) as u8,
                (y + tick) as u8,
                (x + y) as u8,
            ];
            if inverted {
                for c in rgb.iter_mut() {
                    *c = 255 - *c;
                }
            }
            pixel.copy_from_slice(&rgb);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }
}
