use lente_base::BufferError;
use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    /// The device or asset could not be opened.
    Unavailable(String),
    /// Malformed or unreadable frame data.
    Decode(String),
    /// Frame buffer allocation failure.
    Buffer(BufferError),
    /// I/O failure while reading frame data.
    Io(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Unavailable(msg) => write!(f, "source unavailable: {msg}"),
            CaptureError::Decode(msg) => write!(f, "decode error: {msg}"),
            CaptureError::Buffer(err) => write!(f, "buffer error: {err}"),
            CaptureError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<BufferError> for CaptureError {
    fn from(err: BufferError) -> Self {
        CaptureError::Buffer(err)
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Io(err.to_string())
    }
}
