use crate::CaptureError;
use lente_base::FrameBuffer;

/// Pull-driven decode backend: reads frames from an asset on demand.
///
/// The backend is the swappable platform/codec half of a decoder; the
/// decoder owns the buffer, the lifecycle and the observer.
pub trait DecodeBackend {
    /// Open the asset, or rewind to the first frame if already open.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Unavailable` if the asset cannot be opened.
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Decode the next frame into `buf`, preparing the allocation as needed.
    ///
    /// Returns `Ok(false)` at end of stream with the buffer contents left
    /// unchanged. Returns `CaptureError::Decode` on malformed data.
    fn next_frame(&mut self, buf: &mut FrameBuffer) -> Result<bool, CaptureError>;

    /// Release read state. Opening again restarts from the first frame.
    fn close(&mut self);
}

/// Push-driven camera backend: captures one frame per call, driven by the
/// camera's capture thread.
pub trait CameraBackend: Send {
    /// Open the device.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Unavailable` if the device cannot be opened
    /// (unknown uid, disconnected hardware, revoked permission).
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Capture one frame into `buf`, preparing the allocation as needed.
    fn capture_frame(&mut self, buf: &mut FrameBuffer) -> Result<(), CaptureError>;

    /// Release the device.
    fn close(&mut self);
}
