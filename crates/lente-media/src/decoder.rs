use crate::image_backend::ImageBackend;
use crate::sequence::SequenceBackend;
use lente_base::{FrameBuffer, FrameInfo};
use lente_capture::{
    CaptureError, DecodeBackend, FrameObserver, ObserverSlot, SourceDescriptor, SourceState,
};
use std::fmt;
use std::path::PathBuf;

/// Pull-driven capture source over a file asset.
///
/// One type covers both multi-frame assets and single-frame images; the
/// mode is fixed at construction and the asset can be swapped afterwards
/// with [`load_asset`](Decoder::load_asset). Frames are decoded on the
/// caller's thread: [`next_frame`](Decoder::next_frame) blocks until a
/// frame lands in the owned buffer, then fires the frame-ready
/// notification before returning.
pub struct Decoder {
    descriptor: SourceDescriptor,
    state: SourceState,
    buffer: FrameBuffer,
    observer: ObserverSlot,
    backend: Box<dyn DecodeBackend>,
    is_image: bool,
    delivered: bool,
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("descriptor", &self.descriptor)
            .field("state", &self.state)
            .field("is_image", &self.is_image)
            .field("frame_info", &self.buffer.frame_info())
            .finish()
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor)
    }
}

impl Decoder {
    /// Decoder over a multi-frame `.lseq` asset.
    pub fn new(asset: impl Into<PathBuf>) -> Self {
        let path = asset.into();
        Self {
            descriptor: SourceDescriptor::Asset(path.clone()),
            state: SourceState::Idle,
            buffer: FrameBuffer::new(),
            observer: ObserverSlot::new(),
            backend: Box::new(SequenceBackend::new(path)),
            is_image: false,
            delivered: false,
        }
    }

    /// Decoder over a single still image.
    pub fn new_image(asset: impl Into<PathBuf>) -> Self {
        let path = asset.into();
        Self {
            descriptor: SourceDescriptor::Image(path.clone()),
            state: SourceState::Idle,
            buffer: FrameBuffer::new(),
            observer: ObserverSlot::new(),
            backend: Box::new(ImageBackend::new(path)),
            is_image: true,
            delivered: false,
        }
    }

    /// Get ready for decoding, or restart.
    ///
    /// Opens the asset and seeks to the first frame. Calling while already
    /// Running rewinds to the beginning (looping playback) without touching
    /// the registered observer or, for a same-size asset, the buffer
    /// allocation. Called implicitly by the first `next_frame`.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Unavailable` if the asset cannot be opened.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        self.backend.open()?;
        self.delivered = false;
        self.state = SourceState::Running;
        log::debug!("{} started", self.descriptor);
        Ok(())
    }

    /// Stop decoding and release read state. No-op while Idle or Stopped.
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.backend.close();
        self.state = SourceState::Stopped;
        log::debug!("{} stopped", self.descriptor);
    }

    /// Decode the next frame into the owned buffer.
    ///
    /// Starts implicitly when not Running. On success returns `Ok(true)`
    /// and fires exactly one frame-ready notification; at end of stream
    /// returns `Ok(false)` with no notification and the buffer contents
    /// unchanged. An image source keeps returning `Ok(true)` after its
    /// single frame, without re-notifying: the static frame stays readable
    /// in the buffer.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Decode` on malformed data; the read position
    /// is unspecified afterwards, recover with `stop` + `start`.
    pub fn next_frame(&mut self) -> Result<bool, CaptureError> {
        if !self.state.is_running() {
            self.start()?;
        }
        if self.is_image && self.delivered {
            return Ok(true);
        }
        let produced = self.backend.next_frame(&mut self.buffer)?;
        if produced {
            self.delivered = true;
            self.observer.notify(&self.buffer);
        }
        Ok(produced)
    }

    /// Switch to another asset without rebuilding the decoder.
    ///
    /// The observer stays registered. A same-dimension asset reuses the
    /// existing buffer allocation; a different-dimension asset goes through
    /// the reallocation path on its first decoded frame. If the decoder is
    /// Running the new asset is opened immediately; otherwise it opens on
    /// the next `start`/`next_frame`.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Unavailable` if the decoder is Running and
    /// the new asset cannot be opened.
    pub fn load_asset(&mut self, asset: impl Into<PathBuf>) -> Result<(), CaptureError> {
        let path = asset.into();
        self.backend.close();
        if self.is_image {
            self.backend = Box::new(ImageBackend::new(path.clone()));
            self.descriptor = SourceDescriptor::Image(path);
        } else {
            self.backend = Box::new(SequenceBackend::new(path.clone()));
            self.descriptor = SourceDescriptor::Asset(path);
        }
        self.delivered = false;
        if self.state.is_running() {
            self.backend.open()?;
        }
        log::debug!("{} loaded", self.descriptor);
        Ok(())
    }

    pub fn is_image(&self) -> bool {
        self.is_image
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    /// Register the frame-ready observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn FrameObserver>) {
        self.observer.set(observer);
    }

    /// Register a closure as the frame-ready observer.
    pub fn on_frame<F>(&mut self, observer: F)
    where
        F: FnMut(&FrameBuffer) + Send + 'static,
    {
        self.observer.set(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer.clear();
    }

    pub fn frame_info(&self) -> FrameInfo {
        self.buffer.frame_info()
    }

    pub fn frame_size(&self) -> usize {
        self.buffer.frame_size()
    }

    /// Read-only view onto the last decoded frame (empty before the first).
    /// Valid until the next `next_frame`/`load_asset` call.
    pub fn current_frame(&self) -> &[u8] {
        self.buffer.current_frame()
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        self.stop();
    }
}
