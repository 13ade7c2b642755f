use crate::CameraConfig;
use lente_base::{FrameBuffer, FrameInfo};
use lente_capture::{
    CameraBackend, CaptureError, FrameObserver, ObserverSlot, SourceDescriptor, SourceState,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Shared {
    buffer: Mutex<FrameBuffer>,
    observer: Mutex<ObserverSlot>,
    stop: AtomicBool,
}

/// Push-driven capture source.
///
/// Once started, a dedicated capture thread writes frames into the shared
/// buffer and fires the frame-ready notification from that thread, paced to
/// the configured fps. Notifications for one camera are strictly ordered and
/// non-overlapping: there is exactly one capture thread per instance and the
/// next frame is not produced until the observer returns.
pub struct Camera {
    config: CameraConfig,
    descriptor: SourceDescriptor,
    state: SourceState,
    shared: Arc<Shared>,
    backend: Option<Box<dyn CameraBackend>>,
    handle: Option<JoinHandle<Box<dyn CameraBackend>>>,
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("capturing", &self.handle.is_some())
            .finish()
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor)
    }
}

impl Camera {
    pub fn new(backend: Box<dyn CameraBackend>, config: CameraConfig) -> Self {
        let descriptor = SourceDescriptor::Device(config.device().map(str::to_string));
        Self {
            config,
            descriptor,
            state: SourceState::Idle,
            shared: Arc::new(Shared {
                buffer: Mutex::new(FrameBuffer::new()),
                observer: Mutex::new(ObserverSlot::new()),
                stop: AtomicBool::new(false),
            }),
            backend: Some(backend),
            handle: None,
        }
    }

    /// Start capture: open the device and spawn the capture thread.
    ///
    /// A no-op while already Running (a live device has no read position to
    /// rewind). May block briefly while the thread spins up.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Unavailable` if the device cannot be opened.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.state.is_running() {
            return Ok(());
        }
        let mut backend = self
            .backend
            .take()
            .ok_or_else(|| CaptureError::Unavailable("backend lost to a panic".to_string()))?;
        if let Err(err) = backend.open() {
            self.backend = Some(backend);
            return Err(err);
        }

        self.shared.stop.store(false, Ordering::Release);
        let shared = Arc::clone(&self.shared);
        let interval = Duration::from_micros(1_000_000 / u64::from(self.config.fps().max(1)));
        let handle = thread::Builder::new()
            .name("lente-camera".to_string())
            .spawn(move || capture_loop(backend, shared, interval))?;

        self.handle = Some(handle);
        self.state = SourceState::Running;
        log::debug!("{} started", self.descriptor);
        Ok(())
    }

    /// Stop capture.
    ///
    /// Blocks until the capture thread has fully quiesced, so no frame is in
    /// flight once this returns. No-op while Idle or Stopped. Safe to call
    /// from any thread that owns the camera, including never-started ones.
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.shared.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(backend) => self.backend = Some(backend),
                Err(_) => log::warn!("{}: capture thread panicked", self.descriptor),
            }
        }
        self.state = SourceState::Stopped;
        log::debug!("{} stopped", self.descriptor);
    }

    /// Register the frame-ready observer, replacing any previous one.
    pub fn set_observer(&self, observer: Box<dyn FrameObserver>) {
        self.lock_observer().set(observer);
    }

    /// Register a closure as the frame-ready observer.
    pub fn on_frame<F>(&self, observer: F)
    where
        F: FnMut(&FrameBuffer) + Send + 'static,
    {
        self.set_observer(Box::new(observer));
    }

    pub fn clear_observer(&self) {
        self.lock_observer().clear();
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn frame_info(&self) -> FrameInfo {
        self.lock_buffer().frame_info()
    }

    pub fn frame_size(&self) -> usize {
        self.lock_buffer().frame_size()
    }

    /// Run `f` over the current frame bytes (empty before the first frame).
    ///
    /// Holds the frame lock for the duration of `f`, pausing the capture
    /// loop; keep `f` short. Outside of this call and the observer callback
    /// the bytes may be rewritten at any time.
    pub fn with_current_frame<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.lock_buffer().current_frame())
    }

    fn lock_buffer(&self) -> std::sync::MutexGuard<'_, FrameBuffer> {
        self.shared.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_observer(&self) -> std::sync::MutexGuard<'_, ObserverSlot> {
        self.shared
            .observer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop(
    mut backend: Box<dyn CameraBackend>,
    shared: Arc<Shared>,
    interval: Duration,
) -> Box<dyn CameraBackend> {
    while !shared.stop.load(Ordering::Acquire) {
        {
            let mut buffer = shared.buffer.lock().unwrap_or_else(|e| e.into_inner());
            match backend.capture_frame(&mut buffer) {
                Ok(()) => {
                    let mut slot = shared.observer.lock().unwrap_or_else(|e| e.into_inner());
                    slot.notify(&buffer);
                }
                Err(err) => {
                    log::warn!("capture failed: {err}");
                    break;
                }
            }
        }
        thread::sleep(interval);
    }
    backend.close();
    backend
}
