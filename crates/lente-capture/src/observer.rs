use lente_base::FrameBuffer;
use std::fmt;

/// Receiver of frame-ready notifications.
///
/// Invoked synchronously on the producing context after each produced frame.
/// The borrowed buffer is valid only for the duration of the call; copy out
/// whatever must outlive it. For push-driven sources the call arrives on the
/// capture thread, not the thread that registered the observer.
pub trait FrameObserver: Send {
    fn on_frame(&mut self, frame: &FrameBuffer);
}

impl<F: FnMut(&FrameBuffer) + Send> FrameObserver for F {
    fn on_frame(&mut self, frame: &FrameBuffer) {
        self(frame)
    }
}

/// Single-slot observer registration.
///
/// At most one observer is held; registering replaces the previous one.
/// Notifications are fire-and-forget: with no observer registered the event
/// is silently dropped, never queued or retried.
#[derive(Default)]
pub struct ObserverSlot {
    observer: Option<Box<dyn FrameObserver>>,
}

impl fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSlot")
            .field("registered", &self.observer.is_some())
            .finish()
    }
}

impl ObserverSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, observer: Box<dyn FrameObserver>) {
        if self.observer.is_some() {
            log::debug!("frame observer replaced");
        }
        self.observer = Some(observer);
    }

    pub fn clear(&mut self) {
        self.observer = None;
        log::debug!("frame observer cleared");
    }

    pub fn is_set(&self) -> bool {
        self.observer.is_some()
    }

    pub fn notify(&mut self, frame: &FrameBuffer) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_frame(frame);
        }
    }
}
