use lente_base::FrameBuffer;
use lente_capture::{FrameObserver, ObserverSlot};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_observer(counter: Arc<AtomicUsize>) -> Box<dyn FrameObserver> {
    Box::new(move |_frame: &FrameBuffer| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_notify_without_observer_is_silent() {
    let mut slot = ObserverSlot::new();
    let buf = FrameBuffer::new();
    assert!(!slot.is_set());
    // Must not panic, queue or retry
    slot.notify(&buf);
    slot.notify(&buf);
}

#[test]
fn test_registering_replaces_previous_observer() {
    let mut slot = ObserverSlot::new();
    let mut buf = FrameBuffer::new();
    buf.allocate(2, 2, 3).unwrap();

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    slot.set(counting_observer(Arc::clone(&first)));
    slot.notify(&buf);
    assert_eq!(first.load(Ordering::SeqCst), 1);

    slot.set(counting_observer(Arc::clone(&second)));
    slot.notify(&buf);
    assert_eq!(first.load(Ordering::SeqCst), 1, "replaced observer must not fire");
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clear_observer() {
    let mut slot = ObserverSlot::new();
    let buf = FrameBuffer::new();
    let counter = Arc::new(AtomicUsize::new(0));

    slot.set(counting_observer(Arc::clone(&counter)));
    assert!(slot.is_set());
    slot.clear();
    assert!(!slot.is_set());
    slot.notify(&buf);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_observer_sees_frame_contents() {
    let mut slot = ObserverSlot::new();
    let mut buf = FrameBuffer::new();
    buf.allocate(2, 2, 1).unwrap();
    buf.frame_mut().copy_from_slice(&[1, 2, 3, 4]);

    let seen: Arc<std::sync::Mutex<Vec<u8>>> = Arc::default();
    let sink = Arc::clone(&seen);
    slot.set(Box::new(move |frame: &FrameBuffer| {
        // Copy before returning: the view is only valid inside the callback
        sink.lock().unwrap().extend_from_slice(frame.current_frame());
    }));

    slot.notify(&buf);
    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
}
