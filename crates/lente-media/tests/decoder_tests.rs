use lente_base::{FrameBuffer, FrameInfo};
use lente_capture::{CaptureError, SourceState};
use lente_media::{Decoder, SequenceWriter};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lente-decoder-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

/// Write a sequence of solid-colored frames, one byte value per frame.
fn write_sequence(name: &str, info: FrameInfo, frame_values: &[u8]) -> PathBuf {
    let path = temp_path(name);
    let len = info.byte_len().unwrap();
    let mut writer = SequenceWriter::create(&path, info).unwrap();
    for &value in frame_values {
        writer.write_frame(&vec![value; len]).unwrap();
    }
    writer.finish().unwrap();
    path
}

fn write_png(name: &str, width: u32, height: u32) -> PathBuf {
    let path = temp_path(name);
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([x as u8, y as u8, ((x + y) % 256) as u8])
    });
    img.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

fn counter_observer(decoder: &mut Decoder) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&counter);
    decoder.on_frame(move |_frame: &FrameBuffer| {
        count.fetch_add(1, Ordering::SeqCst);
    });
    counter
}

#[test]
fn test_three_frame_asset_scenario() {
    let info = FrameInfo::new(4, 3, 2);
    let path = write_sequence("three.lseq", info, &[10, 20, 30]);

    let mut decoder = Decoder::new(&path);
    let notified = counter_observer(&mut decoder);

    decoder.start().unwrap();
    for (i, expected) in [10u8, 20, 30].iter().enumerate() {
        assert!(decoder.next_frame().unwrap());
        assert_eq!(notified.load(Ordering::SeqCst), i + 1);
        assert_eq!(decoder.frame_info(), info);
        assert!(decoder.current_frame().iter().all(|&b| b == *expected));
    }

    // End of stream: false, no notification
    assert!(!decoder.next_frame().unwrap());
    assert_eq!(notified.load(Ordering::SeqCst), 3);
}

#[test]
fn test_implicit_start_on_first_next_frame() {
    let path = write_sequence("implicit.lseq", FrameInfo::new(2, 2, 1), &[5]);

    let mut decoder = Decoder::new(&path);
    assert_eq!(decoder.state(), SourceState::Idle);
    assert!(decoder.next_frame().unwrap());
    assert_eq!(decoder.state(), SourceState::Running);
}

#[test]
fn test_restart_rewinds_without_clearing_observer() {
    let info = FrameInfo::new(2, 2, 1);
    let path = write_sequence("restart.lseq", info, &[1, 2, 3]);

    let mut decoder = Decoder::new(&path);
    let notified = counter_observer(&mut decoder);

    decoder.start().unwrap();
    decoder.next_frame().unwrap();
    decoder.next_frame().unwrap();
    assert!(decoder.current_frame().iter().all(|&b| b == 2));

    // Restart while Running: back to the first frame, observer and
    // dimensions untouched
    decoder.start().unwrap();
    assert_eq!(decoder.state(), SourceState::Running);
    assert!(decoder.next_frame().unwrap());
    assert!(decoder.current_frame().iter().all(|&b| b == 1));
    assert_eq!(decoder.frame_info(), info);
    assert_eq!(notified.load(Ordering::SeqCst), 3);
}

#[test]
fn test_stop_while_idle_is_noop() {
    let mut decoder = Decoder::new(temp_path("never-started.lseq"));
    decoder.stop();
    assert_eq!(decoder.state(), SourceState::Idle);
}

#[test]
fn test_next_frame_after_stop_restarts() {
    let path = write_sequence("stop-restart.lseq", FrameInfo::new(2, 2, 1), &[9, 8]);

    let mut decoder = Decoder::new(&path);
    decoder.next_frame().unwrap();
    decoder.stop();
    assert_eq!(decoder.state(), SourceState::Stopped);

    // Implicit restart reads from the beginning again
    assert!(decoder.next_frame().unwrap());
    assert!(decoder.current_frame().iter().all(|&b| b == 9));
}

#[test]
fn test_missing_asset_is_unavailable() {
    let mut decoder = Decoder::new(temp_path("missing.lseq"));
    match decoder.start() {
        Err(CaptureError::Unavailable(_)) => {}
        other => panic!("Expected Unavailable, got {other:?}"),
    }
    assert_eq!(decoder.state(), SourceState::Idle);
}

#[test]
fn test_image_single_frame_policy() {
    let path = write_png("still.png", 6, 5);

    let mut decoder = Decoder::new_image(&path);
    let notified = counter_observer(&mut decoder);
    assert!(decoder.is_image());

    // First call decodes and notifies once
    assert!(decoder.next_frame().unwrap());
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert_eq!(decoder.frame_info(), FrameInfo::new(6, 5, 3));

    // Subsequent calls keep returning true without a new notification
    assert!(decoder.next_frame().unwrap());
    assert!(decoder.next_frame().unwrap());
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[test]
fn test_image_restart_renotifies() {
    let path = write_png("still-restart.png", 4, 4);

    let mut decoder = Decoder::new_image(&path);
    let notified = counter_observer(&mut decoder);

    decoder.next_frame().unwrap();
    decoder.start().unwrap();
    decoder.next_frame().unwrap();
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[test]
fn test_malformed_image_is_decode_error() {
    let path = temp_path("not-an-image.png");
    fs::write(&path, b"definitely not a png").unwrap();

    let mut decoder = Decoder::new_image(&path);
    decoder.start().unwrap();
    match decoder.next_frame() {
        Err(CaptureError::Decode(_)) => {}
        other => panic!("Expected Decode, got {other:?}"),
    }
}

#[test]
fn test_load_asset_same_dimensions_reuses_buffer() {
    let info = FrameInfo::new(3, 3, 1);
    let first = write_sequence("swap-a.lseq", info, &[1]);
    let second = write_sequence("swap-b.lseq", info, &[2]);

    let mut decoder = Decoder::new(&first);
    decoder.next_frame().unwrap();
    assert!(decoder.current_frame().iter().all(|&b| b == 1));

    decoder.load_asset(&second).unwrap();
    assert!(decoder.next_frame().unwrap());
    assert_eq!(decoder.frame_info(), info);
    assert!(decoder.current_frame().iter().all(|&b| b == 2));
}

#[test]
fn test_load_asset_with_new_dimensions_reallocates() {
    let first = write_sequence("grow-a.lseq", FrameInfo::new(2, 2, 1), &[1]);
    let second = write_sequence("grow-b.lseq", FrameInfo::new(4, 4, 3), &[2]);

    let mut decoder = Decoder::new(&first);
    let notified = counter_observer(&mut decoder);

    decoder.next_frame().unwrap();
    assert_eq!(decoder.frame_size(), 4);

    decoder.load_asset(&second).unwrap();
    assert!(decoder.next_frame().unwrap());
    assert_eq!(decoder.frame_info(), FrameInfo::new(4, 4, 3));
    assert_eq!(decoder.frame_size(), 48);
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[test]
fn test_observer_replacement_between_frames() {
    let path = write_sequence("swap-obs.lseq", FrameInfo::new(2, 2, 1), &[1, 2]);

    let mut decoder = Decoder::new(&path);
    let first = counter_observer(&mut decoder);
    decoder.next_frame().unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 1);

    let second = counter_observer(&mut decoder);
    decoder.next_frame().unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 1, "replaced observer must not fire");
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_end_of_stream_is_repeatable() {
    let path = write_sequence("eos.lseq", FrameInfo::new(2, 2, 1), &[1]);

    let mut decoder = Decoder::new(&path);
    assert!(decoder.next_frame().unwrap());
    assert!(!decoder.next_frame().unwrap());
    assert!(!decoder.next_frame().unwrap());
}

#[test]
fn test_display_identifies_source() {
    let decoder = Decoder::new("clips/take1.lseq");
    assert_eq!(decoder.to_string(), "decoder(clips/take1.lseq)");

    let image = Decoder::new_image("stills/logo.png");
    assert_eq!(image.to_string(), "image(stills/logo.png)");
}
