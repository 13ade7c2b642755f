//! Push-driven camera capture source.
//!
//! A [`Camera`] runs a dedicated capture thread that pulls frames from a
//! [`CameraBackend`](lente_capture::CameraBackend) into the shared frame
//! buffer and fires the frame-ready notification from that thread. Platform
//! backends plug in through the backend trait; the built-in
//! [`PatternBackend`] produces a synthetic moving gradient.

pub mod camera;
pub mod config;
pub mod pattern;

pub use camera::Camera;
pub use config::CameraConfig;
pub use pattern::PatternBackend;
