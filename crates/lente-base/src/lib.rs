//! Shared plumbing for the lente capture crates.
//!
//! Provides the [`FrameBuffer`] pixel buffer that every capture source owns,
//! plus a minimal stdout logger for the `log` facade.

pub mod framebuffer;
pub mod logging;

pub use framebuffer::{BufferError, FrameBuffer, FrameInfo};
pub use logging::{init_stdout_logger, StdoutLogger};

// Re-export log so downstream crates can use lente_base::log::*
pub use log;
