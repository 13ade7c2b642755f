//! The capture-source role shared by cameras and decoders.
//!
//! A capture source owns one [`FrameBuffer`](lente_base::FrameBuffer),
//! produces frames on its own execution context, and notifies a single
//! registered [`FrameObserver`] after each produced frame. This crate holds
//! the pieces common to the push-driven and pull-driven variants: the
//! lifecycle state machine, the source descriptor, the observer slot, the
//! error type and the backend seams.

pub mod backend;
pub mod descriptor;
pub mod error;
pub mod observer;
pub mod state;

pub use backend::{CameraBackend, DecodeBackend};
pub use descriptor::SourceDescriptor;
pub use error::CaptureError;
pub use observer::{FrameObserver, ObserverSlot};
pub use state::SourceState;
