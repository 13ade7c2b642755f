//! Pull-driven decoding capture source.
//!
//! A [`Decoder`] reads frames from a file asset on demand: multi-frame
//! `.lseq` sequences through [`sequence::SequenceBackend`], or a single
//! still image (`is_image` mode) through the `lente-image` decoder. Each
//! successful [`Decoder::next_frame`] fires one frame-ready notification on
//! the calling thread.

pub mod decoder;
pub mod image_backend;
pub mod sequence;

pub use decoder::Decoder;
pub use sequence::{SequenceBackend, SequenceWriter};
