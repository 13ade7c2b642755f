use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum BufferError {
    /// A second allocation was attempted on an already-allocated buffer.
    AllocationConflict,
    /// A dimension was zero or the byte size overflows `usize`.
    InvalidDimensions,
    /// The underlying allocation failed.
    OutOfMemory,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::AllocationConflict => {
                write!(f, "frame buffer is already allocated")
            }
            BufferError::InvalidDimensions => {
                write!(f, "frame dimensions are zero or overflow")
            }
            BufferError::OutOfMemory => write!(f, "frame allocation failed"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Dimensions of the current frame: width and height in pixels, element
/// size in bytes per pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub elem_size: u32,
}

impl FrameInfo {
    pub fn new(width: u32, height: u32, elem_size: u32) -> Self {
        Self {
            width,
            height,
            elem_size,
        }
    }

    /// Total frame length in bytes, or `None` on overflow.
    pub fn byte_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.elem_size as usize)
    }
}

/// Owned pixel storage for a capture source.
///
/// The buffer is unallocated at construction and allocated exactly once, on
/// first frame production. Frame *contents* are rewritten in place on every
/// subsequent frame; a second `allocate` call fails instead of resizing.
/// The only sanctioned dimension change is the explicit [`reset`] /
/// [`reallocate`] path used when a source switches to a different-resolution
/// asset.
///
/// [`reset`]: FrameBuffer::reset
/// [`reallocate`]: FrameBuffer::reallocate
#[derive(Debug, Default)]
pub struct FrameBuffer {
    frame: Vec<u8>,
    info: FrameInfo,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `width * height * elem_size` bytes, zero-filled.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::AllocationConflict` if the buffer is already
    /// allocated (the existing allocation, dimensions and contents are left
    /// untouched), `BufferError::InvalidDimensions` if any dimension is zero
    /// or the byte length overflows, and `BufferError::OutOfMemory` if the
    /// allocation itself fails.
    pub fn allocate(&mut self, width: u32, height: u32, elem_size: u32) -> Result<(), BufferError> {
        if self.is_allocated() {
            return Err(BufferError::AllocationConflict);
        }
        if width == 0 || height == 0 || elem_size == 0 {
            return Err(BufferError::InvalidDimensions);
        }
        let info = FrameInfo::new(width, height, elem_size);
        let len = info.byte_len().ok_or(BufferError::InvalidDimensions)?;

        let mut frame = Vec::new();
        frame
            .try_reserve_exact(len)
            .map_err(|_| BufferError::OutOfMemory)?;
        frame.resize(len, 0);

        self.frame = frame;
        self.info = info;
        Ok(())
    }

    /// Free the buffer and clear the recorded dimensions, returning the
    /// instance to the unallocated state. Memory is released synchronously.
    pub fn reset(&mut self) {
        self.frame = Vec::new();
        self.info = FrameInfo::default();
    }

    /// `reset` followed by `allocate`: the explicit dimension-change path.
    pub fn reallocate(
        &mut self,
        width: u32,
        height: u32,
        elem_size: u32,
    ) -> Result<(), BufferError> {
        self.reset();
        self.allocate(width, height, elem_size)
    }

    /// Make the buffer match `info`: allocate when unallocated, reuse the
    /// existing allocation when dimensions already match, reallocate when
    /// they differ.
    pub fn prepare(&mut self, info: FrameInfo) -> Result<(), BufferError> {
        if !self.is_allocated() {
            return self.allocate(info.width, info.height, info.elem_size);
        }
        if self.info == info {
            return Ok(());
        }
        log::debug!(
            "frame buffer reallocated: {}x{}x{} -> {}x{}x{}",
            self.info.width,
            self.info.height,
            self.info.elem_size,
            info.width,
            info.height,
            info.elem_size
        );
        self.reallocate(info.width, info.height, info.elem_size)
    }

    pub fn is_allocated(&self) -> bool {
        !self.frame.is_empty()
    }

    /// Read-only view onto the live frame, empty when unallocated.
    ///
    /// The view is not stable across frame updates: contents mutate in place
    /// on the next production cycle. Copy before yielding control back to
    /// the producer if persistence is needed.
    pub fn current_frame(&self) -> &[u8] {
        &self.frame
    }

    /// Writable view for the producing backend, empty when unallocated.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.frame
    }

    pub fn frame_size(&self) -> usize {
        self.frame.len()
    }

    pub fn frame_info(&self) -> FrameInfo {
        self.info
    }
}
