//! Heap buffers with the 128-bit alignment required by the array fills.

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};

use bytemuck::{Pod, Zeroable};

use crate::error::{FitMinError, Result};

/// Alignment in bytes of every [`AlignedBuffer`].
pub const ARRAY_ALIGNMENT: usize = 16;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Element types that can live in an [`AlignedBuffer`].
///
/// Only floating point types are supported; an all-zero bit pattern is a
/// valid `0.0` for each of them.
pub trait AlignedElement: sealed::Sealed + Pod + Default + Send + Sync {}

impl AlignedElement for f32 {}
impl AlignedElement for f64 {}

/// Storage unit of a buffer: one aligned 16-byte block.
#[repr(C, align(16))]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Block([u8; ARRAY_ALIGNMENT]);

/// A zero-initialized, fixed-length array whose start is aligned to
/// [`ARRAY_ALIGNMENT`] bytes.
pub struct AlignedBuffer<T: AlignedElement> {
    blocks: Vec<Block>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: AlignedElement> AlignedBuffer<T> {
    /// Allocates `len` zeroed elements.
    pub fn zeroed(len: usize) -> Result<Self> {
        let bytes = len.checked_mul(mem::size_of::<T>()).ok_or_else(|| {
            FitMinError::InvalidInput(format!("aligned buffer of {} elements overflows", len))
        })?;
        Ok(Self {
            blocks: vec![Block::zeroed(); bytes.div_ceil(ARRAY_ALIGNMENT)],
            len,
            _marker: PhantomData,
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: AlignedElement> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // The last block may hold padding past `len`.
        &bytemuck::cast_slice(&self.blocks)[..self.len]
    }
}

impl<T: AlignedElement> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut bytemuck::cast_slice_mut(&mut self.blocks)[..self.len]
    }
}

impl<T: AlignedElement + fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Allocates an aligned array of `byte_size` bytes for use with
/// [`RandomSource::fill_array_uniform`](super::RandomSource::fill_array_uniform)
/// and [`RandomSource::fill_array_normal`](super::RandomSource::fill_array_normal).
///
/// `byte_size` must be a whole number of `T` elements.
pub fn allocate_aligned_array<T: AlignedElement>(byte_size: usize) -> Result<AlignedBuffer<T>> {
    let width = mem::size_of::<T>();
    if byte_size % width != 0 {
        return Err(FitMinError::InvalidInput(format!(
            "byte size {} is not a multiple of the element size {}",
            byte_size, width
        )));
    }
    AlignedBuffer::zeroed(byte_size / width)
}
