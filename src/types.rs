//! Core input types for grid clustering.

use bytemuck::{Pod, Zeroable};

/// A 2D point with unsigned integer pixel coordinates.
///
/// `#[repr(C)]` with a stable two-`u32` layout, so a `&[GridPoint]` can be
/// reinterpreted as an interleaved coordinate buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct GridPoint {
    pub x: u32,
    pub y: u32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Read-only view over the caller's strided coordinate buffers.
///
/// Strides are measured in `u32` elements. The entry point validates that
/// both buffers cover the full point count before this view is constructed.
#[derive(Clone, Copy)]
pub(crate) struct StridedCoords<'a> {
    x: &'a [u32],
    x_stride: usize,
    y: &'a [u32],
    y_stride: usize,
}

impl<'a> StridedCoords<'a> {
    pub fn new(x: &'a [u32], x_stride: usize, y: &'a [u32], y_stride: usize) -> Self {
        Self {
            x,
            x_stride,
            y,
            y_stride,
        }
    }

    #[inline]
    pub fn x(&self, index: u32) -> u32 {
        self.x[index as usize * self.x_stride]
    }

    #[inline]
    pub fn y(&self, index: u32) -> u32 {
        self.y[index as usize * self.y_stride]
    }
}
