//! Square canvas geometry.
//!
//! Vector and raster inputs pad differently: SVG offsets are real-valued,
//! pixel offsets use floor division and may leave one extra pixel on the
//! far side when the difference is odd.

use std::fmt;

/// Side of the square canvas plus the offset at which the original sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquarePadding<T> {
    pub side: T,
    pub pad_x: T,
    pub pad_y: T,
}

impl SquarePadding<f64> {
    /// Real-valued padding for viewBox coordinates.
    pub fn for_vector(width: f64, height: f64) -> Self {
        let side = width.max(height);
        Self {
            side,
            pad_x: (side - width) / 2.0,
            pad_y: (side - height) / 2.0,
        }
    }
}

impl SquarePadding<u32> {
    /// Pixel padding, floor-divided.
    pub fn for_pixels(width: u32, height: u32) -> Self {
        let side = width.max(height);
        Self {
            side,
            pad_x: (side - width) / 2,
            pad_y: (side - height) / 2,
        }
    }
}

impl<T: PartialEq + Default> SquarePadding<T> {
    /// Already square: nothing to pad.
    pub fn is_noop(&self) -> bool {
        self.pad_x == T::default() && self.pad_y == T::default()
    }
}

impl<T: fmt::Display> fmt::Display for SquarePadding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x), {} (y)", self.pad_x, self.pad_y)
    }
}
