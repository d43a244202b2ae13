//! Raster squaring (PNG/JPEG).
//!
//! Composites the bitmap onto a transparent square RGBA canvas and
//! optionally resamples it. Needs the `raster` feature; without it every
//! raster input fails with [`SquarizeError::MissingCodec`].

#[cfg(feature = "raster")]
mod process;

#[cfg(feature = "raster")]
pub use process::squarize_raster;

#[cfg(not(feature = "raster"))]
use std::path::Path;

#[cfg(not(feature = "raster"))]
use crate::error::SquarizeError;

/// How to get raster support back.
const RASTER_HINT: &str = "rebuild squarizer with `--features raster`";

/// Size summary of a squared bitmap, for builds without an image codec.
#[cfg(not(feature = "raster"))]
pub struct SquaredImage {
    pub original: (u32, u32),
    pub padding: crate::image::padding::SquarePadding<u32>,
}

#[cfg(not(feature = "raster"))]
pub fn squarize_raster(
    input: &Path,
    _output: &Path,
    _resolution: Option<u32>,
) -> Result<SquaredImage, SquarizeError> {
    let format = input
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_uppercase())
        .unwrap_or_else(|| "raster".to_string());
    Err(SquarizeError::MissingCodec {
        format,
        hint: RASTER_HINT,
    })
}
