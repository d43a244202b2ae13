//! Image squaring.
//!
//! # Modules
//!
//! - [`padding`]: square canvas geometry shared by both transforms
//! - [`svg`]: viewBox widening + translated wrapper group
//! - [`raster`]: transparent canvas compositing (PNG/JPEG)

pub mod padding;
pub mod raster;
pub mod svg;

use std::fs;
use std::path::Path;

use crate::error::SquarizeError;

/// Create the output's parent directory if it does not exist yet.
pub(crate) fn ensure_parent_dir(output: &Path) -> Result<(), SquarizeError> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| SquarizeError::io(parent, e))?;
    }
    Ok(())
}
