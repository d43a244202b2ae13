//! Per-file error types.
//!
//! Every failure that can happen while squarizing one input maps to a
//! [`SquarizeError`]. The driver reports these and moves on to the next file;
//! only [`crate::config::ConfigError`] aborts a whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while processing a single input file
#[derive(Debug, Error)]
pub enum SquarizeError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Refusing to overwrite input file: {}", .0.display())]
    OutputOverwritesInput(PathBuf),

    #[error("SVG must have a viewBox attribute")]
    MissingViewBox,

    #[error("Invalid viewBox format: `{0}`")]
    MalformedViewBox(String),

    #[error("Invalid SVG document: {0}")]
    InvalidSvg(String),

    #[error("XML error")]
    Xml(#[from] quick_xml::Error),

    #[error("No {format} codec available ({hint})")]
    MissingCodec { format: String, hint: &'static str },

    #[error("Square canvas of {side} x {side} pixels exceeds the {limit}-byte limit")]
    CanvasTooLarge { side: u32, limit: u64 },

    #[error("IO error on `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "raster")]
    #[error("image codec error")]
    Image(#[from] image::ImageError),
}

impl SquarizeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Message including the underlying cause, for one-line reporting.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl From<quick_xml::events::attributes::AttrError> for SquarizeError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}
