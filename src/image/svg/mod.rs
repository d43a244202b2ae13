//! SVG squaring.
//!
//! # Modules
//!
//! - [`viewbox`]: `viewBox` attribute parsing and formatting
//! - [`squarize`]: document rewrite (square viewBox + translated wrapper group)

mod squarize;
mod viewbox;

pub use squarize::squarize_svg;
