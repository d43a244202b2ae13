//! viewBox parsing and formatting.

use std::fmt;

use crate::error::SquarizeError;
use crate::image::padding::SquarePadding;

/// The four numbers of an SVG `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse `"min-x min-y width height"`.
    ///
    /// Numbers may be separated by whitespace and/or commas. Anything other
    /// than four finite numbers, or a negative size, is malformed.
    pub fn parse(value: &str) -> Result<Self, SquarizeError> {
        let malformed = || SquarizeError::MalformedViewBox(value.to_string());

        let tokens: Vec<&str> = value
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let [min_x, min_y, width, height] = *tokens.as_slice() else {
            return Err(malformed());
        };

        let num = |t: &str| {
            t.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(malformed)
        };
        let vb = Self {
            min_x: num(min_x)?,
            min_y: num(min_y)?,
            width: num(width)?,
            height: num(height)?,
        };

        if vb.width < 0.0 || vb.height < 0.0 {
            return Err(malformed());
        }
        Ok(vb)
    }

    /// Square viewBox with the same origin, and the offset for existing content.
    pub fn squared(&self) -> (Self, SquarePadding<f64>) {
        let padding = SquarePadding::for_vector(self.width, self.height);
        let square = Self {
            width: padding.side,
            height: padding.side,
            ..*self
        };
        (square, padding)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}
