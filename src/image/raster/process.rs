use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};

use super::RASTER_HINT;
use crate::error::SquarizeError;
use crate::image::ensure_parent_dir;
use crate::image::padding::SquarePadding;
use crate::log;

/// Fully transparent background pixel.
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Largest RGBA canvas we allocate, same as `image`'s default decode limit.
const MAX_CANVAS_BYTES: u64 = 512 * 1024 * 1024;

/// Result of squaring a bitmap.
pub struct SquaredImage {
    pub image: RgbaImage,
    /// Input (width, height).
    pub original: (u32, u32),
    pub padding: SquarePadding<u32>,
}

/// Square a raster file and write it to `output` as PNG.
pub fn squarize_raster(
    input: &Path,
    output: &Path,
    resolution: Option<u32>,
) -> Result<SquaredImage, SquarizeError> {
    // sniff the content, the extension only decides SVG vs raster
    let reader = ImageReader::open(input)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| SquarizeError::io(input, e))?;
    ensure_codecs(reader.format())?;

    let img = reader.decode()?;
    let (width, height) = (img.width(), img.height());
    let padding = SquarePadding::for_pixels(width, height);

    log!("raster"; "Original dimensions: {} x {}", width, height);
    log!("raster"; "Square size: {} x {}", padding.side, padding.side);
    log!("raster"; "Padding: {}", padding);
    if let Some(size) = resolution {
        log!("raster"; "Downsampling to: {} x {}", size, size);
    }

    let squared = squarize_image(img, resolution)?;

    ensure_parent_dir(output)?;
    squared
        .image
        .save_with_format(output, ImageFormat::Png)?;
    Ok(squared)
}

/// Paste the image onto a transparent square canvas, then optionally resample.
pub fn squarize_image(
    img: DynamicImage,
    resolution: Option<u32>,
) -> Result<SquaredImage, SquarizeError> {
    let original = (img.width(), img.height());
    let padding = SquarePadding::for_pixels(original.0, original.1);
    check_canvas(padding.side)?;
    if let Some(size) = resolution {
        check_canvas(size)?;
    }

    let source = img.into_rgba8();
    let mut canvas = RgbaImage::from_pixel(padding.side, padding.side, TRANSPARENT);
    imageops::replace(
        &mut canvas,
        &source,
        i64::from(padding.pad_x),
        i64::from(padding.pad_y),
    );

    if let Some(size) = resolution {
        canvas = imageops::resize(&canvas, size, size, FilterType::Lanczos3);
    }

    Ok(SquaredImage {
        image: canvas,
        original,
        padding,
    })
}

fn check_canvas(side: u32) -> Result<(), SquarizeError> {
    let bytes = u64::from(side).pow(2) * 4;
    if bytes > MAX_CANVAS_BYTES {
        return Err(SquarizeError::CanvasTooLarge {
            side,
            limit: MAX_CANVAS_BYTES,
        });
    }
    Ok(())
}

/// Fail early when the `image` build cannot decode the input or encode PNG.
fn ensure_codecs(format: Option<ImageFormat>) -> Result<(), SquarizeError> {
    let missing = |name: &str| SquarizeError::MissingCodec {
        format: name.to_string(),
        hint: RASTER_HINT,
    };

    if let Some(format) = format
        && !format.reading_enabled()
    {
        return Err(missing(&format!("{format:?}")));
    }
    if !ImageFormat::Png.writing_enabled() {
        return Err(missing("PNG"));
    }
    Ok(())
}
