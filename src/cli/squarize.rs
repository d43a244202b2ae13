//! Per-file driver: naming, format dispatch and the batch summary.
//!
//! Files are handled strictly in input order. A failure is reported and the
//! batch moves on; only the final [`Summary`] decides the exit code.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::SquarizeConfig;
use crate::error::SquarizeError;
use crate::image::{raster, svg};
use crate::logger::plural_count;
use crate::{debug, error, log};

/// Which transform handles a file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Svg,
    Raster,
}

impl InputKind {
    /// Dispatch on the lowercased extension.
    pub fn from_path(path: &Path) -> Result<Self, SquarizeError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" | "jpg" | "jpeg" => Ok(Self::Raster),
            "" => Err(SquarizeError::UnsupportedFormat("(no extension)".into())),
            other => Err(SquarizeError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// `{stem}{suffix}{ext}` next to the input.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<(PathBuf, SquarizeError)>,
}

impl Summary {
    /// Every input was processed.
    pub fn is_success(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Process every input and report progress.
pub fn run(config: &SquarizeConfig) -> Summary {
    let mut summary = Summary {
        total: config.inputs.len(),
        ..Default::default()
    };

    for input in &config.inputs {
        match process_file(input, config) {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                error!("{}", e.report());
                summary.failures.push((input.clone(), e));
            }
        }
    }

    let line = format!(
        "Successfully processed {}/{}",
        summary.succeeded,
        plural_count(summary.total, "file")
    );
    if summary.is_success() {
        log!("done"; "✓ {}", line);
    } else {
        log!("done"; "✗ {} ({} failed)", line, summary.failures.len());
    }

    summary
}

fn process_file(input: &Path, config: &SquarizeConfig) -> Result<(), SquarizeError> {
    if !input.exists() {
        return Err(SquarizeError::FileNotFound(input.to_path_buf()));
    }

    let output = match &config.output {
        Some(path) => path.clone(),
        None => output_path_for(input, &config.suffix),
    };

    log!("file"; "Processing: {}", input.display());

    let kind = InputKind::from_path(input)?;
    if same_file(input, &output) {
        return Err(SquarizeError::OutputOverwritesInput(output));
    }

    match kind {
        InputKind::Svg => {
            if let Some(size) = config.resolution {
                debug!("svg"; "ignoring --resolution {} for vector input", size);
            }
            let squared = svg::squarize_svg(input, &output)?;
            debug!("svg"; "viewBox {} -> {}", squared.original, squared.viewbox);
            if squared.padding.is_noop() {
                debug!("svg"; "already square, content wrapped without translation");
            }
            log!("svg"; "Saved square SVG to: {}", output.display());
        }
        InputKind::Raster => {
            let squared = raster::squarize_raster(input, &output, config.resolution)?;
            let (width, height) = squared.original;
            debug!("raster"; "{} x {} -> {} x {}", width, height, squared.padding.side, squared.padding.side);
            if squared.padding.is_noop() {
                debug!("raster"; "already square, only converted to RGBA");
            }
            log!("raster"; "Saved square PNG to: {}", output.display());
        }
    }
    Ok(())
}

/// Whether writing `output` would replace `input`.
fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
