//! Configuration error types.

use thiserror::Error;

/// Invalid flag combinations. Any of these aborts the run before a file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--output can only be used with a single input file (got {0})")]
    OutputWithMultipleInputs(usize),

    #[error("at least one input file is required")]
    NoInputs,

    #[error("--resolution must be at least 1")]
    ZeroResolution,
}
