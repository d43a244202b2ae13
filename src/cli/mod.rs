//! Command-line interface module.

mod args;
pub mod squarize;

pub use args::Cli;
