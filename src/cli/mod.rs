//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Dry-run (`--info`) and layer listing output

mod args;
mod info;

pub use args::Args;
pub use info::{print_info, print_layers};
