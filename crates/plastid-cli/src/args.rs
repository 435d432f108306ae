//! Command-line argument definitions for the Plastid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input path and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Plastid detection tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the document to inspect
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
