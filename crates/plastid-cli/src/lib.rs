//! CLI logic for the Plastid detection tool.
//!
//! Conversion proper needs a parsed document from an external deserializer,
//! so the command line exposes the one self-contained entry point: format
//! detection over a raw file.

mod args;

pub use args::Args;

use std::{fs, io};

use log::info;
use thiserror::Error;

use plastid::detect;

/// Errors the CLI can fail with before a verdict is reached.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs detection over the input file.
///
/// Returns whether the file belongs to the supported document family.
///
/// # Errors
///
/// Returns [`CliError`] when the input file cannot be read.
pub fn run(args: &Args) -> Result<bool, CliError> {
    info!(input_path = args.input; "Inspecting document");

    let text = fs::read_to_string(&args.input)?;
    let detected = detect::is_pathway_document(&text);

    if detected {
        info!(input_path = args.input; "Document family detected");
        println!("{}: pathway document", args.input);
    } else {
        info!(input_path = args.input; "Marker not found");
        println!("{}: not a pathway document", args.input);
    }

    Ok(detected)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args_for(path: &str) -> Args {
        Args {
            input: path.to_owned(),
            log_level: "off".to_owned(),
        }
    }

    #[test]
    fn test_run_detects_marker_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "<sbml xmlns:cd=\"{}\"></sbml>",
            detect::FORMAT_MARKER
        )
        .unwrap();

        let detected = run(&args_for(file.path().to_str().unwrap())).unwrap();
        assert!(detected);
    }

    #[test]
    fn test_run_rejects_plain_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<sbml></sbml>").unwrap();

        let detected = run(&args_for(file.path().to_str().unwrap())).unwrap();
        assert!(!detected);
    }

    #[test]
    fn test_run_missing_file_is_an_error() {
        let result = run(&args_for("/nonexistent/input.xml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
