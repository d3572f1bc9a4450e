//! External PDF-to-text conversion.
//!
//! The converter is a black box: any command invocable as
//! `<program> [fixed args] <input> <output>` that writes UTF-8 text works.
//! The default is `pdftotext -layout`; layout mode matters because the line
//! grammars depend on the statement's column alignment surviving the
//! conversion.

use crate::error::{ExtractError, Result};
use log::debug;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

/// Environment variable overriding the conversion command.
pub const CONVERTER_ENV: &str = "RELEVE_PDF_TO_TEXT";

const DEFAULT_CONVERTER: &str = "pdftotext -layout";

/// Runs the external PDF-to-text command against statement files.
pub struct TextExtractor {
    program: String,
    args: Vec<String>,
}

impl TextExtractor {
    /// Builds the extractor from `RELEVE_PDF_TO_TEXT`, defaulting to
    /// `pdftotext -layout`.
    pub fn from_env() -> Self {
        let command = env::var(CONVERTER_ENV).unwrap_or_else(|_| DEFAULT_CONVERTER.to_string());
        Self::from_command(&command)
    }

    /// Builds the extractor from a whitespace-separated command line.
    pub fn from_command(command: &str) -> Self {
        let mut parts = command.split_whitespace();
        let program = parts.next().unwrap_or("pdftotext").to_string();
        let args = parts.map(str::to_string).collect();
        TextExtractor { program, args }
    }

    /// Converts one statement file and returns its text.
    ///
    /// The converted text lands in a temporary file that is cleaned up when
    /// the handle drops.
    pub fn extract(&self, path: &Path) -> Result<String> {
        let output_file = NamedTempFile::new()?;
        debug!(
            "converting {} via {} to {}",
            path.display(),
            self.program,
            output_file.path().display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .arg(output_file.path())
            .status()
            .map_err(|e| ExtractError::TextExtraction {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ExtractError::TextExtraction {
                path: path.display().to_string(),
                message: format!("{} exited with {}", self.program, status),
            });
        }

        Ok(fs::read_to_string(output_file.path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_with_substitute_converter() {
        // `cp input output` has the same call shape as `pdftotext`.
        let mut input = NamedTempFile::new().unwrap();
        write!(input, "MR JEAN DUPONT\n15/11/2014\n").unwrap();

        let extractor = TextExtractor::from_command("cp");
        let text = extractor.extract(input.path()).unwrap();
        assert_eq!(text, "MR JEAN DUPONT\n15/11/2014\n");
    }

    #[test]
    fn test_failing_converter_is_an_error() {
        let input = NamedTempFile::new().unwrap();
        let extractor = TextExtractor::from_command("false");
        let err = extractor.extract(input.path()).unwrap_err();
        assert!(matches!(err, ExtractError::TextExtraction { .. }));
    }

    #[test]
    fn test_unspawnable_converter_is_an_error() {
        let input = NamedTempFile::new().unwrap();
        let extractor = TextExtractor::from_command("definitely-not-a-real-command");
        let err = extractor.extract(input.path()).unwrap_err();
        assert!(matches!(err, ExtractError::TextExtraction { .. }));
    }
}
