//! Error types for statement extraction.

use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while processing statements.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to read a statement file or write the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// A search pattern failed to compile
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An amount string did not parse as a decimal value
    #[error("malformed amount: {text:?}")]
    MalformedAmount { text: String },

    /// A day/month pair does not form a valid calendar date
    #[error("day {day} and month {month} do not form a valid calendar date")]
    InvalidDate { day: u32, month: u32 },

    /// No owner line in the statement. Account headers are keyed on the
    /// owner name, so nothing downstream can be attributed without one.
    #[error("no account owner line found in statement")]
    OwnerNotFound,

    /// No emission date in the statement. Transaction dates cannot be
    /// assigned a year without one.
    #[error("no emission date found in statement")]
    EmissionDateNotFound,

    /// The external PDF-to-text command failed
    #[error("text extraction failed for {path}: {message}")]
    TextExtraction { path: String, message: String },

    /// A statement failed to process; carries the failing file's name
    #[error("failed to process statement {file}: {source}")]
    Statement {
        file: String,
        #[source]
        source: Box<ExtractError>,
    },

    /// Missing directory argument
    #[error("Missing statements directory argument. Usage: releve-extract <statements-dir> [output.csv]")]
    MissingArgument,
}
