//! Error types for statement conversion.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatementError>;

#[derive(Error, Debug)]
pub enum StatementError {
    /// The input path is not an existing `.pdf` file.
    #[error("File '{}' does not exist or is not a PDF.", .0.display())]
    InvalidInput(PathBuf),

    /// The extractor found no table anywhere in the document.
    #[error("No tables found in PDF. Ensure the PDF is correctly formatted.")]
    NoTables,

    /// Neither a due date nor a statement date could be located.
    #[error("Due date not found in PDF. Ensure 'Date d'échéance' is present.")]
    DueDateNotFound,

    #[error("{identifier}: malformed transaction date line '{line}'")]
    MalformedDate { identifier: String, line: String },

    #[error("{identifier}: no such calendar date {year}/{month:02}/{day:02}")]
    InvalidDate {
        identifier: String,
        year: i32,
        month: u32,
        day: u32,
    },

    #[error("{identifier}: malformed amount '{line}'")]
    MalformedAmount { identifier: String, line: String },

    #[error("PDF extraction error: {0}")]
    Pdf(#[from] unpdf::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("pattern error: {0}")]
    Regex(#[from] regex::Error),
}
