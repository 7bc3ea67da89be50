//! End-to-end conversion of one statement PDF into its CSV.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::ParserConfig;
use crate::error::{Result, StatementError};
use crate::export::{default_output_path, write_csv};
use crate::parsers::desjardins::parse_desjardins_tables;
use crate::pdf::{TableExtractor, UnpdfExtractor};
use crate::types::TransactionRecord;

/// Accept only an existing file with a `.pdf` extension (any case).
pub fn validate_input(path: &Path) -> Result<()> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if path.is_file() && is_pdf {
        Ok(())
    } else {
        Err(StatementError::InvalidInput(path.to_path_buf()))
    }
}

/// Convert `pdf_path`, writing to `output` or next to the input.
///
/// Nothing is written unless the whole statement parsed.
pub fn process_statement(
    pdf_path: &Path,
    output: Option<&Path>,
    config: &ParserConfig,
) -> Result<Vec<TransactionRecord>> {
    process_statement_with(&UnpdfExtractor, pdf_path, output, config)
}

pub fn process_statement_with<E: TableExtractor + ?Sized>(
    extractor: &E,
    pdf_path: &Path,
    output: Option<&Path>,
    config: &ParserConfig,
) -> Result<Vec<TransactionRecord>> {
    validate_input(pdf_path)?;

    let tables = extractor.extract_tables(pdf_path)?;
    let records = parse_desjardins_tables(&tables, config)?;

    let out_path: PathBuf = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(pdf_path));
    write_csv(&records, &out_path)?;

    info!("{} transactions written to {}", records.len(), out_path.display());
    Ok(records)
}
