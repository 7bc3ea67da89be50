//! Accounting-import CSV output.
//!
//! 14 positional columns, every field quoted, no header row.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::TransactionRecord;

/// `statement.pdf` -> `statement.csv`
pub fn default_output_path(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension("csv")
}

pub fn write_records<W: Write>(records: &[TransactionRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        wtr.write_record(record.to_row())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(records: &[TransactionRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_records(records, file)
}
