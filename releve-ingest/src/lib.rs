//! releve-ingest: Desjardins credit-card statement (PDF) to accounting-import CSV.

pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod normalize;
pub mod parsers;
pub mod pdf;
pub mod types;

pub use config::ParserConfig;
pub use convert::{process_statement, process_statement_with, validate_input};
pub use error::{Result, StatementError};
pub use export::{default_output_path, write_csv, write_records};
pub use normalize::strip_diacritics;
pub use parsers::desjardins::parse_desjardins_tables;
pub use pdf::{TableExtractor, UnpdfExtractor};
pub use types::{
    AccountSection, Amount, RawTableGrid, StatementPeriod, TransactionRecord,
    OUTPUT_COLUMNS,
};
