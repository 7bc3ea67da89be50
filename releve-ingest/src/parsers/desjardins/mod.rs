//! Desjardins VISA credit-card statement parser.
//!
//! Works on the tables of a whole statement: one or more metadata tables
//! carrying the due date, then one table per card or account, e.g.
//!   Carte : XXXX XXXX XXXX 1234
//!   Date de transaction | Date d'inscription | Description | ... | Montant
//!   <one row whose cells stack every transaction on its own line>

pub mod assemble;
pub mod description;
pub mod period;
pub mod section;

use log::debug;

use crate::config::ParserConfig;
use crate::error::{Result, StatementError};
use crate::types::{RawTableGrid, TransactionRecord};

pub use assemble::{assemble_section, parse_amount};
pub use description::repair_descriptions;
pub use period::{french_month_number, resolve_period};
pub use section::SectionLocator;

/// Parse every transaction out of the extracted statement tables, in table order.
pub fn parse_desjardins_tables(
    tables: &[RawTableGrid],
    config: &ParserConfig,
) -> Result<Vec<TransactionRecord>> {
    if tables.is_empty() {
        return Err(StatementError::NoTables);
    }

    let period = resolve_period(tables)?;
    let locator = SectionLocator::new(config)?;

    let mut out = Vec::new();
    for (i, table) in tables.iter().enumerate() {
        let Some(section) = locator.locate(table) else {
            continue;
        };
        debug!("table {} (page {}): section {}", i, table.page, section.identifier);
        out.extend(assemble_section(table, &section, period, config)?);
    }

    Ok(out)
}
