//! Statement period resolution.
//!
//! Metadata tables carry one of three date forms:
//!   Date du relevé      Jour 13 Mois 01 Année 2026
//!   Date d'échéance     Jour 05 Mois 02 Année 2026
//!   ... doit nous parvenir au plus tard le 5 février 2026

use log::{debug, info};
use regex::Regex;

use crate::error::{Result, StatementError};
use crate::normalize::strip_diacritics;
use crate::types::{RawTableGrid, StatementPeriod};

const STATEMENT_DATE_MARKER: &str = "date du releve";
const DUE_DATE_MARKER: &str = "date d'echeance";
const PAYMENT_DEADLINE_MARKER: &str = "doit nous parvenir au plus tard";

/// Accent-free French month names, January first.
const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "fevrier",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "aout",
    "septembre",
    "octobre",
    "novembre",
    "decembre",
];

pub fn french_month_number(name: &str) -> Option<u32> {
    let name = strip_diacritics(name).to_lowercase();
    FRENCH_MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// What the first matching table revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Found {
    StatementDate { year: i32, month: u32 },
    DueDate(StatementPeriod),
}

struct PeriodPatterns {
    labeled: Regex,
    free_text: Regex,
}

impl PeriodPatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            labeled: Regex::new(r"jour\s+(\d{2})\s+mois\s+(\d{2})\s+annee\s+(\d{4})")?,
            free_text: Regex::new(r"le\s+(\d{1,2})\s+([a-z]+)\s+(\d{4})")?,
        })
    }

    /// `jour DD mois MM annee YYYY` -> (year, month), first occurrence in the table
    /// regardless of which marker it sits next to
    fn labeled_date(&self, text: &str) -> Option<(i32, u32)> {
        let caps = self.labeled.captures(text)?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        (1..=12).contains(&month).then_some((year, month))
    }

    /// `le D monthname YYYY` -> (year, month); unknown month names are passed over.
    fn free_text_date(&self, text: &str) -> Option<(i32, u32)> {
        self.free_text.captures_iter(text).find_map(|caps| {
            let month = french_month_number(&caps[2])?;
            let year: i32 = caps[3].parse().ok()?;
            Some((year, month))
        })
    }

    fn scan_table(&self, table: &RawTableGrid) -> Option<Found> {
        let text = strip_diacritics(&table.flattened_text())
            .to_lowercase()
            .replace('\u{2019}', "'");

        if text.contains(STATEMENT_DATE_MARKER) {
            if let Some((year, month)) = self.labeled_date(&text) {
                return Some(Found::StatementDate { year, month });
            }
        }
        if text.contains(DUE_DATE_MARKER) {
            if let Some((year, month)) = self.labeled_date(&text) {
                return Some(Found::DueDate(StatementPeriod::new(year, month)));
            }
        }
        if text.contains(PAYMENT_DEADLINE_MARKER) {
            if let Some((year, month)) = self.free_text_date(&text) {
                return Some(Found::DueDate(StatementPeriod::new(year, month)));
            }
        }
        None
    }
}

/// Locate the due month/year of a statement.
///
/// Scanning stops at the first table where a marker and its date both match.
/// A statement date alone implies a due date one month later.
pub fn resolve_period(tables: &[RawTableGrid]) -> Result<StatementPeriod> {
    let patterns = PeriodPatterns::new()?;

    let found = tables.iter().enumerate().find_map(|(i, table)| {
        let found = patterns.scan_table(table);
        if found.is_some() {
            debug!("period markers found in table {} (page {})", i, table.page);
        }
        found
    });

    let period = match found {
        Some(Found::DueDate(period)) => period,
        Some(Found::StatementDate { year, month }) => {
            StatementPeriod::following_statement(year, month)
        }
        None => return Err(StatementError::DueDateNotFound),
    };

    info!(
        "statement due {}/{:02}",
        period.due_year, period.due_month
    );
    Ok(period)
}
