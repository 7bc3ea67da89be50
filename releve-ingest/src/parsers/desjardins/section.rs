//! Card/account section detection.
//!
//! Expected header rows:
//!   Carte : XXXX XXXX XXXX 1234
//!   Compte Desjardins ... 5678

use log::debug;
use regex::Regex;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::types::{AccountSection, RawTableGrid};

const DATA_MARKER: &str = "Date de transaction";

pub struct SectionLocator<'a> {
    card: Regex,
    account: Regex,
    config: &'a ParserConfig,
}

impl<'a> SectionLocator<'a> {
    pub fn new(config: &'a ParserConfig) -> Result<Self> {
        Ok(Self {
            card: Regex::new(r"(?i)Carte\s+:\s+.+(\d{4})$")?,
            account: Regex::new(r"(?i)compte.+(\d{4})$")?,
            config,
        })
    }

    /// Joined non-empty cells of the first row.
    fn header_text(table: &RawTableGrid) -> String {
        table
            .rows
            .first()
            .map(|row| {
                row.iter()
                    .flatten()
                    .filter(|c| !c.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Last four digits of a card header, else of an account header.
    fn last_four(&self, header: &str) -> Option<String> {
        self.card
            .captures(header)
            .or_else(|| self.account.captures(header))
            .map(|caps| caps[1].to_string())
    }

    /// `None` when the table is not a transaction section, or has no data row.
    pub fn locate(&self, table: &RawTableGrid) -> Option<AccountSection> {
        let header = Self::header_text(table);
        let Some(last_four) = self.last_four(&header) else {
            debug!("page {}: not a transaction table: {:?}", table.page, header);
            return None;
        };
        let identifier = self.config.masked_identifier(&last_four);

        let marker_row = (0..table.rows.len())
            .position(|i| table.cell(i, 0).is_some_and(|c| c.contains(DATA_MARKER)));
        let Some(marker_row) = marker_row else {
            debug!("{identifier}: no '{DATA_MARKER}' row, skipping");
            return None;
        };

        let section = AccountSection {
            identifier,
            marker_row,
        };
        match section.data_row(table) {
            Some(row) if !row.is_empty() => Some(section),
            _ => {
                debug!("{}: no data row after marker, skipping", section.identifier);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> RawTableGrid {
        RawTableGrid::from_rows(2, rows)
    }

    fn data_rows(header: &str) -> RawTableGrid {
        table(vec![
            vec![header],
            vec!["Date de transaction", "Date d'inscription", "Description", "", "Montant"],
            vec!["", "02 01", "NETFLIX", "", "16,99"],
        ])
    }

    #[test]
    fn test_card_header() {
        let cfg = ParserConfig::default();
        let locator = SectionLocator::new(&cfg).unwrap();
        let section = locator.locate(&data_rows("Carte : XXXX XXXX XXXX 1234")).unwrap();
        assert_eq!(section.identifier, "VISA **** **** **** 1234");
        assert_eq!(section.marker_row, 1);
    }

    #[test]
    fn test_account_header() {
        let cfg = ParserConfig::default();
        let locator = SectionLocator::new(&cfg).unwrap();
        let section = locator
            .locate(&data_rows("Numéro de COMPTE 4540 XXXX XXXX 9876"))
            .unwrap();
        assert_eq!(section.identifier, "VISA **** **** **** 9876");
    }

    #[test]
    fn test_marker_found_below_header_rows() {
        let cfg = ParserConfig::default();
        let locator = SectionLocator::new(&cfg).unwrap();
        let t = table(vec![
            vec!["Carte : XXXX XXXX XXXX 4321"],
            vec!["Titulaire", "M. TREMBLAY"],
            vec!["", "Date de transaction"],
            vec!["Date de transaction", "Date d'inscription"],
            vec!["", "02 01"],
        ]);
        // only a marker in the first cell counts
        assert_eq!(locator.locate(&t).unwrap().marker_row, 3);
    }

    #[test]
    fn test_header_joins_multiple_cells() {
        let cfg = ParserConfig::default();
        let locator = SectionLocator::new(&cfg).unwrap();
        let mut t = data_rows("Carte :");
        t.rows[0].push(None);
        t.rows[0].push(Some("XXXX XXXX XXXX 5555 ".to_string()));
        let section = locator.locate(&t).unwrap();
        assert_eq!(section.identifier, "VISA **** **** **** 5555");
    }

    #[test]
    fn test_custom_prefix() {
        let cfg = ParserConfig {
            identifier_prefix: "MC".to_string(),
            ..ParserConfig::default()
        };
        let locator = SectionLocator::new(&cfg).unwrap();
        let section = locator.locate(&data_rows("Carte : XXXX XXXX XXXX 1234")).unwrap();
        assert_eq!(section.identifier, "MC **** **** **** 1234");
    }

    #[test]
    fn test_non_section_tables_skipped() {
        let cfg = ParserConfig::default();
        let locator = SectionLocator::new(&cfg).unwrap();
        assert!(locator.locate(&data_rows("Sommaire de vos transactions")).is_none());
        // digits must end the header
        assert!(locator.locate(&data_rows("Carte : XXXX 1234 (suite)")).is_none());
        assert!(locator.locate(&RawTableGrid::default()).is_none());
    }

    #[test]
    fn test_missing_marker_or_data_row() {
        let cfg = ParserConfig::default();
        let locator = SectionLocator::new(&cfg).unwrap();

        let no_marker = table(vec![vec!["Carte : XXXX XXXX XXXX 1234"], vec!["", "02 01"]]);
        assert!(locator.locate(&no_marker).is_none());

        let marker_last = table(vec![
            vec!["Carte : XXXX XXXX XXXX 1234"],
            vec!["Date de transaction"],
        ]);
        assert!(locator.locate(&marker_last).is_none());
    }
}
