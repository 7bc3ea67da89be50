//! Transaction assembly from a section's data row.
//!
//! Data row cells, each stacking one line per transaction:
//!   [1] inscription date "DD MM"
//!   [2] description
//!   [4] amount "1 234,56" or "123,45 CR"

use std::str::FromStr;

use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;

use super::description::repair_descriptions;
use crate::config::ParserConfig;
use crate::error::{Result, StatementError};
use crate::normalize::strip_diacritics;
use crate::types::{AccountSection, Amount, RawTableGrid, StatementPeriod, TransactionRecord};

const DATE_COL: usize = 1;
const DESCRIPTION_COL: usize = 2;
const AMOUNT_COL: usize = 4;

const CREDIT_MARKER: &str = "CR";

/// "28 12" -> (28, 12)
fn parse_day_month(s: &str) -> Option<(u32, u32)> {
    let parts: Vec<_> = s.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    Some((day, month))
}

/// "123,45 CR" -> Credit(123.45), "1 234,56" -> Debit(1234.56)
pub fn parse_amount(s: &str) -> Option<Amount> {
    let is_credit = s.contains(CREDIT_MARKER);
    let cleaned: String = s
        .replace(CREDIT_MARKER, "")
        .replace(',', ".")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if is_credit {
        Amount::Credit(value)
    } else {
        Amount::Debit(value)
    })
}

fn cell_lines(table: &RawTableGrid, row: usize, col: usize) -> Vec<&str> {
    table.cell(row, col).unwrap_or("").split('\n').collect()
}

/// Build the records of one account section.
///
/// Blank date lines are skipped without consuming a sequence number.
pub fn assemble_section(
    table: &RawTableGrid,
    section: &AccountSection,
    period: StatementPeriod,
    config: &ParserConfig,
) -> Result<Vec<TransactionRecord>> {
    if section.data_row(table).is_none() {
        return Ok(Vec::new());
    }
    let row = section.data_row_index();

    let dates = cell_lines(table, row, DATE_COL);
    let descriptions = repair_descriptions(
        cell_lines(table, row, DESCRIPTION_COL),
        &config.continuation_markers,
    );
    let amounts = cell_lines(table, row, AMOUNT_COL);

    let mut out = Vec::new();
    let mut sequence = 1;

    for (i, (date_line, amount_line)) in dates.iter().zip(&amounts).enumerate() {
        let date_line = date_line.trim();
        if date_line.is_empty() {
            debug!("{}: blank date on line {}, skipping", section.identifier, i);
            continue;
        }

        let (day, month) = parse_day_month(date_line).ok_or_else(|| StatementError::MalformedDate {
            identifier: section.identifier.clone(),
            line: date_line.to_string(),
        })?;
        let year = period.year_for_month(month);
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            StatementError::InvalidDate {
                identifier: section.identifier.clone(),
                year,
                month,
                day,
            }
        })?;

        let amount_line = amount_line.trim();
        let amount = parse_amount(amount_line).ok_or_else(|| StatementError::MalformedAmount {
            identifier: section.identifier.clone(),
            line: amount_line.to_string(),
        })?;

        let description = descriptions
            .get(i)
            .map(|d| strip_diacritics(d))
            .unwrap_or_default();

        out.push(TransactionRecord {
            identifier: section.identifier.clone(),
            date,
            sequence,
            description,
            amount,
        });
        sequence += 1;
    }

    info!("{}: {} transactions", section.identifier, out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn section() -> AccountSection {
        AccountSection {
            identifier: "VISA **** **** **** 1234".to_string(),
            marker_row: 1,
        }
    }

    fn grid(dates: &str, descriptions: &str, amounts: &str) -> RawTableGrid {
        RawTableGrid::from_rows(
            1,
            vec![
                vec!["Carte : XXXX XXXX XXXX 1234", "", "", "", ""],
                vec!["Date de transaction", "Date d'inscription", "Description", "", "Montant"],
                vec!["", dates, descriptions, "", amounts],
            ],
        )
    }

    fn assemble(grid: &RawTableGrid) -> Result<Vec<TransactionRecord>> {
        assemble_section(grid, &section(), StatementPeriod::new(2026, 2), &ParserConfig::default())
    }

    #[test]
    fn test_parse_amount_credit_and_debit() {
        let credit = parse_amount("123,45 CR").unwrap();
        assert_eq!(credit, Amount::Credit(Decimal::from_str("123.45").unwrap()));
        let debit = parse_amount("67,89").unwrap();
        assert_eq!(debit, Amount::Debit(Decimal::from_str("67.89").unwrap()));
        let thousands = parse_amount("1 234,56").unwrap();
        assert_eq!(thousands.value(), Decimal::from_str("1234.56").unwrap());
        let nbsp = parse_amount("2\u{a0}500,00CR").unwrap();
        assert_eq!(nbsp, Amount::Credit(Decimal::from_str("2500.00").unwrap()));
        assert!(parse_amount("n/a").is_none());
        assert!(parse_amount("").is_none());
    }

    #[test]
    fn test_parse_day_month() {
        assert_eq!(parse_day_month("28 12"), Some((28, 12)));
        assert_eq!(parse_day_month(" 3  2 "), Some((3, 2)));
        assert_eq!(parse_day_month("28/12"), None);
        assert_eq!(parse_day_month("28 12 2025"), None);
    }

    #[test]
    fn test_year_rollover_dates() {
        let g = grid("28 12\n03 02", "RESTO\nEPICERIE", "10,00\n20,00");
        let records = assemble(&g).unwrap();
        assert_eq!(records[0].date_field(), "2025/12/28");
        assert_eq!(records[1].date_field(), "2026/02/03");
    }

    #[test]
    fn test_credit_debit_columns() {
        let g = grid("15 01\n16 01", "PAIEMENT\nMETRO", "123,45 CR\n67,89");
        let records = assemble(&g).unwrap();
        assert_eq!(records[0].credit(), "123.45");
        assert_eq!(records[0].debit(), "");
        assert_eq!(records[1].debit(), "67.89");
        assert_eq!(records[1].credit(), "");

        let money = Regex::new(r"^\d+\.\d{2}$").unwrap();
        for r in &records {
            let (d, c) = (r.debit(), r.credit());
            assert!(d.is_empty() != c.is_empty());
            assert!(money.is_match(if d.is_empty() { &c } else { &d }));
        }
    }

    #[test]
    fn test_blank_dates_do_not_consume_sequence() {
        let g = grid("02 01\n\n05 01\n  \n09 01", "A\nB\nC\nD\nE", "1,00\n2,00\n3,00\n4,00\n5,00");
        let records = assemble(&g).unwrap();
        let seqs: Vec<_> = records.iter().map(|r| r.sequence_field()).collect();
        assert_eq!(seqs, vec!["001", "002", "003"]);
        // descriptions stay index-aligned with the raw lines
        let descs: Vec<_> = records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, vec!["A", "C", "E"]);
    }

    #[test]
    fn test_repaired_descriptions_align() {
        let g = grid(
            "10 01\n11 01",
            "NETFLIX\nDOLLAR 12.00 USD\nAMAZON",
            "16,50\n42,00",
        );
        let records = assemble(&g).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "*NETFLIX");
        assert_eq!(records[1].description, "AMAZON");
    }

    #[test]
    fn test_short_description_list_yields_empty() {
        let g = grid("10 01\n11 01", "SEUL", "1,00\n2,00");
        let records = assemble(&g).unwrap();
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn test_description_accents_stripped() {
        let g = grid("10 01", "CAFÉ CRÈME", "4,25");
        let records = assemble(&g).unwrap();
        assert_eq!(records[0].description, "CAFE CREME");
    }

    #[test]
    fn test_pairs_limited_to_shorter_column() {
        let g = grid("10 01\n11 01\n12 01", "A\nB\nC", "1,00\n2,00");
        assert_eq!(assemble(&g).unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_lines_are_fatal() {
        let g = grid("10/01", "A", "1,00");
        assert!(matches!(assemble(&g), Err(StatementError::MalformedDate { .. })));

        let g = grid("30 02", "A", "1,00");
        assert!(matches!(assemble(&g), Err(StatementError::InvalidDate { month: 2, day: 30, .. })));

        let g = grid("10 01", "A", "abc");
        assert!(matches!(assemble(&g), Err(StatementError::MalformedAmount { .. })));
    }
}
