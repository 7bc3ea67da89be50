use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of positional columns in the accounting-import CSV layout.
pub const OUTPUT_COLUMNS: usize = 14;

const COL_IDENTIFIER: usize = 0;
const COL_DATE: usize = 3;
const COL_SEQUENCE: usize = 4;
const COL_DESCRIPTION: usize = 5;
const COL_DEBIT: usize = 11;
const COL_CREDIT: usize = 12;

/// One table as handed over by the PDF extraction collaborator.
///
/// Cells keep the collaborator's stacking: a single cell may hold several
/// transactions separated by `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTableGrid {
    /// 1-indexed page the table was found on (0 when unknown)
    pub page: u32,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTableGrid {
    pub fn new(page: u32, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { page, rows }
    }

    /// Build a grid from plain strings; empty strings become empty cells.
    pub fn from_rows<R, S>(page: u32, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(Into::into)
                    .map(|s: String| if s.is_empty() { None } else { Some(s) })
                    .collect()
            })
            .collect();
        Self { page, rows }
    }

    /// Text of a cell, `None` for empty or missing cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Every non-empty cell, space-separated within a row, rows on their own line.
    pub fn flattened_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .flatten()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Due date of a statement; every transaction year is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub due_year: i32,
    /// 1-12
    pub due_month: u32,
}

impl StatementPeriod {
    pub fn new(due_year: i32, due_month: u32) -> Self {
        Self {
            due_year,
            due_month,
        }
    }

    /// Due date one month after a statement date, wrapping December into January.
    pub fn following_statement(statement_year: i32, statement_month: u32) -> Self {
        if statement_month < 12 {
            Self::new(statement_year, statement_month + 1)
        } else {
            Self::new(statement_year + 1, 1)
        }
    }

    /// Rollover rule: a transaction month after the due month belongs to the previous year.
    pub fn year_for_month(&self, transaction_month: u32) -> i32 {
        if transaction_month > self.due_month {
            self.due_year - 1
        } else {
            self.due_year
        }
    }
}

/// A table recognised as one card or account block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSection {
    /// Masked display form, e.g. `VISA **** **** **** 1234`
    pub identifier: String,
    /// Row whose first cell carries the "Date de transaction" marker
    pub marker_row: usize,
}

impl AccountSection {
    /// Index of the row holding the stacked transaction cells.
    pub fn data_row_index(&self) -> usize {
        self.marker_row + 1
    }

    pub fn data_row<'a>(&self, table: &'a RawTableGrid) -> Option<&'a [Option<String>]> {
        table.rows.get(self.data_row_index()).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    /// Charge
    Debit(Decimal),
    /// Payment or refund, flagged with `CR` on the statement
    Credit(Decimal),
}

impl Amount {
    pub fn value(&self) -> Decimal {
        match self {
            Amount::Debit(v) | Amount::Credit(v) => *v,
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Amount::Credit(_))
    }
}

/// Two-decimal rendering used in the debit/credit columns.
fn format_amount(value: Decimal) -> String {
    let mut v = value.round_dp(2);
    v.rescale(2);
    v.to_string()
}

/// One output row of the accounting-import file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub identifier: String,
    pub date: NaiveDate,
    /// 1-based, restarts for every account section
    pub sequence: u32,
    /// Accent-free description
    pub description: String,
    pub amount: Amount,
}

impl TransactionRecord {
    pub fn date_field(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }

    pub fn sequence_field(&self) -> String {
        format!("{:03}", self.sequence)
    }

    pub fn debit(&self) -> String {
        if self.amount.is_credit() {
            String::new()
        } else {
            format_amount(self.amount.value())
        }
    }

    pub fn credit(&self) -> String {
        if self.amount.is_credit() {
            format_amount(self.amount.value())
        } else {
            String::new()
        }
    }

    /// Positional layout of the import format; unused columns stay empty.
    pub fn to_row(&self) -> [String; OUTPUT_COLUMNS] {
        let mut row: [String; OUTPUT_COLUMNS] = Default::default();
        row[COL_IDENTIFIER] = self.identifier.clone();
        row[COL_DATE] = self.date_field();
        row[COL_SEQUENCE] = self.sequence_field();
        row[COL_DESCRIPTION] = self.description.clone();
        row[COL_DEBIT] = self.debit();
        row[COL_CREDIT] = self.credit();
        row
    }
}
