//! PDF table extraction.

use std::path::Path;

use log::debug;
use unpdf::{Block, Table, TableCell};

use crate::error::Result;
use crate::types::RawTableGrid;

/// Source of the raw page tables of a statement.
pub trait TableExtractor {
    fn extract_tables(&self, path: &Path) -> Result<Vec<RawTableGrid>>;
}

/// Extraction backed by the `unpdf` parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnpdfExtractor;

fn cell_text(cell: &TableCell) -> Option<String> {
    let text = cell
        .content
        .iter()
        .map(|p| p.plain_text())
        .collect::<Vec<_>>()
        .join("\n");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn to_grid(page: u32, table: &Table) -> RawTableGrid {
    let rows = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(cell_text).collect())
        .collect();
    RawTableGrid::new(page, rows)
}

impl TableExtractor for UnpdfExtractor {
    fn extract_tables(&self, path: &Path) -> Result<Vec<RawTableGrid>> {
        // the document is dropped before any parsing happens
        let doc = unpdf::parse_file(path)?;

        let tables: Vec<_> = doc
            .pages
            .iter()
            .flat_map(|page| {
                page.elements.iter().filter_map(move |block| match block {
                    Block::Table(table) => Some(to_grid(page.number, table)),
                    _ => None,
                })
            })
            .collect();

        debug!("{}: {} tables over {} pages", path.display(), tables.len(), doc.pages.len());
        Ok(tables)
    }
}
