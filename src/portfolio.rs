//! Portfolio CSV writing
//!
//! Fills defaults on merged rows, derives the binder position index and
//! writes the portfolio file read back by the summary report.

use crate::error::{PortfolioError, Result};
use crate::formatters::format_plain_decimal;
use crate::inventory::InventoryColumns;
use crate::merge::{MergedRow, MergedTable};
use std::io::Write;
use std::path::Path;

/// Set name used when the catalog did not know the card
pub const SET_NAME_NOT_FOUND: &str = "NOT_FOUND";

/// Columns of the portfolio file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioColumn {
    CardId,
    CardName,
    SetName,
    CardMarketValue,
    BinderName,
    PageNumber,
    SlotNumber,
    Index,
}

impl PortfolioColumn {
    pub const ALL: [PortfolioColumn; 8] = [
        PortfolioColumn::CardId,
        PortfolioColumn::CardName,
        PortfolioColumn::SetName,
        PortfolioColumn::CardMarketValue,
        PortfolioColumn::BinderName,
        PortfolioColumn::PageNumber,
        PortfolioColumn::SlotNumber,
        PortfolioColumn::Index,
    ];

    /// Header name in the CSV file
    pub fn header(&self) -> &'static str {
        match self {
            PortfolioColumn::CardId => "card_id",
            PortfolioColumn::CardName => "card_name",
            PortfolioColumn::SetName => "set_name",
            PortfolioColumn::CardMarketValue => "card_market_value",
            PortfolioColumn::BinderName => "binder_name",
            PortfolioColumn::PageNumber => "page_number",
            PortfolioColumn::SlotNumber => "slot_number",
            PortfolioColumn::Index => "index",
        }
    }

    /// Columns that can be written given what the inventory provided
    pub fn available(inventory: &InventoryColumns) -> Vec<PortfolioColumn> {
        Self::ALL
            .into_iter()
            .filter(|column| match column {
                PortfolioColumn::CardId => inventory.has_card_id(),
                PortfolioColumn::CardName
                | PortfolioColumn::SetName
                | PortfolioColumn::CardMarketValue => true,
                PortfolioColumn::BinderName => inventory.binder_name,
                PortfolioColumn::PageNumber => inventory.page_number,
                PortfolioColumn::SlotNumber => inventory.slot_number,
                PortfolioColumn::Index => {
                    inventory.binder_name && inventory.page_number && inventory.slot_number
                }
            })
            .collect()
    }
}

/// A cleaned portfolio row
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRecord {
    pub card_id: Option<String>,
    pub card_name: Option<String>,
    pub set_name: String,
    pub card_market_value: f64,
    pub binder_name: Option<String>,
    pub page_number: Option<u32>,
    pub slot_number: Option<u32>,
    pub index: String,
}

impl PortfolioRecord {
    /// Apply defaults: unknown value becomes 0, unknown set becomes NOT_FOUND
    pub fn from_merged(row: &MergedRow) -> Self {
        Self {
            card_id: row.card_id.clone(),
            card_name: row.card_name.clone(),
            set_name: row
                .set_name
                .clone()
                .unwrap_or_else(|| SET_NAME_NOT_FOUND.to_string()),
            card_market_value: row.card_market_value.unwrap_or(0.0),
            binder_name: row.binder_name.clone(),
            page_number: row.page_number,
            slot_number: row.slot_number,
            index: position_index(
                row.binder_name.as_deref(),
                row.page_number,
                row.slot_number,
            ),
        }
    }

    fn field(&self, column: PortfolioColumn) -> String {
        match column {
            PortfolioColumn::CardId => self.card_id.clone().unwrap_or_default(),
            PortfolioColumn::CardName => self.card_name.clone().unwrap_or_default(),
            PortfolioColumn::SetName => self.set_name.clone(),
            PortfolioColumn::CardMarketValue => format_plain_decimal(self.card_market_value),
            PortfolioColumn::BinderName => self.binder_name.clone().unwrap_or_default(),
            PortfolioColumn::PageNumber => opt_to_string(self.page_number),
            PortfolioColumn::SlotNumber => opt_to_string(self.slot_number),
            PortfolioColumn::Index => self.index.clone(),
        }
    }
}

fn opt_to_string(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Human-readable binder location, e.g. `A-1-2`. Not guaranteed unique.
pub fn position_index(binder: Option<&str>, page: Option<u32>, slot: Option<u32>) -> String {
    format!(
        "{}-{}-{}",
        binder.unwrap_or_default(),
        opt_to_string(page),
        opt_to_string(slot)
    )
}

/// Clean every merged row
pub fn build_records(table: &MergedTable) -> Vec<PortfolioRecord> {
    table.rows.iter().map(PortfolioRecord::from_merged).collect()
}

/// Write `records` as CSV with a header row, restricted to `columns`
pub fn write_records<W: Write>(
    writer: W,
    records: &[PortfolioRecord],
    columns: &[PortfolioColumn],
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns.iter().map(|c| c.header()))?;
    for record in records {
        wtr.write_record(columns.iter().map(|&c| record.field(c)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// What [`write_portfolio`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written {
        rows: usize,
        columns: Vec<PortfolioColumn>,
    },
    /// Nothing to write; the output file was left untouched
    Skipped,
}

/// Write the merged table to `path`.
///
/// An empty table is not an error: nothing is written and
/// [`WriteOutcome::Skipped`] is returned.
pub fn write_portfolio<P: AsRef<Path>>(table: &MergedTable, path: P) -> Result<WriteOutcome> {
    let path = path.as_ref();

    if table.is_empty() {
        log::warn!("Merged table is empty. Nothing to write.");
        return Ok(WriteOutcome::Skipped);
    }

    let records = build_records(table);
    let columns = PortfolioColumn::available(&table.inventory_columns);

    let file = std::fs::File::create(path).map_err(|e| PortfolioError::io(path, e))?;
    write_records(file, &records, &columns).map_err(|source| PortfolioError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Portfolio written to {} ({} rows)", path.display(), records.len());
    Ok(WriteOutcome::Written {
        rows: records.len(),
        columns,
    })
}
