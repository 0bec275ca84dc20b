//! Binder inventory loading
//!
//! Inventory exports are CSV files with one row per physically stored card.
//! Several files may be present; they are concatenated in file name order.

use crate::error::{PortfolioError, Result};
use crate::io::{check_record_width, list_files_with_extension};
use csv::StringRecord;
use serde::Deserialize;
use std::path::Path;

/// File extension of inventory exports
pub const INVENTORY_EXTENSION: &str = "csv";

/// Separator between set id and card number in a card id
pub const CARD_ID_SEPARATOR: &str = "-";

/// One row of an inventory export. Every column is optional so that an
/// export missing a column still loads.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
struct InventoryRow {
    set_id: Option<String>,
    card_number: Option<String>,
    card_name: Option<String>,
    binder_name: Option<String>,
    page_number: Option<u32>,
    slot_number: Option<u32>,
}

/// A physically stored card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItem {
    /// Join key, `None` when set id or card number is missing
    pub card_id: Option<String>,
    pub set_id: Option<String>,
    pub card_number: Option<String>,
    pub card_name: Option<String>,
    pub binder_name: Option<String>,
    pub page_number: Option<u32>,
    pub slot_number: Option<u32>,
}

impl InventoryItem {
    /// Build an item, deriving its card id
    pub fn new(
        set_id: Option<String>,
        card_number: Option<String>,
        binder_name: Option<String>,
        page_number: Option<u32>,
        slot_number: Option<u32>,
    ) -> Self {
        Self {
            card_id: composite_card_id(set_id.as_deref(), card_number.as_deref()),
            set_id,
            card_number,
            card_name: None,
            binder_name,
            page_number,
            slot_number,
        }
    }

    pub fn with_card_name(mut self, name: impl Into<String>) -> Self {
        self.card_name = Some(name.into());
        self
    }
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        let mut item = InventoryItem::new(
            row.set_id,
            row.card_number,
            row.binder_name,
            row.page_number,
            row.slot_number,
        );
        item.card_name = row.card_name;
        item
    }
}

/// Card id as used by the catalog: `<set_id>-<card_number>`, e.g. "base1-4"
pub fn composite_card_id(set_id: Option<&str>, card_number: Option<&str>) -> Option<String> {
    match (set_id, card_number) {
        (Some(set), Some(number)) => Some(format!("{set}{CARD_ID_SEPARATOR}{number}")),
        _ => None,
    }
}

/// Which inventory columns appeared in at least one file header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryColumns {
    pub set_id: bool,
    pub card_number: bool,
    pub card_name: bool,
    pub binder_name: bool,
    pub page_number: bool,
    pub slot_number: bool,
}

impl InventoryColumns {
    /// All columns present
    pub fn all() -> Self {
        Self {
            set_id: true,
            card_number: true,
            card_name: true,
            binder_name: true,
            page_number: true,
            slot_number: true,
        }
    }

    pub fn from_headers(headers: &StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h == name);
        Self {
            set_id: has("set_id"),
            card_number: has("card_number"),
            card_name: has("card_name"),
            binder_name: has("binder_name"),
            page_number: has("page_number"),
            slot_number: has("slot_number"),
        }
    }

    /// Columns of a concatenation of two tables
    pub fn union(self, other: Self) -> Self {
        Self {
            set_id: self.set_id || other.set_id,
            card_number: self.card_number || other.card_number,
            card_name: self.card_name || other.card_name,
            binder_name: self.binder_name || other.binder_name,
            page_number: self.page_number || other.page_number,
            slot_number: self.slot_number || other.slot_number,
        }
    }

    /// Card ids can only be derived when both key columns exist
    pub fn has_card_id(&self) -> bool {
        self.set_id && self.card_number
    }

    pub fn names(&self) -> Vec<&'static str> {
        [
            ("set_id", self.set_id),
            ("card_number", self.card_number),
            ("card_name", self.card_name),
            ("binder_name", self.binder_name),
            ("page_number", self.page_number),
            ("slot_number", self.slot_number),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

/// Concatenated inventory rows plus the columns they came with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryTable {
    pub items: Vec<InventoryItem>,
    pub columns: InventoryColumns,
}

impl InventoryTable {
    pub fn new(items: Vec<InventoryItem>, columns: InventoryColumns) -> Self {
        Self { items, columns }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn extend(&mut self, other: InventoryTable) {
        self.columns = self.columns.union(other.columns);
        self.items.extend(other.items);
    }
}

/// Read a single inventory CSV
pub fn read_inventory_csv<P: AsRef<Path>>(path: P) -> Result<InventoryTable> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| PortfolioError::csv(path, e))?;

    let headers = rdr.headers().map_err(|e| PortfolioError::csv(path, e))?.clone();
    let columns = InventoryColumns::from_headers(&headers);

    let mut items = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| PortfolioError::csv(path, e))?;
        check_record_width(path, &headers, &record)?;
        let row: InventoryRow = record
            .deserialize(Some(&headers))
            .map_err(|e| PortfolioError::csv(path, e))?;
        items.push(InventoryItem::from(row));
    }

    Ok(InventoryTable::new(items, columns))
}

/// Load and concatenate every inventory CSV in `dir`.
///
/// A directory without CSV files yields an empty table.
pub fn load_inventory<P: AsRef<Path>>(dir: P) -> Result<InventoryTable> {
    let dir = dir.as_ref();
    let files = list_files_with_extension(dir, INVENTORY_EXTENSION)?;

    if files.is_empty() {
        log::warn!("No CSV files found in {}", dir.display());
        return Ok(InventoryTable::default());
    }

    let mut table = InventoryTable::default();
    for path in files {
        log::debug!("Reading inventory file {}", path.display());
        table.extend(read_inventory_csv(&path)?);
    }

    if !table.columns.has_card_id() {
        log::warn!(
            "Inventory in {} lacks set_id or card_number, no card ids derived",
            dir.display()
        );
    }
    log::info!(
        "Loaded {} inventory rows with columns: {:?}",
        table.len(),
        table.columns.names()
    );
    Ok(table)
}

#[cfg(test)]
pub use tests::make_test_item;

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
