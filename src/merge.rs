//! Inventory / catalog reconciliation
//!
//! Left-joins inventory rows onto catalog cards by card id. Columns that exist
//! on both sides are reconciled with [`prefer_catalog`].

use crate::catalog::{Catalog, CatalogEntry};
use crate::inventory::{InventoryColumns, InventoryItem, InventoryTable};

/// Prefer the catalog's value, fall back to the inventory's
pub fn prefer_catalog<T>(catalog: Option<T>, inventory: Option<T>) -> Option<T> {
    catalog.or(inventory)
}

/// An inventory row after the join
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedRow {
    pub card_id: Option<String>,
    pub card_name: Option<String>,
    pub set_id: Option<String>,
    pub set_name: Option<String>,
    pub card_market_value: Option<f64>,
    pub binder_name: Option<String>,
    pub page_number: Option<u32>,
    pub slot_number: Option<u32>,
}

impl MergedRow {
    fn join(item: &InventoryItem, entry: Option<&CatalogEntry>) -> Self {
        let Some(entry) = entry else {
            return Self {
                card_id: item.card_id.clone(),
                card_name: item.card_name.clone(),
                set_id: item.set_id.clone(),
                binder_name: item.binder_name.clone(),
                page_number: item.page_number,
                slot_number: item.slot_number,
                ..Default::default()
            };
        };

        Self {
            card_id: item.card_id.clone(),
            card_name: prefer_catalog(entry.card_name.clone(), item.card_name.clone()),
            set_id: prefer_catalog(entry.set_id.clone(), item.set_id.clone()),
            set_name: entry.set_name.clone(),
            card_market_value: entry.market_value,
            binder_name: item.binder_name.clone(),
            page_number: item.page_number,
            slot_number: item.slot_number,
        }
    }
}

/// Result of a merge: one row per inventory row, in inventory order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTable {
    pub rows: Vec<MergedRow>,
    /// Columns the inventory side provided
    pub inventory_columns: InventoryColumns,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Names of the merged columns that carry data, in projection order
    pub fn column_names(&self) -> Vec<&'static str> {
        let inv = &self.inventory_columns;
        [
            ("card_name", true),
            ("card_id", inv.has_card_id()),
            ("set_id", true),
            ("set_name", true),
            ("binder_name", inv.binder_name),
            ("page_number", inv.page_number),
            ("slot_number", inv.slot_number),
            ("card_market_value", true),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

/// Left outer join of `inventory` over `catalog` on card id
pub fn merge_inventory(inventory: &InventoryTable, catalog: &Catalog) -> MergedTable {
    let mut matched = 0;
    let rows: Vec<MergedRow> = inventory
        .items
        .iter()
        .map(|item| {
            let entry = item.card_id.as_deref().and_then(|id| catalog.get(id));
            if entry.is_some() {
                matched += 1;
            } else {
                log::debug!(
                    "No catalog card for inventory id {}",
                    item.card_id.as_deref().unwrap_or("<none>")
                );
            }
            MergedRow::join(item, entry)
        })
        .collect();

    let table = MergedTable {
        rows,
        inventory_columns: inventory.columns,
    };

    log::info!(
        "Merged {} inventory rows ({} matched, {} unmatched), columns: {:?}",
        table.len(),
        matched,
        table.len() - matched,
        table.column_names()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::make_test_entry;
    use crate::inventory::make_test_item;

    fn test_catalog() -> Catalog {
        Catalog::from_entries(vec![
            make_test_entry("DS2002-001", "Test Card", Some(12.5)),
            make_test_entry("base1-4", "Charizard", None),
        ])
        .unwrap()
    }

    #[test]
    fn prefer_catalog_policy() {
        assert_eq!(prefer_catalog(Some("catalog"), Some("inventory")), Some("catalog"));
        assert_eq!(prefer_catalog(None, Some("inventory")), Some("inventory"));
        assert_eq!(prefer_catalog(Some("catalog"), None), Some("catalog"));
        assert_eq!(prefer_catalog::<&str>(None, None), None);
    }

    #[test]
    fn matched_row_takes_catalog_values() {
        let inventory = InventoryTable::new(
            vec![make_test_item("DS2002", "001", "A", 1, 2).with_card_name("Old Name")],
            InventoryColumns::all(),
        );

        let merged = merge_inventory(&inventory, &test_catalog());
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.rows[0],
            MergedRow {
                card_id: Some("DS2002-001".to_string()),
                card_name: Some("Test Card".to_string()),
                set_id: Some("DS2002".to_string()),
                set_name: Some("Test Set".to_string()),
                card_market_value: Some(12.5),
                binder_name: Some("A".to_string()),
                page_number: Some(1),
                slot_number: Some(2),
            }
        );
    }

    #[test]
    fn catalog_without_name_falls_back_to_inventory() {
        let mut entry = make_test_entry("base1-4", "ignored", Some(1.0));
        entry.card_name = None;
        let catalog = Catalog::from_entries(vec![entry]).unwrap();
        let inventory = InventoryTable::new(
            vec![make_test_item("base1", "4", "A", 1, 1).with_card_name("Charizard")],
            InventoryColumns::all(),
        );

        let merged = merge_inventory(&inventory, &catalog);
        assert_eq!(merged.rows[0].card_name.as_deref(), Some("Charizard"));
    }

    #[test]
    fn unmatched_row_keeps_inventory_values() {
        let inventory = InventoryTable::new(
            vec![make_test_item("sv1", "99", "B", 3, 4).with_card_name("Mystery")],
            InventoryColumns::all(),
        );

        let merged = merge_inventory(&inventory, &test_catalog());
        let row = &merged.rows[0];
        assert_eq!(row.card_id.as_deref(), Some("sv1-99"));
        assert_eq!(row.card_name.as_deref(), Some("Mystery"));
        assert_eq!(row.set_id.as_deref(), Some("sv1"));
        assert_eq!(row.set_name, None);
        assert_eq!(row.card_market_value, None);
        assert_eq!(row.binder_name.as_deref(), Some("B"));
    }

    #[test]
    fn row_without_card_id_never_matches() {
        let item = InventoryItem::new(None, Some("001".to_string()), None, None, None);
        let inventory = InventoryTable::new(vec![item], InventoryColumns::all());

        let merged = merge_inventory(&inventory, &test_catalog());
        assert_eq!(merged.rows[0].card_id, None);
        assert_eq!(merged.rows[0].card_market_value, None);
    }

    #[test]
    fn preserves_inventory_order() {
        let inventory = InventoryTable::new(
            vec![
                make_test_item("base1", "4", "A", 1, 1),
                make_test_item("zzz", "1", "A", 1, 2),
                make_test_item("DS2002", "001", "A", 1, 3),
            ],
            InventoryColumns::all(),
        );

        let merged = merge_inventory(&inventory, &test_catalog());
        let slots: Vec<_> = merged.rows.iter().map(|r| r.slot_number).collect();
        assert_eq!(slots, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let inventory = InventoryTable::new(
            vec![
                make_test_item("DS2002", "001", "A", 1, 2),
                make_test_item("sv1", "99", "B", 3, 4),
            ],
            InventoryColumns::all(),
        );
        let catalog = test_catalog();

        assert_eq!(
            merge_inventory(&inventory, &catalog),
            merge_inventory(&inventory, &catalog)
        );
    }

    #[test]
    fn empty_inventory_merges_to_empty_table() {
        let merged = merge_inventory(&InventoryTable::default(), &test_catalog());
        assert!(merged.is_empty());
    }

    #[test]
    fn column_names_follow_inventory_columns() {
        let table = MergedTable {
            rows: Vec::new(),
            inventory_columns: InventoryColumns {
                binder_name: true,
                ..Default::default()
            },
        };
        assert_eq!(
            table.column_names(),
            vec!["card_name", "set_id", "set_name", "binder_name", "card_market_value"]
        );
    }
}
