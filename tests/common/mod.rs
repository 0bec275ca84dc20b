//! Fixture builder: writes sample catalog JSON and inventory CSV files into a
//! temporary directory laid out like a real run.

#![allow(dead_code)]

use card_portfolio::PipelinePaths;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const INVENTORY_HEADER: &str = "binder_name,page_number,slot_number,set_id,card_number,card_name";

pub struct Fixture {
    // Keeps the directory alive for the duration of the test
    pub root: TempDir,
    pub paths: PipelinePaths,
}

#[derive(Default)]
pub struct FixtureBuilder {
    catalog_files: Vec<(String, Vec<Value>)>,
    inventory_files: Vec<(String, String)>,
}

/// A catalog card shaped like the Pokemon TCG API
pub fn catalog_card(id: &str, name: &str, set_id: &str, set_name: &str, market: Option<f64>) -> Value {
    let prices = match market {
        Some(value) => json!({"normal": {"low": value / 2.0, "market": value}}),
        None => json!({}),
    };
    json!({
        "id": id,
        "name": name,
        "set": {"id": set_id, "name": set_name},
        "tcgplayer": {"prices": prices}
    })
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog_file(mut self, name: &str, cards: Vec<Value>) -> Self {
        self.catalog_files.push((name.to_string(), cards));
        self
    }

    /// `rows` are CSV lines without the header
    pub fn inventory_file(self, name: &str, rows: &[&str]) -> Self {
        let mut content = String::from(INVENTORY_HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        self.raw_inventory_file(name, &content)
    }

    pub fn raw_inventory_file(mut self, name: &str, content: &str) -> Self {
        self.inventory_files.push((name.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> Fixture {
        let root = TempDir::new().unwrap();
        let paths = PipelinePaths {
            inventory_dir: root.path().join("card_inventory_test"),
            lookup_dir: root.path().join("card_set_lookup_test"),
            portfolio: root.path().join("test_card_portfolio.csv"),
        };
        fs::create_dir_all(&paths.inventory_dir).unwrap();
        fs::create_dir_all(&paths.lookup_dir).unwrap();

        for (name, cards) in &self.catalog_files {
            let doc = json!({"data": cards, "page": 1, "count": cards.len()});
            write(&paths.lookup_dir.join(name), &serde_json::to_string_pretty(&doc).unwrap());
        }
        for (name, content) in &self.inventory_files {
            write(&paths.inventory_dir.join(name), content);
        }

        Fixture { root, paths }
    }
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// The two-binder sample collection used across tests
pub fn sample_collection() -> FixtureBuilder {
    FixtureBuilder::new()
        .catalog_file(
            "base1.json",
            vec![
                catalog_card("base1-4", "Charizard", "base1", "Base", Some(350.25)),
                catalog_card("base1-58", "Pikachu", "base1", "Base", Some(1.75)),
                catalog_card("base1-2", "Blastoise", "base1", "Base", None),
            ],
        )
        .catalog_file(
            "DS2002.json",
            vec![catalog_card("DS2002-001", "Test Card", "DS2002", "Test Set", Some(12.5))],
        )
        .inventory_file(
            "binder_a.csv",
            &["A,1,1,base1,4,charizard", "A,1,2,DS2002,001,Test Card"],
        )
        .inventory_file(
            "binder_b.csv",
            &["B,1,1,base1,58,Pikachu", "B,1,2,base1,2,", "B,2,1,sv1,99,Promo Card"],
        )
}
