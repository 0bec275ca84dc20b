//! Card catalog loading and lookup
//!
//! Catalog files are JSON documents shaped like the Pokemon TCG API card
//! listing: a top-level `data` array of cards, each with nested `set` and
//! `tcgplayer.prices` objects.

use crate::error::{PortfolioError, Result};
use crate::io::list_files_with_extension;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File extension of catalog documents
pub const CATALOG_EXTENSION: &str = "json";

/// One card from the catalog, flattened
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub card_id: String,
    pub card_name: Option<String>,
    pub set_id: Option<String>,
    pub set_name: Option<String>,
    pub market_value: Option<f64>,
}

/// Catalog file structure
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    data: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    id: Option<String>,
    name: Option<String>,
    set: Option<RawSet>,
    tcgplayer: Option<RawTcgplayer>,
}

#[derive(Debug, Deserialize)]
struct RawSet {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTcgplayer {
    /// Variant name -> price object; kept loose because some exports send `null` or `[]`
    #[serde(default)]
    prices: Value,
}

/// Chooses which tcgplayer price variant supplies a card's market value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceVariantPolicy {
    preferred: Option<String>,
}

impl PriceVariantPolicy {
    /// Always use the lexicographically first variant
    pub fn first_variant() -> Self {
        Self { preferred: None }
    }

    /// Use `variant` when a card has it, otherwise the first variant
    pub fn preferring(variant: impl Into<String>) -> Self {
        Self {
            preferred: Some(variant.into()),
        }
    }

    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    /// Market value of the selected variant; `None` if there are no variants
    /// or the selected one has no numeric `market`.
    pub fn market_value(&self, prices: &Value) -> Option<f64> {
        let variants = prices.as_object()?;

        let variant = self
            .preferred
            .as_deref()
            .and_then(|name| variants.get(name))
            .or_else(|| {
                variants
                    .iter()
                    .min_by(|a, b| a.0.cmp(b.0))
                    .map(|(_, v)| v)
            })?;

        variant.get("market").and_then(Value::as_f64)
    }
}

/// Parse one catalog document into flattened entries.
///
/// Cards without an `id` cannot be joined and are dropped.
pub fn parse_catalog_document(
    json: &str,
    policy: &PriceVariantPolicy,
) -> serde_json::Result<Vec<CatalogEntry>> {
    let file: CatalogFile = serde_json::from_str(json)?;

    let mut entries = Vec::with_capacity(file.data.len());
    for card in file.data {
        let Some(card_id) = card.id else {
            log::warn!(
                "Skipping catalog card without id (name: {})",
                card.name.as_deref().unwrap_or("<unknown>")
            );
            continue;
        };

        let (set_id, set_name) = match card.set {
            Some(set) => (set.id, set.name),
            None => (None, None),
        };
        let market_value = card
            .tcgplayer
            .as_ref()
            .and_then(|tcg| policy.market_value(&tcg.prices));

        entries.push(CatalogEntry {
            card_id,
            card_name: card.name,
            set_id,
            set_name,
            market_value,
        });
    }

    Ok(entries)
}

/// Load every catalog document in `dir`, in file name order
pub fn load_catalog_entries<P: AsRef<Path>>(
    dir: P,
    policy: &PriceVariantPolicy,
) -> Result<Vec<CatalogEntry>> {
    let dir = dir.as_ref();
    let files = list_files_with_extension(dir, CATALOG_EXTENSION)?;
    if files.is_empty() {
        log::warn!("No catalog files found in {}", dir.display());
    }

    let mut entries = Vec::new();
    for path in files {
        log::debug!("Reading catalog file {}", path.display());
        let json = fs::read_to_string(&path).map_err(|e| PortfolioError::io(&path, e))?;
        let parsed = parse_catalog_document(&json, policy).map_err(|source| {
            PortfolioError::Json {
                path: path.clone(),
                source,
            }
        })?;
        log::debug!("{} cards in {}", parsed.len(), path.display());
        entries.extend(parsed);
    }

    Ok(entries)
}

/// Catalog lookup by card id
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build the lookup, rejecting duplicate card ids so every inventory
    /// row matches at most one catalog card.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.card_id.clone(), idx).is_some() {
                return Err(PortfolioError::DuplicateCatalogId {
                    id: entry.card_id.clone(),
                });
            }
        }
        Ok(Self { entries, by_id })
    }

    /// Load and index all catalog documents in `dir`
    pub fn load<P: AsRef<Path>>(dir: P, policy: &PriceVariantPolicy) -> Result<Self> {
        let catalog = Self::from_entries(load_catalog_entries(dir.as_ref(), policy)?)?;
        log::info!(
            "Loaded catalog with {} cards from {}",
            catalog.len(),
            dir.as_ref().display()
        );
        Ok(catalog)
    }

    /// Look up a card by its id (e.g. "base1-4")
    pub fn get(&self, card_id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(card_id).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in load order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
pub use tests::make_test_entry;

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
