//! Card Portfolio - binder inventory valuation
//!
//! Merges binder inventory CSV exports with catalog JSON price data into a
//! portfolio CSV, and summarizes a portfolio's total value.

pub mod catalog;
pub mod config;
pub mod error;
pub mod formatters;
pub mod inventory;
pub mod io;
pub mod merge;
pub mod pipeline;
pub mod portfolio;
pub mod summary;

pub use catalog::{Catalog, CatalogEntry, PriceVariantPolicy};
pub use config::{PipelinePaths, RunMode};
pub use error::{PortfolioError, Result};
pub use inventory::{load_inventory, InventoryItem, InventoryTable};
pub use merge::{merge_inventory, MergedTable};
pub use pipeline::{run_pipeline, update_portfolio, PipelineRun};
pub use portfolio::{write_portfolio, PortfolioRecord, WriteOutcome};
pub use summary::{generate_summary, PortfolioSummary, SummaryOutcome};
