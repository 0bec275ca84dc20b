//! Update and full pipeline runs

use crate::catalog::{Catalog, PriceVariantPolicy};
use crate::config::PipelinePaths;
use crate::error::Result;
use crate::inventory::load_inventory;
use crate::merge::merge_inventory;
use crate::portfolio::{write_portfolio, WriteOutcome};
use crate::summary::{generate_summary, SummaryOutcome};
use std::path::Path;

/// Load catalog and inventory, merge them and write the portfolio CSV
pub fn update_portfolio(
    inventory_dir: &Path,
    lookup_dir: &Path,
    output: &Path,
    policy: &PriceVariantPolicy,
) -> Result<WriteOutcome> {
    let catalog = Catalog::load(lookup_dir, policy)?;
    let inventory = load_inventory(inventory_dir)?;
    let merged = merge_inventory(&inventory, &catalog);
    write_portfolio(&merged, output)
}

/// Result of a full pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub write: WriteOutcome,
    pub summary: SummaryOutcome,
}

/// Update then summarize.
///
/// When the update writes nothing the summary is not read from disk, so an
/// older portfolio file is never reported as current.
pub fn run_pipeline(paths: &PipelinePaths, policy: &PriceVariantPolicy) -> Result<PipelineRun> {
    log::info!("Running update step");
    let write = update_portfolio(
        &paths.inventory_dir,
        &paths.lookup_dir,
        &paths.portfolio,
        policy,
    )?;

    let summary = match write {
        WriteOutcome::Skipped => {
            log::warn!("Update wrote no portfolio, skipping report");
            SummaryOutcome::NoData
        }
        WriteOutcome::Written { .. } => {
            log::info!("Running reporting step");
            generate_summary(&paths.portfolio)?
        }
    };

    Ok(PipelineRun { write, summary })
}
