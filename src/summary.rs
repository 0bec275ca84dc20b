//! Portfolio summary report
//!
//! Reads a portfolio CSV and reports the total market value and the most
//! valuable card. Stages run in order and each either continues or stops:
//! file check, parse, empty check, schema check, value coercion, value check,
//! then computation.

use crate::error::{PortfolioError, Result};
use crate::formatters::format_currency;
use crate::io::{check_record_width, path_exists};
use csv::StringRecord;
use std::fmt;
use std::path::{Path, PathBuf};

/// Columns the report cannot work without
pub const REQUIRED_COLUMNS: [&str; 3] = ["card_id", "card_name", "card_market_value"];

/// Raw rows of a portfolio file
#[derive(Debug, Clone)]
pub struct PortfolioSheet {
    pub path: PathBuf,
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl PortfolioSheet {
    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Card holding the highest market value
#[derive(Debug, Clone, PartialEq)]
pub struct TopCard {
    pub card_id: String,
    pub card_name: String,
    pub market_value: f64,
}

/// Totals computed from a portfolio
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub top_card: TopCard,
    /// Rows with a usable market value
    pub valued_rows: usize,
    /// Rows whose market value was missing or not numeric
    pub skipped_rows: usize,
}

impl fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Portfolio Value: {}", format_currency(self.total_value))?;
        write!(
            f,
            "Most Valuable Card: {} (ID: {}) - Value: {}",
            self.top_card.card_name,
            self.top_card.card_id,
            format_currency(self.top_card.market_value)
        )
    }
}

/// How a summary run ended. Only `Report` carries numbers; the other two are
/// successful early exits.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    NoData,
    NoValidValues,
    Report(PortfolioSummary),
}

impl SummaryOutcome {
    /// Text shown to the user for this outcome
    pub fn render(&self, path: &Path) -> String {
        match self {
            SummaryOutcome::NoData => format!("No data found in {}.", path.display()),
            SummaryOutcome::NoValidValues => {
                format!("No valid market values found in {}.", path.display())
            }
            SummaryOutcome::Report(summary) => summary.to_string(),
        }
    }
}

/// Numeric market value, or `None` for blanks, text, NaN and infinities
pub fn coerce_market_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// File check and parse stages
pub fn read_portfolio_sheet<P: AsRef<Path>>(path: P) -> Result<PortfolioSheet> {
    let path = path.as_ref();
    if !path_exists(path) {
        return Err(PortfolioError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PortfolioError::csv(path, e))?;
    let headers = rdr.headers().map_err(|e| PortfolioError::csv(path, e))?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| PortfolioError::csv(path, e))?;
        check_record_width(path, &headers, &record)?;
        rows.push(record);
    }

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(PortfolioSheet {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Schema check: positions of `REQUIRED_COLUMNS`, in that order
fn locate_required_columns(sheet: &PortfolioSheet) -> Result<[usize; 3]> {
    let mut found = [0; 3];
    let mut missing = Vec::new();
    for (slot, name) in found.iter_mut().zip(REQUIRED_COLUMNS) {
        match sheet.column(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(found)
    } else {
        missing.sort();
        Err(PortfolioError::MissingColumns {
            path: sheet.path.clone(),
            columns: missing,
        })
    }
}

/// Empty check through computation
pub fn summarize_sheet(sheet: &PortfolioSheet) -> Result<SummaryOutcome> {
    if sheet.rows.is_empty() {
        return Ok(SummaryOutcome::NoData);
    }

    let [id_col, name_col, value_col] = locate_required_columns(sheet)?;

    let values: Vec<Option<f64>> = sheet
        .rows
        .iter()
        .map(|row| row.get(value_col).and_then(coerce_market_value))
        .collect();

    let valued_rows = values.iter().filter(|v| v.is_some()).count();
    let skipped_rows = values.len() - valued_rows;
    if skipped_rows > 0 {
        log::warn!(
            "{} rows in {} have no numeric market value",
            skipped_rows,
            sheet.path.display()
        );
    }
    if valued_rows == 0 {
        return Ok(SummaryOutcome::NoValidValues);
    }

    let mut total_value = 0.0;
    let mut top: Option<(usize, f64)> = None;
    for (idx, value) in values.iter().enumerate() {
        let Some(value) = *value else { continue };
        total_value += value;
        // Strictly greater keeps the first of equal values
        if top.map_or(true, |(_, best)| value > best) {
            top = Some((idx, value));
        }
    }

    let Some((top_idx, market_value)) = top else {
        return Ok(SummaryOutcome::NoValidValues);
    };
    let top_row = &sheet.rows[top_idx];
    let top_card = TopCard {
        card_id: top_row.get(id_col).unwrap_or_default().to_string(),
        card_name: top_row.get(name_col).unwrap_or_default().to_string(),
        market_value,
    };

    Ok(SummaryOutcome::Report(PortfolioSummary {
        total_value,
        top_card,
        valued_rows,
        skipped_rows,
    }))
}

/// Run every stage of the summary on the file at `path`
pub fn generate_summary<P: AsRef<Path>>(path: P) -> Result<SummaryOutcome> {
    let sheet = read_portfolio_sheet(path)?;
    summarize_sheet(&sheet)
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
