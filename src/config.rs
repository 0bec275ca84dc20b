//! Run modes and default file locations

use std::path::PathBuf;

/// Which set of default paths to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RunMode {
    /// card_inventory/, card_set_lookup/, card_portfolio.csv
    #[default]
    Production,
    /// card_inventory_test/, card_set_lookup_test/, test_card_portfolio.csv
    Test,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Production => "PRODUCTION",
            RunMode::Test => "TEST",
        }
    }
}

/// Input directories and the portfolio file shared by the update and summary steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub inventory_dir: PathBuf,
    pub lookup_dir: PathBuf,
    pub portfolio: PathBuf,
}

impl PipelinePaths {
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Production => Self {
                inventory_dir: PathBuf::from("card_inventory"),
                lookup_dir: PathBuf::from("card_set_lookup"),
                portfolio: PathBuf::from("card_portfolio.csv"),
            },
            RunMode::Test => Self {
                inventory_dir: PathBuf::from("card_inventory_test"),
                lookup_dir: PathBuf::from("card_set_lookup_test"),
                portfolio: PathBuf::from("test_card_portfolio.csv"),
            },
        }
    }

    /// Replace any path given explicitly on the command line
    pub fn with_overrides(
        mut self,
        inventory_dir: Option<PathBuf>,
        lookup_dir: Option<PathBuf>,
        portfolio: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = inventory_dir {
            self.inventory_dir = dir;
        }
        if let Some(dir) = lookup_dir {
            self.lookup_dir = dir;
        }
        if let Some(file) = portfolio {
            self.portfolio = file;
        }
        self
    }
}
