//! Card Portfolio CLI
//!
//! `update` builds the portfolio CSV, `summary` reports on it, and `pipeline`
//! runs both in sequence.

use card_portfolio::{
    generate_summary, run_pipeline, update_portfolio, PipelinePaths, PriceVariantPolicy,
    Result, RunMode, SummaryOutcome, WriteOutcome,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Binder inventory valuation - merges inventory with catalog prices and reports totals
#[derive(Parser, Debug)]
#[command(name = "card_portfolio")]
#[command(version, about, long_about = None)]
struct Args {
    /// Default path set to use
    #[arg(long, value_enum, default_value_t = RunMode::Production, global = true)]
    mode: RunMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge inventory CSVs with catalog JSON and write the portfolio CSV
    Update {
        #[command(flatten)]
        inputs: InputArgs,

        /// Portfolio CSV to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print total value and most valuable card of a portfolio CSV
    Summary {
        /// Portfolio CSV to read
        #[arg(short, long)]
        portfolio: Option<PathBuf>,
    },
    /// Run update, then summary
    Pipeline {
        #[command(flatten)]
        inputs: InputArgs,

        /// Portfolio CSV to write and report on
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Directory of inventory CSV files
    #[arg(long)]
    inventory_dir: Option<PathBuf>,

    /// Directory of catalog JSON files
    #[arg(long)]
    lookup_dir: Option<PathBuf>,

    /// Preferred tcgplayer price variant, e.g. "holofoil"
    #[arg(long)]
    price_variant: Option<String>,
}

impl InputArgs {
    fn policy(&self) -> PriceVariantPolicy {
        let policy = match &self.price_variant {
            Some(variant) => PriceVariantPolicy::preferring(variant.clone()),
            None => PriceVariantPolicy::first_variant(),
        };
        log::info!(
            "Price variant: {}",
            policy.preferred().unwrap_or("first available")
        );
        policy
    }
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=card_portfolio=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Running card_portfolio in {} mode", args.mode.as_str());

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let defaults = PipelinePaths::for_mode(args.mode);

    match args.command {
        Command::Update { inputs, output } => {
            let paths = defaults.with_overrides(
                inputs.inventory_dir.clone(),
                inputs.lookup_dir.clone(),
                output,
            );
            let outcome = update_portfolio(
                &paths.inventory_dir,
                &paths.lookup_dir,
                &paths.portfolio,
                &inputs.policy(),
            )?;
            log_write_outcome(&outcome, &paths);
        }
        Command::Summary { portfolio } => {
            let paths = defaults.with_overrides(None, None, portfolio);
            let outcome = generate_summary(&paths.portfolio)?;
            print_summary(&outcome, &paths);
        }
        Command::Pipeline { inputs, output } => {
            let paths = defaults.with_overrides(
                inputs.inventory_dir.clone(),
                inputs.lookup_dir.clone(),
                output,
            );
            log::info!("--- Starting full pipeline ---");
            let run = run_pipeline(&paths, &inputs.policy())?;
            log_write_outcome(&run.write, &paths);
            print_summary(&run.summary, &paths);
            log::info!("--- Pipeline completed successfully ---");
        }
    }

    Ok(())
}

fn log_write_outcome(outcome: &WriteOutcome, paths: &PipelinePaths) {
    match outcome {
        WriteOutcome::Written { rows, .. } => {
            log::info!("Wrote {} cards to {}", rows, paths.portfolio.display());
        }
        WriteOutcome::Skipped => {
            log::warn!("Nothing written to {}", paths.portfolio.display());
        }
    }
}

fn print_summary(outcome: &SummaryOutcome, paths: &PipelinePaths) {
    println!("{}", outcome.render(&paths.portfolio));
}
