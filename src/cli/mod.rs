//! Command-line parsing for the price tracker.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! command dispatch (`app`) and from the extraction/analysis code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::DEFAULT_DATA_FILE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tracker", version, about = "Track product prices scraped from shop pages")]
pub struct Cli {
    /// JSON file holding tracked products and their price history.
    #[arg(long, global = true, env = "PRICE_TRACKER_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Disable coloured output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start tracking a product and record its current price.
    Add {
        /// Product page URL.
        url: String,
        /// Unique display name.
        name: String,
    },
    /// Fetch the current price of every tracked product.
    Check,
    /// List tracked products with their latest price and trend.
    List,
    /// Show the price history of one product.
    History(HistoryArgs),
    /// Show statistics for one product, or for all of them.
    Stats {
        /// Product name (all products when omitted).
        name: Option<String>,
        /// Print JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Report products whose latest price dropped by at least the threshold.
    Alert {
        /// Minimum drop, in percent.
        #[arg(long = "drop", value_name = "PCT", allow_negative_numbers = true)]
        drop_pct: f64,
    },
}

#[derive(Debug, Parser, Clone)]
pub struct HistoryArgs {
    /// Product name.
    pub name: String,

    /// Render an ASCII chart below the table.
    #[arg(long)]
    pub plot: bool,

    /// Chart width (characters).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the annotated history to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}
