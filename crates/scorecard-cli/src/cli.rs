//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scorecard::DEFAULT_GROUP_FRACTION;

/// Scorecard: exam score statistics and item analysis
#[derive(Parser)]
#[command(name = "scorecard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a score sheet and print statistics and item indices
    Analyze {
        /// Path to the score sheet (Excel workbook or CSV/TSV, first row is the header)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the score histogram to this PNG path
        #[arg(long, value_name = "PNG")]
        histogram: Option<PathBuf>,

        /// Share of examinees in each of the high and low groups
        #[arg(long, default_value_t = DEFAULT_GROUP_FRACTION)]
        group_fraction: f64,
    },

    /// Open the local web UI for uploading score sheets
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Seconds without a browser heartbeat before the server exits (0 = never)
        #[arg(long, default_value = "5")]
        idle_timeout: u64,

        /// Share of examinees in each of the high and low groups
        #[arg(long, default_value_t = DEFAULT_GROUP_FRACTION)]
        group_fraction: f64,
    },
}
