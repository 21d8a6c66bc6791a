//! CLI argument structures
//!
//! This module defines the command-line interface of vip-audit: the global
//! flags shared by every command and one subcommand per audit step.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Audit parking-lot VIP membership exports
#[derive(Parser)]
#[command(name = "vip-audit")]
#[command(about = "vip-audit - Find duplicate, conflicting and refundable VIP memberships", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory reports are written to (and derived inputs read from)
    #[arg(short = 'o', long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a JSON summary instead of the text summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group an export by plate and write the overview reports
    #[command(name = "analyze-export")]
    AnalyzeExport {
        /// Membership export (.xls/.xlsx workbook or UTF-8 CSV)
        export: PathBuf,
    },

    /// Classify each plate by active, refunded and expired records
    #[command(name = "status")]
    Status {
        /// Membership export (.xls/.xlsx workbook or UTF-8 CSV)
        export: PathBuf,

        /// Reference time for validity checks (defaults to now)
        #[arg(long, value_name = "TIME")]
        now: Option<String>,
    },

    /// List plates holding more than one active record
    #[command(name = "multiple-active")]
    MultipleActive {
        /// Duplicate-plates report (defaults to duplicate_plates.txt in the output directory)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// List plates with an in-period refund but no active record
    #[command(name = "refunded-no-active")]
    RefundedNoActive {
        /// Duplicate-plates report (defaults to duplicate_plates.txt in the output directory)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Date the refund period must cover (defaults to today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<String>,
    },

    /// Drop temporary-visitor records for the target plates
    #[command(name = "filter-temporary")]
    FilterTemporary {
        /// Refunded-no-active report (defaults to valid_refunded_no_active_records.txt)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        targets: TargetArgs,
    },

    /// Drop disabled records for the target plates
    #[command(name = "filter-disabled")]
    FilterDisabled {
        /// Non-temporary-visitor report (defaults to non_temporary_visitor_records.txt)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        targets: TargetArgs,
    },
}

/// Target plate selection shared by the filter commands
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Comma-separated plates to keep
    #[arg(long, value_name = "PLATES")]
    pub plates: Option<String>,

    /// File listing plates separated by commas or newlines
    #[arg(long, value_name = "FILE")]
    pub plates_file: Option<PathBuf>,

    /// Date printed in the report header (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<String>,
}
