//! Command implementation modules
//!
//! Each audit step is implemented as a separate module. Handlers share a
//! [`CommandContext`] carrying the resolved configuration and report writer.

pub mod analyze_export;
pub mod filter;
pub mod multiple_active;
pub mod refunded_no_active;
pub mod status;

pub use analyze_export::run_analyze_export;
pub use filter::{run_filter_disabled, run_filter_temporary};
pub use multiple_active::run_multiple_active;
pub use refunded_no_active::run_refunded_no_active;
pub use status::run_status;

use crate::config::AuditConfig;
use crate::report::ReportWriter;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Settings resolved once per invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: AuditConfig,
    pub writer: ReportWriter,
    pub json: bool,
}

impl CommandContext {
    pub fn new(config: AuditConfig, output_dir: Option<&PathBuf>, json: bool) -> Self {
        let writer = ReportWriter::new(config.output_dir(output_dir));
        Self {
            config,
            writer,
            json,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.writer.output_dir()
    }

    /// Explicit input, or the named report from a previous step
    pub fn input_or_default(&self, input: Option<PathBuf>, default_name: &str) -> PathBuf {
        input.unwrap_or_else(|| self.output_dir().join(default_name))
    }

    /// Print `summary` as JSON when requested, otherwise run `text`
    pub fn report<T, F>(&self, summary: &T, text: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T),
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(summary)?);
        } else {
            text(summary);
        }
        Ok(())
    }
}

pub(crate) fn print_rule() {
    println!("{}", "=".repeat(crate::report::NARROW));
}
