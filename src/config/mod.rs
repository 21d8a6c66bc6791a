//! Configuration for vip-audit
//!
//! Values are layered with the following precedence (highest first):
//!
//! 1. Command-line flags
//! 2. Environment variables (`VIP_AUDIT_*`)
//! 3. `vip-audit.toml` (explicit `--config`, working directory, or the
//!    platform config directory)
//! 4. Built-in defaults

pub mod loader;

pub use loader::{ConfigLoader, LoadedConfig};

use crate::error::{Error, Result};
use crate::validity::parse_reference_time;
use chrono::{Local, NaiveDateTime};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "vip-audit.toml";
pub const DEFAULT_TEMPORARY_VISITOR_TYPE: &str = "临时来访（化工西门）";
pub const DEFAULT_DISABLED_TYPE: &str = "停用";

/// Get the global vip-audit directory for storing configuration
pub fn get_global_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "vip-audit", "vip-audit")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Directory reports are written to
    pub output_dir: PathBuf,
    /// Reference date for validity checks on derived reports
    pub as_of: Option<String>,
    /// VIP type dropped by `filter-temporary` (substring match)
    pub temporary_visitor_type: String,
    /// VIP type dropped by `filter-disabled` (exact match)
    pub disabled_type: String,
    pub targets: TargetPlates,
}

/// Default plate lists for the filter commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetPlates {
    pub temporary: Vec<String>,
    pub disabled: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            as_of: None,
            temporary_visitor_type: DEFAULT_TEMPORARY_VISITOR_TYPE.to_string(),
            disabled_type: DEFAULT_DISABLED_TYPE.to_string(),
            targets: TargetPlates::default(),
        }
    }
}

impl AuditConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.temporary_visitor_type.trim().is_empty() {
            return Err(Error::Config(
                "temporary_visitor_type must not be empty".to_string(),
            ));
        }
        if self.disabled_type.trim().is_empty() {
            return Err(Error::Config("disabled_type must not be empty".to_string()));
        }
        if let Some(as_of) = &self.as_of {
            parse_reference_time(as_of)?;
        }
        Ok(())
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an environment lookup
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("VIP_AUDIT_OUTPUT_DIR").filter(|d| !d.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(as_of) = lookup("VIP_AUDIT_AS_OF").filter(|d| !d.is_empty()) {
            self.as_of = Some(as_of);
        }
    }

    /// Output directory, a flag value taking precedence
    pub fn output_dir(&self, flag: Option<&PathBuf>) -> PathBuf {
        flag.cloned().unwrap_or_else(|| self.output_dir.clone())
    }

    /// Reference date for derived reports; defaults to the start of today
    pub fn as_of(&self, flag: Option<&str>) -> Result<NaiveDateTime> {
        match flag.or(self.as_of.as_deref()) {
            Some(value) => parse_reference_time(value),
            None => Local::now()
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| Error::InvalidDate("start of today".to_string())),
        }
    }
}

/// Current time unless a flag pins it
pub fn resolve_now(flag: Option<&str>) -> Result<NaiveDateTime> {
    match flag {
        Some(value) => parse_reference_time(value),
        None => Ok(Local::now().naive_local()),
    }
}

#[cfg(test)]
mod tests;
