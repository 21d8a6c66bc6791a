//! # vip-audit
//!
//! Audits parking-lot VIP membership exports: finds plates with duplicate,
//! conflicting or refundable memberships and writes plain-text reports that
//! later steps can re-read.
//!
//! ## Usage
//!
//! ```bash
//! vip-audit analyze-export export.xls
//! vip-audit status export.csv [--now "2026-01-26 08:56:53"]
//! vip-audit multiple-active
//! vip-audit refunded-no-active [--as-of 2026-01-26]
//! vip-audit filter-temporary [--plates 黑E2080U,黑E3CA62]
//! vip-audit filter-disabled [--plates-file plates.txt]
//! ```
//!
//! ## Modules
//!
//! - `analysis` - Grouping and classification of records and report sections
//! - `cli` - Argument parsing, routing and command handlers
//! - `config` - Configuration file, environment overrides and defaults
//! - `export` - Header detection and row extraction for workbook and CSV exports
//! - `grouping` - Insertion-ordered per-plate groups
//! - `plate` - Plate validation and cell normalization
//! - `record` - Export rows and VIP status
//! - `report` - Text report layouts and the report writer
//! - `sections` - Parser for the per-plate sections of generated reports
//! - `validity` - Date parsing and validity-period checks
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod grouping;
pub mod plate;
pub mod record;
pub mod report;
pub mod sections;
pub mod validity;

pub use error::{Error, Result};
