//! Reading the VIP membership export
//!
//! The parking system exports memberships as a spreadsheet whose header row
//! is preceded by zero to two title rows. The export is read from the
//! workbook itself (`.xls`/`.xlsx`) or from a UTF-8 CSV save of it. The
//! header row is located by looking for the plate column, and the
//! well-known columns are resolved by substring so that annotated names
//! such as `车牌号（必填）` still match.

use crate::error::{Error, Result};
use crate::plate::{is_valid_plate, normalize_cell};
use crate::record::{FieldIndex, VipRecord};
use std::path::Path;
use tracing::{debug, info, warn};

pub mod workbook;

/// Rows tried, in order, as the header row
const HEADER_CANDIDATES: usize = 3;
const PLATE_HINT: &str = "车牌";

/// Resolved positions of the columns the reports use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub plate: usize,
    pub fields: FieldIndex,
}

impl ColumnMap {
    /// Locate columns in a header row
    pub fn locate(header: &[String]) -> Result<Self> {
        let find = |needle: &str| header.iter().position(|col| col.contains(needle));

        let plate = find("车牌号").ok_or_else(|| {
            Error::MissingColumn(format!(
                "no column containing '车牌号' (available: {})",
                header.join(", ")
            ))
        })?;

        let fields = FieldIndex {
            vip_type: find("VIP别称").or_else(|| find("VIP类型")),
            status: find("VIP状态"),
            start_time: find("有效期开始"),
            end_time: find("有效期结束"),
            owner: find("车主姓名"),
            phone: find("手机号"),
        };

        if fields.status.is_none() {
            warn!("Export has no VIP status column; status-based reports will be empty");
        }

        Ok(Self { plate, fields })
    }
}

/// Records of an export split by plate validity
#[derive(Debug, Clone, Default)]
pub struct ExportRecords {
    pub records: Vec<VipRecord>,
    /// Non-empty plate cells that failed validation, in row order
    pub invalid_plates: Vec<String>,
}

/// A parsed export: header, data rows and resolved columns
#[derive(Debug, Clone)]
pub struct ExportTable {
    pub header_row: usize,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub columns: ColumnMap,
}

impl ExportTable {
    /// Read an export from a workbook or a CSV file
    pub async fn read(path: &Path) -> Result<Self> {
        info!("Reading export: {}", path.display());
        let table = if workbook::is_workbook(path) {
            let owned = path.to_path_buf();
            let rows = tokio::task::spawn_blocking(move || workbook::read_rows(&owned))
                .await
                .map_err(std::io::Error::other)??;
            Self::from_rows(rows)
        } else {
            let bytes = tokio::fs::read(path).await?;
            let content = String::from_utf8(bytes).map_err(|_| Error::NotUtf8 {
                path: path.to_path_buf(),
            })?;
            Self::parse(&content)
        };

        table.map_err(|e| match e {
            Error::HeaderNotFound { .. } => Error::HeaderNotFound {
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Parse export CSV text
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut raw_rows = Vec::new();
        for row in reader.records() {
            let row = row?;
            raw_rows.push(row.iter().map(|cell| cell.trim().to_string()).collect::<Vec<_>>());
        }
        Self::from_rows(raw_rows)
    }

    /// Build a table from raw sheet rows, title rows included
    pub fn from_rows(raw_rows: Vec<Vec<String>>) -> Result<Self> {
        let header_row = (0..HEADER_CANDIDATES.min(raw_rows.len()))
            .find(|&i| {
                debug!("Trying header row {}: {:?}", i, raw_rows[i]);
                raw_rows[i].iter().any(|cell| cell.contains(PLATE_HINT))
            })
            .ok_or_else(|| Error::HeaderNotFound {
                path: Path::new("<input>").to_path_buf(),
            })?;
        info!("Using header row {}", header_row);

        let header = raw_rows[header_row].clone();
        let columns = ColumnMap::locate(&header)?;
        let rows: Vec<Vec<String>> = raw_rows
            .into_iter()
            .skip(header_row + 1)
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();

        debug!("Export has {} data rows", rows.len());
        Ok(Self {
            header_row,
            header,
            rows,
            columns,
        })
    }

    /// Number of non-blank data rows
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Build records for every row with a valid plate
    pub fn records(&self) -> ExportRecords {
        let mut out = ExportRecords::default();

        for row in &self.rows {
            let Some(plate) = row.get(self.columns.plate).and_then(|c| normalize_cell(c)) else {
                continue;
            };
            if !is_valid_plate(&plate) {
                out.invalid_plates.push(plate);
                continue;
            }

            let fields = self
                .header
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let value = row.get(i).and_then(|c| normalize_cell(c));
                    (column.clone(), value)
                })
                .collect();

            out.records.push(VipRecord {
                plate,
                fields,
                index: self.columns.fields.clone(),
            });
        }

        if !out.invalid_plates.is_empty() {
            warn!(
                "Skipped {} rows with invalid plate numbers",
                out.invalid_plates.len()
            );
        }
        out
    }
}
