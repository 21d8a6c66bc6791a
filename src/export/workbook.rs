//! Spreadsheet exports read with calamine
//!
//! The first worksheet is flattened into text rows so workbook and CSV
//! exports share the same header detection. Date cells are rendered in the
//! layout the reports print.

use crate::error::{Error, Result};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::path::Path;
use tracing::debug;

const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Extensions opened as workbooks; anything else is read as CSV
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

/// True when the path names a spreadsheet workbook
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Read the first worksheet of a workbook as trimmed text rows
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook.sheet_names().first().cloned();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptyWorkbook {
            path: path.to_path_buf(),
        })??;
    debug!(
        "Worksheet {:?} spans {:?} cells",
        sheet.unwrap_or_default(),
        range.get_size()
    );

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Text of one cell as it would appear in a CSV save of the sheet
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => dt.format(DATETIME_LAYOUT).to_string(),
            None => cell.to_string().trim().to_string(),
        },
        // Phone numbers are stored as numbers; keep them integral
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_workbook_extensions() {
        assert!(is_workbook(Path::new("export.xls")));
        assert!(is_workbook(Path::new("EXPORT.XLSX")));
        assert!(!is_workbook(Path::new("export.csv")));
        assert!(!is_workbook(Path::new("export")));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String(" 黑E2080U ".to_string())), "黑E2080U");
        assert_eq!(cell_text(&Data::Float(13800000001.0)), "13800000001");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }

    #[test]
    fn test_date_cells_use_report_layout() {
        // 2026-12-31 12:00
        let serial = ExcelDateTime::new(46387.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(serial)), "2026-12-31 12:00:00");
        assert_eq!(
            cell_text(&Data::DateTimeIso("2025-01-01T08:00:00".to_string())),
            "2025-01-01 08:00:00"
        );
    }
}
