use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook '{}' has no worksheet", path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("'{}' is not UTF-8 text; save the sheet as \"CSV UTF-8\" or pass the .xls/.xlsx file", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No header row containing a plate column found in '{}'", path.display())]
    HeaderNotFound { path: PathBuf },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
