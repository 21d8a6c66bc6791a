//! Input validation utilities using stillwater for error accumulation
//!
//! Problems are collected before reporting so a user fixing a command line
//! sees every issue at once.

use anyhow::Result;
use std::path::{Path, PathBuf};
use stillwater::Validation;

/// CLI validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum CliValidationError {
    InputFileNotFound(PathBuf),
    InputPathNotFile(PathBuf),
    OutputPathNotDirectory(PathBuf),
    EmptyPlateList,
}

impl std::fmt::Display for CliValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileNotFound(p) => write!(f, "Input file '{}' does not exist", p.display()),
            Self::InputPathNotFile(p) => write!(f, "Path '{}' is not a file", p.display()),
            Self::OutputPathNotDirectory(p) => {
                write!(f, "Output path '{}' is not a directory", p.display())
            }
            Self::EmptyPlateList => write!(f, "No plates given in --plates or --plates-file"),
        }
    }
}

impl std::error::Error for CliValidationError {}

fn validate_input_internal(path: &Path) -> Validation<PathBuf, Vec<CliValidationError>> {
    let mut errors = Vec::new();

    if !path.exists() {
        errors.push(CliValidationError::InputFileNotFound(path.to_path_buf()));
    } else if !path.is_file() {
        errors.push(CliValidationError::InputPathNotFile(path.to_path_buf()));
    }

    if errors.is_empty() {
        Validation::success(path.to_path_buf())
    } else {
        Validation::failure(errors)
    }
}

fn validate_output_internal(dir: &Path) -> Validation<PathBuf, Vec<CliValidationError>> {
    // A missing output directory is created on first write
    if dir.exists() && !dir.is_dir() {
        Validation::failure(vec![CliValidationError::OutputPathNotDirectory(
            dir.to_path_buf(),
        )])
    } else {
        Validation::success(dir.to_path_buf())
    }
}

fn validate_plate_list_internal(plates: &[String]) -> Validation<usize, CliValidationError> {
    if plates.is_empty() {
        Validation::failure(CliValidationError::EmptyPlateList)
    } else {
        Validation::success(plates.len())
    }
}

fn report<T>(validation: Validation<T, Vec<CliValidationError>>) -> Result<()> {
    match validation.into_result() {
        Ok(_) => Ok(()),
        Err(errors) => Err(anyhow::anyhow!(
            "Invalid arguments:\n{}",
            errors
                .iter()
                .map(|e| format!("  - {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        )),
    }
}

/// Validate an input file exists and is a regular file
pub fn validate_input_file(path: &Path) -> Result<()> {
    report(validate_input_internal(path))
}

/// Validate the input file and output directory of a command together
pub fn validate_paths(input: &Path, output_dir: &Path) -> Result<()> {
    report(validate_input_internal(input).and(validate_output_internal(output_dir)))
}

/// Validate that an explicit target plate selection is not empty
pub fn validate_plate_list(plates: &[String]) -> Result<()> {
    match validate_plate_list_internal(plates).into_result() {
        Ok(_) => Ok(()),
        Err(error) => Err(anyhow::anyhow!("{}", error)),
    }
}
