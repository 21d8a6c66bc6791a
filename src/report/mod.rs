//! Text report building and writing
//!
//! Reports are plain UTF-8 text framed by `=` banners and `-` plate
//! headers. Plate headers must stay parseable by [`crate::sections`],
//! since later steps read earlier reports back in.

pub mod derived;
pub mod export;
pub mod status;

use crate::error::Result;
use crate::sections::SectionKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Rule width for export and derived reports
pub const NARROW: usize = 100;
/// Rule width for status analysis reports
pub const WIDE: usize = 120;

/// Line-oriented text builder
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    width: usize,
    lines: Vec<String>,
}

impl ReportBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    pub fn rule(&mut self, ch: char) -> &mut Self {
        let rule = ch.to_string().repeat(self.width);
        self.line(rule)
    }

    /// Title between two `=` rules
    pub fn banner(&mut self, title: &str) -> &mut Self {
        self.rule('=').line(title).rule('=')
    }

    /// Plate header between two `-` rules
    pub fn plate_header(&mut self, plate: &str, label: &str) -> &mut Self {
        self.rule('-')
            .line(format!("车牌号: {plate} ({label})"))
            .rule('-')
    }

    /// Plate header whose label is recognised by `kind`
    pub fn section_header(&mut self, plate: &str, kind: SectionKind, count: usize) -> &mut Self {
        self.plate_header(plate, &kind.label(count))
    }

    /// Lines joined with `\n`, ending with a newline
    pub fn finish(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Lines joined with `\n`, without a trailing newline
    pub fn finish_joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Writes named report files into an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `content` to `name`, creating the output directory first
    pub async fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(name);
        tokio::fs::write(&path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        info!("Report saved: {}", path.display());
        Ok(path)
    }

    /// Remove a report left by an earlier run that this run has nothing for
    pub async fn remove_stale(&self, name: &str) -> Result<bool> {
        let path = self.output_dir.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                warn!("Removed stale report {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
