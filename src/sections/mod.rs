//! Re-parsing generated plate reports
//!
//! Derived reports are built from earlier reports rather than from the
//! export. Every plate section in those files starts with a three-line
//! header:
//!
//! ```text
//! ----------------------------------------------------------------------------------------------------
//! 车牌号: 黑E2080U (共2条记录)
//! ----------------------------------------------------------------------------------------------------
//! ```
//!
//! The parenthesised label differs per report kind. A section body runs
//! until the next header, the `=` rule that introduces a trailing plate
//! list, or the end of the file.

mod record_line;

pub use record_line::RecordLine;

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Minimum length of the rules framing a section header
pub const MIN_RULE_LEN: usize = 100;

static BLOCK_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^={100,}[ \t]*$").expect("Invalid regex pattern"));

/// The report a section header came from, identified by its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `duplicate_plates.txt`: `(共2条记录)`
    DuplicateRecords,
    /// `multiple_active_records_detailed.txt`: `(生效中记录: 2条)`
    MultipleActive,
    /// `valid_refunded_no_active_records.txt`: `(有效期内的退款记录: 1条)`
    ValidRefunds,
    /// `non_temporary_visitor_records.txt`: `(非临时来访记录: 1条)`
    NonTemporaryVisitor,
    /// `non_disabled_vip_records.txt`: `(非'停用'记录: 1条)`
    NonDisabled,
}

impl SectionKind {
    /// Regex fragment matching the label inside the parentheses
    fn label_pattern(self) -> &'static str {
        match self {
            Self::DuplicateRecords => r"共\d+条记录",
            Self::MultipleActive => r"生效中记录: \d+条",
            Self::ValidRefunds => r"有效期内的退款记录: \d+条",
            Self::NonTemporaryVisitor => r"非临时来访记录: \d+条",
            Self::NonDisabled => r"非'停用'记录: \d+条",
        }
    }

    /// Label text for a section holding `count` records
    pub fn label(self, count: usize) -> String {
        match self {
            Self::DuplicateRecords => format!("共{count}条记录"),
            Self::MultipleActive => format!("生效中记录: {count}条"),
            Self::ValidRefunds => format!("有效期内的退款记录: {count}条"),
            Self::NonTemporaryVisitor => format!("非临时来访记录: {count}条"),
            Self::NonDisabled => format!("非'停用'记录: {count}条"),
        }
    }

    fn header_regex(self) -> Regex {
        let pattern = format!(
            r"(?m)^-{{{min},}}[ \t]*\n车牌号: (.+?) \({label}\)[ \t]*\n-{{{min},}}[ \t]*$",
            min = MIN_RULE_LEN,
            label = self.label_pattern()
        );
        Regex::new(&pattern).expect("section header pattern is valid")
    }
}

/// One plate section of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub plate: String,
    pub body: String,
}

impl Section {
    /// Non-empty body lines, parsed
    pub fn records(&self) -> Vec<RecordLine> {
        self.body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecordLine::parse)
            .collect()
    }
}

/// Split report text into plate sections, in file order
pub fn parse_sections(content: &str, kind: SectionKind) -> Vec<Section> {
    let content = content.replace("\r\n", "\n");
    let header = kind.header_regex();

    let headers: Vec<_> = header
        .captures_iter(&content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let plate = caps.get(1)?.as_str().trim().to_string();
            Some((plate, whole.start(), whole.end()))
        })
        .collect();

    let mut sections = Vec::with_capacity(headers.len());
    for (i, (plate, _, body_start)) in headers.iter().enumerate() {
        let next_header = headers
            .get(i + 1)
            .map(|(_, start, _)| *start)
            .unwrap_or(content.len());
        let mut body = &content[*body_start..next_header];
        if let Some(end) = BLOCK_END_REGEX.find(body) {
            body = &body[..end.start()];
        }

        sections.push(Section {
            plate: plate.clone(),
            body: body.to_string(),
        });
    }

    debug!("Parsed {} {:?} sections", sections.len(), kind);
    sections
}

/// Read a report file and split it into plate sections
pub async fn read_sections(path: &Path, kind: SectionKind) -> Result<Vec<Section>> {
    let content = tokio::fs::read_to_string(path).await?;
    let sections = parse_sections(&content, kind);
    if sections.is_empty() {
        warn!("No {:?} sections found in {}", kind, path.display());
    }
    Ok(sections)
}
