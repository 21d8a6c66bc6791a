//! `multiple-active`: plates in the duplicate report with several active records

use super::{print_rule, CommandContext};
use crate::analysis::multiple_active;
use crate::cli::validation::validate_paths;
use crate::report::derived::{
    multiple_active_detailed, plate_list, MULTIPLE_ACTIVE_DETAILED_FILE, MULTIPLE_ACTIVE_LIST_FILE,
};
use crate::report::export::DUPLICATE_PLATES_FILE;
use crate::sections::{read_sections, SectionKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct MultipleActiveSummary {
    pub input: PathBuf,
    pub sections: usize,
    pub plates: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Execute the multiple-active command
pub async fn run_multiple_active(ctx: &CommandContext, input: Option<PathBuf>) -> Result<()> {
    let input = ctx.input_or_default(input, DUPLICATE_PLATES_FILE);
    validate_paths(&input, ctx.output_dir())?;

    let sections = read_sections(&input, SectionKind::DuplicateRecords)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let groups = multiple_active(&sections);
    info!(
        "{} of {} plates have more than one active record",
        groups.len(),
        sections.len()
    );

    let ordered = groups.sorted_by_count_desc();
    let list = plate_list(&ordered);
    let files = vec![
        ctx.writer
            .write(MULTIPLE_ACTIVE_DETAILED_FILE, &multiple_active_detailed(&groups))
            .await?,
        ctx.writer.write(MULTIPLE_ACTIVE_LIST_FILE, &list).await?,
    ];

    let summary = MultipleActiveSummary {
        input,
        sections: sections.len(),
        plates: ordered.iter().map(|(plate, _)| plate.to_string()).collect(),
        files,
    };

    ctx.report(&summary, |s| {
        print_rule();
        println!("共找到 {} 个车牌号码有多条生效中记录", s.plates.len());
        print_rule();
        for file in &s.files {
            println!("✓ 已保存: {}", file.display());
        }
        if !list.is_empty() {
            println!("\n车牌号: {list}");
        }
    })
}
