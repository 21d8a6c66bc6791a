//! `refunded-no-active`: plates whose in-period records are only refunds

use super::{print_rule, CommandContext};
use crate::analysis::refunded_without_active;
use crate::cli::validation::validate_paths;
use crate::report::derived::{
    plate_list, refunded_without_active as render, REFUNDED_NO_ACTIVE_FILE,
    REFUNDED_NO_ACTIVE_LIST_FILE,
};
use crate::report::export::DUPLICATE_PLATES_FILE;
use crate::sections::{read_sections, SectionKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct RefundedNoActiveSummary {
    pub input: PathBuf,
    pub as_of: String,
    pub plates: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Execute the refunded-no-active command
pub async fn run_refunded_no_active(
    ctx: &CommandContext,
    input: Option<PathBuf>,
    as_of: Option<&str>,
) -> Result<()> {
    let input = ctx.input_or_default(input, DUPLICATE_PLATES_FILE);
    validate_paths(&input, ctx.output_dir())?;
    let as_of = ctx.config.as_of(as_of)?;

    let sections = read_sections(&input, SectionKind::DuplicateRecords)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let groups = refunded_without_active(&sections, as_of);
    info!(
        "{} plates have a refund covering {} and no active record",
        groups.len(),
        as_of.format("%Y-%m-%d")
    );

    let ordered = groups.sorted_by_plate();
    let files = vec![
        ctx.writer
            .write(REFUNDED_NO_ACTIVE_FILE, &render(&groups, as_of))
            .await?,
        ctx.writer
            .write(REFUNDED_NO_ACTIVE_LIST_FILE, &plate_list(&ordered))
            .await?,
    ];

    let summary = RefundedNoActiveSummary {
        input,
        as_of: as_of.format("%Y-%m-%d").to_string(),
        plates: ordered.iter().map(|(plate, _)| plate.to_string()).collect(),
        files,
    };

    ctx.report(&summary, |s| {
        print_rule();
        println!("共找到 {} 个车牌号码符合条件", s.plates.len());
        print_rule();
        for file in &s.files {
            println!("✓ 已保存: {}", file.display());
        }
        println!("\n统计摘要:");
        println!(
            "1. 有效期内的退款记录但无生效中记录的车牌数: {}",
            s.plates.len()
        );
        println!("2. 这些车牌可能存在数据异常,需要检查");
    })
}
