//! `status`: active/refunded/expired classification of every plate

use super::CommandContext;
use crate::analysis::{ExportAnalysis, StatusAnalysis};
use crate::cli::validation::validate_paths;
use crate::config::resolve_now;
use crate::export::ExportTable;
use crate::report::status::{
    multiple_active_records, status_analysis, valid_refunded_records, MULTIPLE_ACTIVE_FILE,
    STATUS_ANALYSIS_FILE, VALID_REFUNDED_FILE,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub now: String,
    pub total_plates: usize,
    pub plates_with_active: usize,
    pub plates_without_active: usize,
    pub multiple_active_plates: usize,
    pub valid_refunded_records: usize,
    pub valid_refunded_plates: usize,
    pub files: Vec<PathBuf>,
}

/// Execute the status command
pub async fn run_status(ctx: &CommandContext, export: &Path, now: Option<&str>) -> Result<()> {
    let now = resolve_now(now)?;
    validate_paths(export, ctx.output_dir())?;

    info!("Reading export {}", export.display());
    let table = ExportTable::read(export)
        .await
        .with_context(|| format!("Failed to read export {}", export.display()))?;
    let export_analysis = ExportAnalysis::new(&table);
    let analysis = StatusAnalysis::new(&export_analysis.groups, now);
    info!(
        "{} plates with an active record, {} without",
        analysis.with_active.len(),
        analysis.without_active.len()
    );

    let mut files = vec![
        ctx.writer
            .write(STATUS_ANALYSIS_FILE, &status_analysis(&analysis))
            .await?,
    ];
    if analysis.valid_refunded.is_empty() {
        ctx.writer.remove_stale(VALID_REFUNDED_FILE).await?;
    } else {
        files.push(
            ctx.writer
                .write(
                    VALID_REFUNDED_FILE,
                    &valid_refunded_records(&analysis.valid_refunded),
                )
                .await?,
        );
    }
    if analysis.multiple_active.is_empty() {
        ctx.writer.remove_stale(MULTIPLE_ACTIVE_FILE).await?;
    } else {
        files.push(
            ctx.writer
                .write(
                    MULTIPLE_ACTIVE_FILE,
                    &multiple_active_records(&analysis.multiple_active),
                )
                .await?,
        );
    }

    let summary = StatusSummary {
        now: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        total_plates: analysis.total_plates,
        plates_with_active: analysis.with_active.len(),
        plates_without_active: analysis.without_active.len(),
        multiple_active_plates: analysis.multiple_active.len(),
        valid_refunded_records: analysis.valid_refunded.item_count(),
        valid_refunded_plates: analysis.valid_refunded.len(),
        files,
    };

    ctx.report(&summary, |s| {
        println!("当前时间: {}\n", s.now);
        println!("总车牌数: {}", s.total_plates);
        println!("有生效中记录的车牌数: {}", s.plates_with_active);
        println!("没有生效中记录的车牌数: {}", s.plates_without_active);
        println!("生效中记录超过1条的车牌数: {}", s.multiple_active_plates);
        println!("有效期内的已退款记录数: {}\n", s.valid_refunded_records);
        for file in &s.files {
            println!("✓ 已保存: {}", file.display());
        }
    })
}
