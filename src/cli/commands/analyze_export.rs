//! `analyze-export`: overview reports for a membership export

use super::CommandContext;
use crate::analysis::ExportAnalysis;
use crate::cli::validation::validate_paths;
use crate::export::ExportTable;
use crate::report::export::{
    all_plates_list, duplicate_plates, records_by_plate, records_summary, refunded_vips,
    ALL_PLATES_FILE, DUPLICATE_PLATES_FILE, RECORDS_BY_PLATE_FILE, RECORDS_SUMMARY_FILE,
    REFUNDED_FILE,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TOP_N: usize = 10;

#[derive(Debug, Serialize)]
pub struct PlateCount {
    pub plate: String,
    pub records: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub total_rows: usize,
    pub total_plates: usize,
    pub duplicate_plates: usize,
    pub refunded_records: usize,
    pub refunded_plates: usize,
    pub invalid_plates: Vec<String>,
    pub top_by_records: Vec<PlateCount>,
    pub top_by_refunds: Vec<PlateCount>,
    pub files: Vec<PathBuf>,
}

fn top<T>(ordered: &[(&str, &[T])]) -> Vec<PlateCount> {
    ordered
        .iter()
        .take(TOP_N)
        .map(|(plate, records)| PlateCount {
            plate: plate.to_string(),
            records: records.len(),
        })
        .collect()
}

/// Execute the analyze-export command
pub async fn run_analyze_export(ctx: &CommandContext, export: &Path) -> Result<()> {
    validate_paths(export, ctx.output_dir())?;

    info!("Reading export {}", export.display());
    let table = ExportTable::read(export)
        .await
        .with_context(|| format!("Failed to read export {}", export.display()))?;
    debug!(
        "Header found on row {}: {:?}",
        table.header_row, table.header
    );

    let analysis = ExportAnalysis::new(&table);
    let duplicates = analysis.duplicates();
    let refunded = analysis.refunded();
    info!(
        "Grouped {} plates, {} with duplicates, {} with refunds",
        analysis.groups.len(),
        duplicates.len(),
        refunded.len()
    );

    let mut files = vec![
        ctx.writer
            .write(RECORDS_BY_PLATE_FILE, &records_by_plate(&analysis))
            .await?,
    ];
    if duplicates.is_empty() {
        ctx.writer.remove_stale(DUPLICATE_PLATES_FILE).await?;
    } else {
        files.push(
            ctx.writer
                .write(DUPLICATE_PLATES_FILE, &duplicate_plates(&duplicates))
                .await?,
        );
    }
    files.push(
        ctx.writer
            .write(ALL_PLATES_FILE, &all_plates_list(&analysis.groups))
            .await?,
    );
    files.push(
        ctx.writer
            .write(RECORDS_SUMMARY_FILE, &records_summary(&analysis.groups))
            .await?,
    );
    if refunded.is_empty() {
        ctx.writer.remove_stale(REFUNDED_FILE).await?;
    } else {
        files.push(
            ctx.writer
                .write(REFUNDED_FILE, &refunded_vips(&refunded))
                .await?,
        );
    }

    let summary = ExportSummary {
        total_rows: analysis.total_rows,
        total_plates: analysis.groups.len(),
        duplicate_plates: duplicates.len(),
        refunded_records: refunded.item_count(),
        refunded_plates: refunded.len(),
        invalid_plates: analysis.invalid_plates.clone(),
        top_by_records: top(&duplicates.sorted_by_count_desc()),
        top_by_refunds: top(&refunded.sorted_by_count_desc()),
        files,
    };

    ctx.report(&summary, print_summary)
}

fn print_summary(summary: &ExportSummary) {
    println!("总记录数: {}", summary.total_rows);

    if !summary.invalid_plates.is_empty() {
        println!(
            "\n发现 {} 个无效车牌号（已过滤）:",
            summary.invalid_plates.len()
        );
        for plate in summary.invalid_plates.iter().take(TOP_N) {
            println!("  - {plate}");
        }
        if summary.invalid_plates.len() > TOP_N {
            println!("  ... 还有 {} 个", summary.invalid_plates.len() - TOP_N);
        }
    }

    println!("\n总车牌数: {}", summary.total_plates);
    println!("已退款记录总数: {}", summary.refunded_records);
    println!("有已退款记录的车牌数: {}", summary.refunded_plates);
    println!("有多条记录的车牌数: {}", summary.duplicate_plates);

    println!();
    for file in &summary.files {
        println!("✓ 已保存: {}", file.display());
    }

    if summary.top_by_records.is_empty() {
        println!("\n没有发现重复的车牌记录");
    } else {
        println!("\n记录数最多的前10个车牌:");
        for (i, entry) in summary.top_by_records.iter().enumerate() {
            println!("  {}. {}: {}条记录", i + 1, entry.plate, entry.records);
        }
    }

    if summary.top_by_refunds.is_empty() {
        println!("\n没有发现已退款的记录");
    } else {
        println!("\n已退款记录最多的前10个车牌:");
        for (i, entry) in summary.top_by_refunds.iter().enumerate() {
            println!("  {}. {}: {}条已退款记录", i + 1, entry.plate, entry.records);
        }
    }
}
