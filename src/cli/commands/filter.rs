//! `filter-temporary` and `filter-disabled`: drop records by VIP type

use super::{print_rule, CommandContext};
use crate::analysis::filter_records;
use crate::cli::args::TargetArgs;
use crate::cli::validation::{validate_input_file, validate_paths, validate_plate_list};
use crate::plate::parse_plate_list;
use crate::report::derived::{
    filtered_records, plate_list, FilterLayout, NON_DISABLED_LAYOUT, NON_TEMPORARY_LAYOUT,
    REFUNDED_NO_ACTIVE_FILE,
};
use crate::sections::{read_sections, RecordLine, SectionKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct FilterSummary {
    pub input: PathBuf,
    pub excluded_type: String,
    pub targets: Option<usize>,
    pub plates: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Execute the filter-temporary command
pub async fn run_filter_temporary(
    ctx: &CommandContext,
    input: Option<PathBuf>,
    targets: &TargetArgs,
) -> Result<()> {
    let input = ctx.input_or_default(input, REFUNDED_NO_ACTIVE_FILE);
    let excluded = ctx.config.temporary_visitor_type.clone();
    let plates = resolve_targets(targets, &ctx.config.targets.temporary).await?;

    run_filter(
        ctx,
        FilterRun {
            input,
            source_kind: SectionKind::ValidRefunds,
            layout: NON_TEMPORARY_LAYOUT,
            targets: plates,
            as_of: targets.as_of.as_deref(),
        },
        &excluded,
        |record: &RecordLine| record.vip_type_contains(&excluded),
    )
    .await
}

/// Execute the filter-disabled command
pub async fn run_filter_disabled(
    ctx: &CommandContext,
    input: Option<PathBuf>,
    targets: &TargetArgs,
) -> Result<()> {
    let input = ctx.input_or_default(input, NON_TEMPORARY_LAYOUT.records_file);
    let excluded = ctx.config.disabled_type.clone();
    let plates = resolve_targets(targets, &ctx.config.targets.disabled).await?;

    run_filter(
        ctx,
        FilterRun {
            input,
            source_kind: SectionKind::NonTemporaryVisitor,
            layout: NON_DISABLED_LAYOUT,
            targets: plates,
            as_of: targets.as_of.as_deref(),
        },
        &excluded,
        |record: &RecordLine| record.vip_type_is(&excluded),
    )
    .await
}

struct FilterRun<'a> {
    input: PathBuf,
    source_kind: SectionKind,
    layout: FilterLayout,
    targets: Option<Vec<String>>,
    as_of: Option<&'a str>,
}

async fn run_filter<F>(
    ctx: &CommandContext,
    run: FilterRun<'_>,
    excluded_type: &str,
    exclude: F,
) -> Result<()>
where
    F: Fn(&RecordLine) -> bool,
{
    validate_paths(&run.input, ctx.output_dir())?;
    let as_of = ctx.config.as_of(run.as_of)?;

    let sections = read_sections(&run.input, run.source_kind)
        .await
        .with_context(|| format!("Failed to read {}", run.input.display()))?;
    let groups = filter_records(&sections, run.targets.as_deref(), exclude);
    info!(
        "{} plates keep records after dropping VIP type '{}'",
        groups.len(),
        excluded_type
    );

    let ordered = groups.sorted_by_plate();
    let list = plate_list(&ordered);
    let files = vec![
        ctx.writer
            .write(
                run.layout.records_file,
                &filtered_records(&groups, &run.layout, as_of),
            )
            .await?,
        ctx.writer.write(run.layout.list_file, &list).await?,
    ];

    let summary = FilterSummary {
        input: run.input,
        excluded_type: excluded_type.to_string(),
        targets: run.targets.as_ref().map(Vec::len),
        plates: ordered.iter().map(|(plate, _)| plate.to_string()).collect(),
        files,
    };

    let title = run.layout.title;
    ctx.report(&summary, |s| {
        print_rule();
        println!("{title}");
        print_rule();
        println!("共找到 {} 个车牌号码符合条件", s.plates.len());
        for file in &s.files {
            println!("✓ 已保存: {}", file.display());
        }
        println!("\n筛选出的车牌号: {list}");
    })
}

/// Plates from `--plates`/`--plates-file`, else the configured list
///
/// `None` means every plate in the input is a target.
async fn resolve_targets(args: &TargetArgs, configured: &[String]) -> Result<Option<Vec<String>>> {
    if args.plates.is_none() && args.plates_file.is_none() {
        if configured.is_empty() {
            debug!("No target plates given, filtering every plate in the input");
            return Ok(None);
        }
        return Ok(Some(configured.to_vec()));
    }

    let mut plates = Vec::new();
    if let Some(list) = &args.plates {
        plates.extend(parse_plate_list(list));
    }
    if let Some(file) = &args.plates_file {
        validate_input_file(file)?;
        let content = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read plate list {}", file.display()))?;
        plates.extend(parse_plate_list(&content));
    }
    validate_plate_list(&plates)?;
    debug!("Filtering {} target plates", plates.len());
    Ok(Some(plates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_targets_default_to_all_plates() {
        let targets = resolve_targets(&TargetArgs::default(), &[]).await.unwrap();
        assert!(targets.is_none());
    }

    #[tokio::test]
    async fn test_configured_targets_are_used() {
        let configured = vec!["黑E2080U".to_string()];
        let targets = resolve_targets(&TargetArgs::default(), &configured)
            .await
            .unwrap();
        assert_eq!(targets, Some(configured));
    }

    #[tokio::test]
    async fn test_flags_and_file_are_combined() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plates.txt");
        std::fs::write(&file, "黑E3CA62\n\n黑M2D002,\n").unwrap();

        let args = TargetArgs {
            plates: Some("黑E2080U, ".to_string()),
            plates_file: Some(file),
            as_of: None,
        };
        let targets = resolve_targets(&args, &["黑A00001".to_string()])
            .await
            .unwrap();
        assert_eq!(
            targets,
            Some(vec![
                "黑E2080U".to_string(),
                "黑E3CA62".to_string(),
                "黑M2D002".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_blank_plate_flag_is_rejected() {
        let args = TargetArgs {
            plates: Some(" , ".to_string()),
            ..Default::default()
        };
        assert!(resolve_targets(&args, &[]).await.is_err());
    }
}
