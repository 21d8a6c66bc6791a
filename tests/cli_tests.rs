//! Integration tests for the CLI interface
//!
//! Runs the audit chain end to end against small CSV and workbook exports.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/export.csv")
}

fn workbook_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/export.xlsx")
}

/// Command isolated from the user's config and environment
fn vip_audit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vip-audit").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("VIP_AUDIT_OUTPUT_DIR")
        .env_remove("VIP_AUDIT_AS_OF");
    cmd
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

#[test]
fn test_cli_help_default() {
    // Running without arguments shows help
    let dir = TempDir::new().unwrap();
    vip_audit(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_filter_help() {
    let dir = TempDir::new().unwrap();
    vip_audit(&dir)
        .args(["filter-disabled", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--plates-file"));
}

#[test]
fn test_full_audit_chain() {
    let dir = TempDir::new().unwrap();

    vip_audit(&dir)
        .arg("analyze-export")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("总车牌数: 5"))
        .stdout(predicate::str::contains("无牌车"));

    let duplicates = read(&dir, "duplicate_plates.txt");
    assert!(duplicates.contains("车牌号: 黑A12345 (共2条记录)"));
    assert!(duplicates.contains(
        "  1. VIP类型: 临时来访（化工西门）, 状态: 已退款, 有效期: 2025-01-01 00:00:00 ~ 2026-12-31 23:59:59"
    ));
    assert!(!duplicates.contains("黑B54321"));
    assert!(dir.path().join("vip_records_by_plate.txt").exists());
    assert!(dir.path().join("all_plates_list.txt").exists());
    assert!(dir.path().join("records_summary.txt").exists());
    assert!(dir.path().join("refunded_vips.txt").exists());

    vip_audit(&dir).arg("multiple-active").assert().success();
    assert_eq!(read(&dir, "multiple_active_plates_list.txt"), "黑A12345");

    vip_audit(&dir)
        .args(["refunded-no-active", "--as-of", "2026-01-26"])
        .assert()
        .success();
    assert_eq!(
        read(&dir, "valid_refunded_no_active_plates_list.txt"),
        "黑E2080U,黑E3CA62,黑M2D002"
    );
    assert!(read(&dir, "valid_refunded_no_active_records.txt").contains("统计时间: 2026-01-26"));

    vip_audit(&dir)
        .args(["filter-temporary", "--as-of", "2026-01-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("筛选出的车牌号: 黑E3CA62,黑M2D002"));
    assert_eq!(
        read(&dir, "non_temporary_visitor_plates_list.txt"),
        "黑E3CA62,黑M2D002"
    );

    vip_audit(&dir)
        .args(["filter-disabled", "--as-of", "2026-01-26"])
        .assert()
        .success();
    assert_eq!(read(&dir, "non_disabled_vip_plates_list.txt"), "黑E3CA62");
    let records = read(&dir, "non_disabled_vip_records.txt");
    assert!(records.contains("车牌号: 黑E3CA62 (非'停用'记录: 1条)"));
    assert!(records.contains("  VIP类型: 月卡, 状态: 已退款"));
}

#[test]
fn test_filter_with_explicit_plates() {
    let dir = TempDir::new().unwrap();
    vip_audit(&dir)
        .arg("analyze-export")
        .arg(fixture())
        .assert()
        .success();
    vip_audit(&dir)
        .args(["refunded-no-active", "--as-of", "2026-01-26"])
        .assert()
        .success();

    fs::write(dir.path().join("targets.txt"), "黑M2D002\n黑E2080U\n").unwrap();
    vip_audit(&dir)
        .args(["filter-temporary", "--plates-file", "targets.txt"])
        .assert()
        .success();
    assert_eq!(
        read(&dir, "non_temporary_visitor_plates_list.txt"),
        "黑M2D002"
    );
}

#[test]
fn test_status_json_summary() {
    let dir = TempDir::new().unwrap();
    let output = vip_audit(&dir)
        .args(["--json", "status"])
        .arg(fixture())
        .args(["--now", "2026-01-26 09:00:00"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_plates"], 5);
    assert_eq!(summary["plates_with_active"], 2);
    assert_eq!(summary["plates_without_active"], 3);
    assert_eq!(summary["multiple_active_plates"], 1);
    assert_eq!(summary["valid_refunded_records"], 3);

    let report = read(&dir, "vip_status_analysis.txt");
    assert!(report.contains("分析时间: 2026-01-26 09:00:00"));
    assert!(dir.path().join("multiple_active_records.txt").exists());
    assert!(dir.path().join("valid_refunded_records.txt").exists());
}

#[test]
fn test_config_file_sets_output_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vip-audit.toml"), "output_dir = \"reports\"\n").unwrap();

    vip_audit(&dir)
        .arg("analyze-export")
        .arg(fixture())
        .assert()
        .success();
    assert!(dir.path().join("reports/duplicate_plates.txt").exists());
}

#[test]
fn test_env_output_dir_overrides_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vip-audit.toml"), "output_dir = \"reports\"\n").unwrap();

    vip_audit(&dir)
        .env("VIP_AUDIT_OUTPUT_DIR", dir.path().join("from-env"))
        .arg("analyze-export")
        .arg(fixture())
        .assert()
        .success();
    assert!(dir.path().join("from-env/duplicate_plates.txt").exists());
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    vip_audit(&dir)
        .arg("multiple-active")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_date_fails() {
    let dir = TempDir::new().unwrap();
    vip_audit(&dir)
        .arg("status")
        .arg(fixture())
        .args(["--now", "tomorrow"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid date"))
        .stderr(predicate::str::contains("tomorrow"));
    assert!(!dir.path().join("vip_status_analysis.txt").exists());
}

#[test]
fn test_status_reads_xlsx_workbook() {
    let dir = TempDir::new().unwrap();
    let output = vip_audit(&dir)
        .args(["--json", "status"])
        .arg(workbook_fixture())
        .args(["--now", "2026-01-26 09:00:00"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_plates"], 3);
    assert_eq!(summary["plates_with_active"], 1);
    assert_eq!(summary["plates_without_active"], 2);
    // One refund ends on a date cell, the other on "2026/6/1 8:00" text
    assert_eq!(summary["valid_refunded_records"], 2);

    let records = read(&dir, "valid_refunded_records.txt");
    assert!(records.contains("2025-01-01 00:00:00 ~ 2026-12-31 12:00:00"));
    assert!(records.contains("2025/6/1 8:00 ~ 2026/6/1 8:00"));
}

#[test]
fn test_rerun_removes_stale_reports() {
    let dir = TempDir::new().unwrap();
    vip_audit(&dir)
        .arg("analyze-export")
        .arg(fixture())
        .assert()
        .success();
    assert!(dir.path().join("duplicate_plates.txt").exists());
    assert!(dir.path().join("refunded_vips.txt").exists());

    let clean = dir.path().join("clean.csv");
    fs::write(
        &clean,
        "车牌号,VIP别称,VIP状态,有效期开始,有效期结束\n黑B54321,年卡,生效中,2025-03-01,2026-03-01\n",
    )
    .unwrap();
    vip_audit(&dir)
        .arg("analyze-export")
        .arg(&clean)
        .assert()
        .success()
        .stdout(predicate::str::contains("没有发现重复的车牌记录"));

    assert!(!dir.path().join("duplicate_plates.txt").exists());
    assert!(!dir.path().join("refunded_vips.txt").exists());
    assert!(read(&dir, "all_plates_list.txt").contains("黑B54321"));
}
