//! Status analysis reports (wide layout)

use super::export::detailed_record;
use super::{ReportBuilder, WIDE};
use crate::analysis::{PlateStatus, StatusAnalysis};
use crate::grouping::PlateGroups;
use crate::record::VipRecord;

pub const STATUS_ANALYSIS_FILE: &str = "vip_status_analysis.txt";
pub const VALID_REFUNDED_FILE: &str = "valid_refunded_records.txt";
pub const MULTIPLE_ACTIVE_FILE: &str = "multiple_active_records.txt";

const VALID_MARK: &str = " ✓ 有效期内";
const EXPIRED_MARK: &str = " ✗ 已过有效期";

/// Full breakdown of plates with and without an active record
pub fn status_analysis(analysis: &StatusAnalysis) -> String {
    let mut report = ReportBuilder::new(WIDE);
    report
        .banner("VIP记录状态分析报告")
        .blank()
        .line(format!(
            "分析时间: {}",
            analysis.now.format("%Y-%m-%d %H:%M:%S")
        ))
        .line(format!("总车牌数: {}", analysis.total_plates))
        .line(format!(
            "有生效中记录的车牌数: {}",
            analysis.with_active.len()
        ))
        .line(format!(
            "没有生效中记录的车牌数: {}",
            analysis.without_active.len()
        ))
        .line(format!(
            "有效期内的已退款记录数: {}",
            analysis.valid_refunded.item_count()
        ))
        .blank();

    report
        .blank()
        .banner(&format!(
            "第一部分：有生效中记录的车牌（共 {} 个）",
            analysis.with_active.len()
        ))
        .blank();
    for (plate, status) in &analysis.with_active {
        report
            .rule('-')
            .line(format!("车牌号: {plate}"))
            .line(format!("  生效中记录: {} 条", status.active.len()))
            .line(format!("  已退款记录: {} 条", status.refunded.len()))
            .line(format!("  已过期记录: {} 条", status.expired.len()))
            .rule('-')
            .blank();

        if !status.active.is_empty() {
            report.line("  【生效中记录】");
            for (i, record) in status.active.iter().enumerate() {
                status_record(&mut report, i + 1, record, "");
            }
        }
        refunded_and_expired(&mut report, analysis, status);
        report.blank();
    }

    report
        .blank()
        .banner(&format!(
            "第二部分：没有生效中记录的车牌（共 {} 个）",
            analysis.without_active.len()
        ))
        .blank();
    for (plate, status) in &analysis.without_active {
        report
            .rule('-')
            .line(format!("车牌号: {plate}"))
            .line(format!("  已退款记录: {} 条", status.refunded.len()))
            .line(format!("  已过期记录: {} 条", status.expired.len()))
            .rule('-')
            .blank();
        refunded_and_expired(&mut report, analysis, status);
        report.blank();
    }

    let join = |plates: Vec<&String>| {
        plates
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    };
    report
        .blank()
        .banner("第三部分：车牌号列表")
        .blank()
        .line("有生效中记录的车牌号列表（逗号分隔）：")
        .rule('-')
        .line(join(analysis.with_active.keys().collect()))
        .blank()
        .line("没有生效中记录的车牌号列表（逗号分隔）：")
        .rule('-')
        .line(join(analysis.without_active.keys().collect()));

    report.finish()
}

fn refunded_and_expired(report: &mut ReportBuilder, analysis: &StatusAnalysis, status: &PlateStatus) {
    if !status.refunded.is_empty() {
        report.line("  【已退款记录】");
        for (i, record) in status.refunded.iter().enumerate() {
            let mark = if analysis.is_valid(record) {
                VALID_MARK
            } else {
                EXPIRED_MARK
            };
            status_record(report, i + 1, record, mark);
        }
    }
    if !status.expired.is_empty() {
        report
            .line(format!(
                "  【已过期记录】（共 {} 条，已省略详情）",
                status.expired.len()
            ))
            .blank();
    }
}

fn status_record(report: &mut ReportBuilder, ordinal: usize, record: &VipRecord, mark: &str) {
    report
        .line(format!("    {ordinal}. VIP类型: {}{mark}", record.vip_type()))
        .line(format!("       车主姓名: {}", record.owner()))
        .line(format!("       手机号: {}", record.phone()))
        .line(format!(
            "       有效期: {} ~ {}",
            record.start_time(),
            record.end_time()
        ))
        .line(format!("       状态: {}", record.status_text()))
        .blank();
}

/// Refunded records that are still within their validity period
pub fn valid_refunded_records(valid: &PlateGroups<VipRecord>) -> String {
    grouped_details(
        valid,
        GroupedDetails {
            title: "有效期内的已退款记录（按车牌号分组）",
            totals: vec![
                format!("总记录数: {}", valid.item_count()),
                format!("涉及车牌数: {}", valid.len()),
            ],
            header_label: "条有效期内的已退款记录",
            list_title: "有效期内已退款记录的车牌号列表",
        },
    )
}

/// Plates holding more than one active record
pub fn multiple_active_records(multiple: &PlateGroups<VipRecord>) -> String {
    grouped_details(
        multiple,
        GroupedDetails {
            title: "生效中记录超过1条的车牌（需要清理）",
            totals: vec![format!("涉及车牌数: {}", multiple.len())],
            header_label: "条生效中记录",
            list_title: "生效中记录超过1条的车牌号列表",
        },
    )
}

struct GroupedDetails {
    title: &'static str,
    totals: Vec<String>,
    /// Suffix after the count, e.g. `条生效中记录`
    header_label: &'static str,
    list_title: &'static str,
}

fn grouped_details(groups: &PlateGroups<VipRecord>, layout: GroupedDetails) -> String {
    let mut report = ReportBuilder::new(WIDE);
    report.banner(layout.title).blank();
    for total in layout.totals {
        report.line(total);
    }
    report.blank();

    let by_count = groups.sorted_by_count_desc();
    for (plate, records) in &by_count {
        report
            .plate_header(plate, &format!("共{}{}", records.len(), layout.header_label))
            .blank();
        for (i, record) in records.iter().enumerate() {
            detailed_record(&mut report, i + 1, record);
        }
        report.blank();
    }

    report
        .blank()
        .banner(layout.list_title)
        .blank()
        .line("车牌号列表（逗号分隔，可直接用于接口）：")
        .rule('-')
        .line(groups.plates_joined())
        .blank()
        .line("车牌号列表（每行一个）：")
        .rule('-');
    for plate in groups.plates_sorted() {
        report.line(plate);
    }

    report
        .blank()
        .banner("记录数统计（按车牌号）")
        .blank();
    for (plate, records) in &by_count {
        report.line(format!("{plate}: {}{}", records.len(), layout.header_label));
    }

    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ExportAnalysis;
    use crate::export::ExportTable;
    use crate::validity::parse_datetime;

    const EXPORT: &str = "\
车牌号（必填）,VIP别称,VIP状态,有效期开始,有效期结束,车主姓名,手机号
黑E2080U,月卡,生效中,2025-01-01,2026-12-31,张三,13800000000
黑E2080U,季卡,生效中,2025-06-01,2026-06-01,张三,13800000000
黑E2080U,月卡,已退款,2024-01-01,2024-12-31,张三,13800000000
黑E3CA62,年卡,已退款,2025-01-01,2026-12-31,李四,13900000000
黑E3CA62,年卡,已过期,2022-01-01,2022-12-31,李四,13900000000
";

    fn analysis() -> StatusAnalysis {
        let export = ExportAnalysis::new(&ExportTable::parse(EXPORT).unwrap());
        StatusAnalysis::new(&export.groups, parse_datetime("2026-01-26 09:30:00").unwrap())
    }

    #[test]
    fn test_status_analysis_sections() {
        let text = status_analysis(&analysis());
        assert!(text.starts_with(&format!("{}\nVIP记录状态分析报告\n", "=".repeat(120))));
        assert!(text.contains("分析时间: 2026-01-26 09:30:00\n"));
        assert!(text.contains("有效期内的已退款记录数: 1\n"));
        assert!(text.contains("第一部分：有生效中记录的车牌（共 1 个）"));
        assert!(text.contains("第二部分：没有生效中记录的车牌（共 1 个）"));
        assert!(text.contains("    2. VIP类型: 季卡\n"));
        assert!(text.contains("    1. VIP类型: 月卡 ✗ 已过有效期\n"));
        assert!(text.contains("    1. VIP类型: 年卡 ✓ 有效期内\n"));
        assert!(text.contains("  【已过期记录】（共 1 条，已省略详情）\n\n"));
        assert!(text.ends_with(&format!(
            "没有生效中记录的车牌号列表（逗号分隔）：\n{}\n黑E3CA62\n",
            "-".repeat(120)
        )));
    }

    #[test]
    fn test_valid_refunded_report() {
        let text = valid_refunded_records(&analysis().valid_refunded);
        assert!(text.contains("总记录数: 1\n涉及车牌数: 1\n"));
        assert!(text.contains("车牌号: 黑E3CA62 (共1条有效期内的已退款记录)"));
        assert!(text.ends_with("黑E3CA62: 1条有效期内的已退款记录\n"));
    }

    #[test]
    fn test_multiple_active_report() {
        let text = multiple_active_records(&analysis().multiple_active);
        assert!(text.contains("涉及车牌数: 1\n"));
        assert!(text.contains("车牌号: 黑E2080U (共2条生效中记录)"));
        assert!(text.contains("    VIP类型: 季卡\n"));
        assert!(text.ends_with("黑E2080U: 2条生效中记录\n"));
    }
}
