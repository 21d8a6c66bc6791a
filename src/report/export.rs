//! Reports built straight from the membership export

use super::{ReportBuilder, NARROW};
use crate::analysis::ExportAnalysis;
use crate::grouping::PlateGroups;
use crate::record::VipRecord;
use crate::sections::SectionKind;

pub const RECORDS_BY_PLATE_FILE: &str = "vip_records_by_plate.txt";
pub const DUPLICATE_PLATES_FILE: &str = "duplicate_plates.txt";
pub const ALL_PLATES_FILE: &str = "all_plates_list.txt";
pub const RECORDS_SUMMARY_FILE: &str = "records_summary.txt";
pub const REFUNDED_FILE: &str = "refunded_vips.txt";

/// Every record of every plate, with all non-empty columns
pub fn records_by_plate(analysis: &ExportAnalysis) -> String {
    let groups = &analysis.groups;
    let mut report = ReportBuilder::new(NARROW);
    report
        .banner("VIP记录统计（按车牌号分组）")
        .blank()
        .line(format!("总记录数: {}", analysis.total_rows))
        .line(format!("总车牌数: {}", groups.len()))
        .line(format!("有多条记录的车牌数: {}", analysis.duplicates().len()))
        .blank();

    for (plate, records) in groups.sorted_by_plate() {
        report
            .rule('-')
            .line(format!("车牌号: {plate}"))
            .line(format!("记录数: {}", records.len()))
            .rule('-')
            .blank();

        for (i, record) in records.iter().enumerate() {
            report.line(format!("  记录 {}:", i + 1));
            for (column, value) in record.present_fields() {
                report.line(format!("    {column}: {value}"));
            }
            report.blank();
        }
        report.blank();
    }

    report.finish()
}

/// Plates with more than one record, largest groups first
pub fn duplicate_plates(duplicates: &PlateGroups<VipRecord>) -> String {
    let mut report = ReportBuilder::new(NARROW);
    report
        .banner("有多条记录的车牌（需要清理）")
        .blank()
        .line(format!("总数: {}", duplicates.len()))
        .blank();

    for (plate, records) in duplicates.sorted_by_count_desc() {
        report.section_header(plate, SectionKind::DuplicateRecords, records.len());
        for (i, record) in records.iter().enumerate() {
            report.line(format!(
                "  {}. VIP类型: {}, 状态: {}, 有效期: {} ~ {}",
                i + 1,
                record.vip_type(),
                record.status_text(),
                record.start_time(),
                record.end_time()
            ));
        }
        report.blank();
    }

    report
        .blank()
        .banner("车牌号列表（逗号分隔，可直接用于接口）")
        .blank()
        .line(duplicates.plates_joined());

    report.finish()
}

/// Every plate as a comma list and one per line
pub fn all_plates_list(groups: &PlateGroups<VipRecord>) -> String {
    let mut report = ReportBuilder::new(NARROW);
    report
        .line("所有车牌号列表（逗号分隔）")
        .rule('=')
        .blank()
        .line(groups.plates_joined())
        .blank()
        .banner("所有车牌号列表（每行一个）")
        .blank();
    for plate in groups.plates_sorted() {
        report.line(plate);
    }

    report.finish()
}

/// Record count per plate, largest first
pub fn records_summary(groups: &PlateGroups<VipRecord>) -> String {
    let mut report = ReportBuilder::new(NARROW);
    report
        .line("记录数统计")
        .rule('=')
        .blank()
        .line(format!("{:<20} {:>10} {:>15}", "车牌号", "记录数", "状态"))
        .rule('-');

    for (plate, records) in groups.sorted_by_count_desc() {
        let status = if records.len() > 1 { "需要清理" } else { "正常" };
        report.line(format!("{:<20} {:>10} {:>15}", plate, records.len(), status));
    }

    report.finish()
}

/// Refunded records per plate, largest groups first
pub fn refunded_vips(refunded: &PlateGroups<VipRecord>) -> String {
    let mut report = ReportBuilder::new(NARROW);
    report
        .banner("已退款的VIP记录")
        .blank()
        .line(format!("已退款记录总数: {}", refunded.item_count()))
        .line(format!("有已退款记录的车牌数: {}", refunded.len()))
        .blank();

    for (plate, records) in refunded.sorted_by_count_desc() {
        report.plate_header(plate, &format!("共{}条已退款记录", records.len()));
        report.blank();
        for (i, record) in records.iter().enumerate() {
            detailed_record(&mut report, i + 1, record);
        }
        report.blank();
    }

    report
        .blank()
        .banner("已退款车牌号列表（逗号分隔）")
        .blank()
        .line(refunded.plates_joined())
        .blank()
        .banner("已退款车牌号列表（每行一个）")
        .blank();
    for plate in refunded.plates_sorted() {
        report.line(plate);
    }

    report.finish()
}

/// `记录 N:` block with the fields operators check
pub(crate) fn detailed_record(report: &mut ReportBuilder, ordinal: usize, record: &VipRecord) {
    report
        .line(format!("  记录 {ordinal}:"))
        .line(format!("    VIP类型: {}", record.vip_type()))
        .line(format!("    车主姓名: {}", record.owner()))
        .line(format!("    手机号: {}", record.phone()))
        .line(format!(
            "    有效期: {} ~ {}",
            record.start_time(),
            record.end_time()
        ))
        .line(format!("    状态: {}", record.status_text()))
        .blank();
}
