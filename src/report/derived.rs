//! Reports built from earlier reports
//!
//! Each report comes with a bare comma-separated plate list file that has
//! no trailing newline, ready to paste into the membership API.

use super::{ReportBuilder, NARROW};
use crate::grouping::PlateGroups;
use crate::sections::{RecordLine, SectionKind};
use chrono::NaiveDateTime;

pub const MULTIPLE_ACTIVE_DETAILED_FILE: &str = "multiple_active_records_detailed.txt";
pub const MULTIPLE_ACTIVE_LIST_FILE: &str = "multiple_active_plates_list.txt";
pub const REFUNDED_NO_ACTIVE_FILE: &str = "valid_refunded_no_active_records.txt";
pub const REFUNDED_NO_ACTIVE_LIST_FILE: &str = "valid_refunded_no_active_plates_list.txt";

/// Layout of a plate-filter report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLayout {
    pub title: &'static str,
    pub kind: SectionKind,
    pub records_file: &'static str,
    pub list_file: &'static str,
}

pub const NON_TEMPORARY_LAYOUT: FilterLayout = FilterLayout {
    title: "VIP类型不是'临时来访(化工西门)'的车牌号码",
    kind: SectionKind::NonTemporaryVisitor,
    records_file: "non_temporary_visitor_records.txt",
    list_file: "non_temporary_visitor_plates_list.txt",
};

pub const NON_DISABLED_LAYOUT: FilterLayout = FilterLayout {
    title: "VIP类型不是'停用'的车牌号码",
    kind: SectionKind::NonDisabled,
    records_file: "non_disabled_vip_records.txt",
    list_file: "non_disabled_vip_plates_list.txt",
};

fn header(report: &mut ReportBuilder, title: &str, total: usize, as_of: Option<NaiveDateTime>) {
    report
        .banner(title)
        .blank()
        .line(format!("总数: {total}"))
        .blank();
    if let Some(as_of) = as_of {
        report
            .line(format!("统计时间: {}", as_of.format("%Y-%m-%d")))
            .blank();
    }
}

fn numbered_sections(
    report: &mut ReportBuilder,
    sections: &[(&str, &[RecordLine])],
    kind: SectionKind,
) {
    for (plate, records) in sections {
        report.section_header(plate, kind, records.len());
        for (i, record) in records.iter().enumerate() {
            report.line(format!("  {}. {}", i + 1, record.text));
        }
        report.blank();
    }
}

/// Plates with several active records, largest groups first
pub fn multiple_active_detailed(groups: &PlateGroups<RecordLine>) -> String {
    let mut report = ReportBuilder::new(NARROW);
    header(&mut report, "生效中记录超过1条的车牌号码统计", groups.len(), None);
    numbered_sections(
        &mut report,
        &groups.sorted_by_count_desc(),
        SectionKind::MultipleActive,
    );
    report.finish_joined()
}

/// Plates whose only in-period records are refunds
pub fn refunded_without_active(groups: &PlateGroups<RecordLine>, as_of: NaiveDateTime) -> String {
    let mut report = ReportBuilder::new(NARROW);
    header(
        &mut report,
        "退款记录在有效期内但没有生效中记录的车牌号码",
        groups.len(),
        Some(as_of),
    );
    numbered_sections(
        &mut report,
        &groups.sorted_by_plate(),
        SectionKind::ValidRefunds,
    );
    report.finish_joined()
}

/// Records left after a plate filter, by plate
pub fn filtered_records(
    groups: &PlateGroups<RecordLine>,
    layout: &FilterLayout,
    as_of: NaiveDateTime,
) -> String {
    let mut report = ReportBuilder::new(NARROW);
    header(&mut report, layout.title, groups.len(), Some(as_of));
    for (plate, records) in groups.sorted_by_plate() {
        report.section_header(plate, layout.kind, records.len());
        for record in records {
            report.line(format!("  {}", record.text));
        }
        report.blank();
    }
    report.finish_joined()
}

/// Comma-separated plates in the given order, no trailing newline
pub fn plate_list<T>(ordered: &[(&str, &[T])]) -> String {
    ordered
        .iter()
        .map(|(plate, _)| *plate)
        .collect::<Vec<_>>()
        .join(",")
}
