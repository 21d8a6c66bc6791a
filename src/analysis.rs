//! Classification of membership records
//!
//! Two families of analyses live here. The export analyses work on rows
//! read from the membership export. The derived analyses work on plate
//! sections re-read from earlier reports.

use crate::export::ExportTable;
use crate::grouping::PlateGroups;
use crate::record::VipRecord;
use crate::sections::{RecordLine, Section};
use crate::validity::{is_still_valid, period_covers};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Export rows grouped by plate
#[derive(Debug, Clone)]
pub struct ExportAnalysis {
    pub total_rows: usize,
    pub groups: PlateGroups<VipRecord>,
    pub invalid_plates: Vec<String>,
}

impl ExportAnalysis {
    pub fn new(table: &ExportTable) -> Self {
        let export = table.records();
        let groups = PlateGroups::from_items(export.records, |r| r.plate.clone());
        debug!(
            "Grouped {} records into {} plates",
            groups.item_count(),
            groups.len()
        );

        Self {
            total_rows: table.total_rows(),
            groups,
            invalid_plates: export.invalid_plates,
        }
    }

    /// Plates with more than one record
    pub fn duplicates(&self) -> PlateGroups<VipRecord> {
        self.groups.filter(|_, records| records.len() > 1)
    }

    /// Refunded records of every plate that has at least one
    pub fn refunded(&self) -> PlateGroups<VipRecord> {
        let mut refunded = PlateGroups::new();
        for (plate, records) in self.groups.iter() {
            let matching: Vec<_> = records.iter().filter(|r| r.is_refunded()).cloned().collect();
            if !matching.is_empty() {
                refunded.insert(plate, matching);
            }
        }
        refunded
    }
}

/// Records of one plate split by status
#[derive(Debug, Clone, Default)]
pub struct PlateStatus {
    pub active: Vec<VipRecord>,
    pub refunded: Vec<VipRecord>,
    pub expired: Vec<VipRecord>,
}

/// Status breakdown of an export at a point in time
#[derive(Debug, Clone)]
pub struct StatusAnalysis {
    pub now: NaiveDateTime,
    pub total_plates: usize,
    pub with_active: BTreeMap<String, PlateStatus>,
    pub without_active: BTreeMap<String, PlateStatus>,
    /// Refunded records whose end time has not passed, by plate
    pub valid_refunded: PlateGroups<VipRecord>,
    /// Plates holding more than one active record
    pub multiple_active: PlateGroups<VipRecord>,
}

impl StatusAnalysis {
    pub fn new(groups: &PlateGroups<VipRecord>, now: NaiveDateTime) -> Self {
        let mut with_active = BTreeMap::new();
        let mut without_active = BTreeMap::new();
        let mut valid_refunded = PlateGroups::new();
        let mut multiple_active = PlateGroups::new();

        for (plate, records) in groups.iter() {
            let mut status = PlateStatus::default();
            for record in records {
                if record.is_active() {
                    status.active.push(record.clone());
                } else if record.is_refunded() {
                    if is_still_valid(record.end_time_value(), now) {
                        valid_refunded.push(plate, record.clone());
                    }
                    status.refunded.push(record.clone());
                } else if record.is_expired() {
                    status.expired.push(record.clone());
                }
            }

            if status.active.is_empty() {
                without_active.insert(plate.to_string(), status);
            } else {
                if status.active.len() > 1 {
                    multiple_active.insert(plate, status.active.clone());
                }
                with_active.insert(plate.to_string(), status);
            }
        }

        Self {
            now,
            total_plates: groups.len(),
            with_active,
            without_active,
            valid_refunded,
            multiple_active,
        }
    }

    pub fn is_valid(&self, record: &VipRecord) -> bool {
        is_still_valid(record.end_time_value(), self.now)
    }
}

/// Plates whose report section lists more than one active record
pub fn multiple_active(sections: &[Section]) -> PlateGroups<RecordLine> {
    let mut result = PlateGroups::new();
    for section in sections {
        let active: Vec<_> = section
            .records()
            .into_iter()
            .filter(RecordLine::is_active)
            .collect();
        if active.len() > 1 {
            result.insert(section.plate.as_str(), active);
        }
    }
    result
}

/// Plates with no active record but a refunded record covering `as_of`
pub fn refunded_without_active(
    sections: &[Section],
    as_of: NaiveDateTime,
) -> PlateGroups<RecordLine> {
    let mut result = PlateGroups::new();
    for section in sections {
        let records = section.records();
        if records.iter().any(RecordLine::is_active) {
            continue;
        }

        let covering: Vec<_> = records
            .into_iter()
            .filter(|r| r.is_refunded())
            .filter(|r| {
                r.period
                    .as_ref()
                    .is_some_and(|(start, end)| period_covers(start, end, as_of))
            })
            .collect();
        if !covering.is_empty() {
            result.insert(section.plate.as_str(), covering);
        }
    }
    result
}

/// Keep the record lines of target plates that `exclude` rejects
///
/// With no targets every plate in `sections` is considered. Plates left
/// without records are dropped.
pub fn filter_records<F>(
    sections: &[Section],
    targets: Option<&[String]>,
    exclude: F,
) -> PlateGroups<RecordLine>
where
    F: Fn(&RecordLine) -> bool,
{
    let targets: Option<HashSet<&str>> =
        targets.map(|plates| plates.iter().map(String::as_str).collect());

    let mut result = PlateGroups::new();
    for section in sections {
        if let Some(targets) = &targets {
            if !targets.contains(section.plate.as_str()) {
                continue;
            }
        }

        let kept: Vec<_> = section
            .records()
            .into_iter()
            .filter(|r| !exclude(r))
            .collect();
        if !kept.is_empty() {
            result.insert(section.plate.as_str(), kept);
        }
    }
    result
}
