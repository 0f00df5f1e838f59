//! Monthly attendance aggregation: filter the records of one calendar
//! month and count them per collaborator and category.

use crate::config::ClassifyRule;
use crate::models::{AttendanceCategory, AttendanceCounts, AttendanceRecord};
use crate::utils::in_month;
use std::collections::HashMap;

/// Classify a status string against the ordered rule list.
/// Matching is case-insensitive substring, first rule wins; a status no
/// rule matches returns `None` and is simply not counted.
pub fn classify(status: &str, rules: &[ClassifyRule]) -> Option<AttendanceCategory> {
    let status = status.to_lowercase();
    rules
        .iter()
        .find(|rule| status.contains(&rule.keyword.to_lowercase()))
        .map(|rule| rule.category)
}

/// Count per-collaborator categories over one calendar month.
/// Only records dated inside `month`/`year` participate; collaborators
/// absent from the period get no map entry.
pub fn aggregate(
    records: &[AttendanceRecord],
    month: u32,
    year: i32,
    rules: &[ClassifyRule],
) -> HashMap<String, AttendanceCounts> {
    let mut counts: HashMap<String, AttendanceCounts> = HashMap::new();
    for record in records {
        if !in_month(record.date, month, year) {
            continue;
        }
        let Some(category) = classify(&record.status, rules) else {
            continue;
        };
        counts
            .entry(record.collaborator_id.clone())
            .or_default()
            .bump(category);
    }
    counts
}
