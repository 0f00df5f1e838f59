//! Bonus matrix and weighted distribution.

use crate::models::{AttendanceRecord, CollabRef, StandardWeight, WeightEntry};
use crate::utils::in_window;
use crate::utils::text::contains_ci;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Project key out of a free-text assignment.
///
/// An assignment mentioning the PROYECTO token names a project: the key
/// is what follows the first colon, or the text with the leading token
/// stripped. Any other assignment (a shift, a worksite) is its own key.
/// `None` when nothing is left after trimming.
pub fn derive_project_key(assignment: &str) -> Option<String> {
    let trimmed = assignment.trim();
    if trimmed.is_empty() {
        return None;
    }

    let key = if trimmed.to_lowercase().contains("proyecto") {
        match trimmed.split_once(':') {
            Some((_, rest)) => rest.trim().to_string(),
            None => {
                let leading = Regex::new(r"(?i)^proyecto\b[\s:.-]*").unwrap();
                leading.replace(trimmed, "").trim().to_string()
            }
        }
    } else {
        trimmed.to_string()
    };

    if key.is_empty() { None } else { Some(key) }
}

/// Project × collaborator day counts over a date window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceMatrix {
    /// Lexicographically sorted project keys.
    pub projects: Vec<String>,
    /// Lexicographically sorted by id.
    pub collaborators: Vec<CollabRef>,
    /// project → collaborator id → attended days.
    pub counts: BTreeMap<String, BTreeMap<String, u32>>,
}

impl AttendanceMatrix {
    pub fn days(&self, project: &str, collaborator_id: &str) -> u32 {
        self.counts
            .get(project)
            .and_then(|per| per.get(collaborator_id))
            .copied()
            .unwrap_or(0)
    }
}

/// One attended day adds one unit to `counts[project][collaborator]`.
/// Records without a derivable project key are excluded; the optional
/// search narrows by project key, collaborator id or name.
pub fn build_attendance_matrix(
    records: &[AttendanceRecord],
    names: &HashMap<String, String>,
    from: NaiveDate,
    to: NaiveDate,
    search: Option<&str>,
) -> AttendanceMatrix {
    let mut counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    let mut collaborators: BTreeMap<String, String> = BTreeMap::new();

    for record in records {
        if !in_window(record.date, from, to) {
            continue;
        }
        let Some(project) = derive_project_key(&record.assignment) else {
            continue;
        };
        let id = record.collaborator_id.trim().to_string();
        if id.is_empty() {
            continue;
        }
        let name = names.get(&id).cloned().unwrap_or_default();

        if let Some(needle) = search
            && !needle.trim().is_empty()
            && !(contains_ci(&project, needle)
                || contains_ci(&id, needle)
                || contains_ci(&name, needle))
        {
            continue;
        }

        *counts
            .entry(project)
            .or_default()
            .entry(id.clone())
            .or_insert(0) += 1;
        collaborators.entry(id).or_insert(name);
    }

    AttendanceMatrix {
        projects: counts.keys().cloned().collect(),
        collaborators: collaborators
            .into_iter()
            .map(|(id, name)| CollabRef { id, name })
            .collect(),
        counts,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusLine {
    pub project: String,
    pub collaborator_id: String,
    pub collaborator_name: String,
    pub days: u32,
    pub weight: Decimal,
    pub share: Decimal,
}

/// Distribute each project's bonus across its collaborators,
/// proportionally to weight × days. Weight precedence: explicit
/// (project, collaborator) entry, then standard weight for the job
/// title, then zero. A project whose weighted-day sum is zero pays
/// zero shares, never dividing by zero.
pub fn distribute_bonuses(
    matrix: &AttendanceMatrix,
    weights: &[WeightEntry],
    standard: &[StandardWeight],
    job_titles: &HashMap<String, String>,
    totals: &HashMap<String, Decimal>,
) -> Vec<BonusLine> {
    let explicit: HashMap<(&str, &str), Decimal> = weights
        .iter()
        .map(|w| ((w.project.as_str(), w.collaborator_id.as_str()), w.weight))
        .collect();
    let by_title: HashMap<&str, Decimal> = standard
        .iter()
        .map(|s| (s.job_title.as_str(), s.weight))
        .collect();

    let weight_of = |project: &str, collab: &CollabRef| -> Decimal {
        if let Some(w) = explicit.get(&(project, collab.id.as_str())) {
            return *w;
        }
        job_titles
            .get(&collab.id)
            .and_then(|title| by_title.get(title.as_str()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    };

    let mut lines = Vec::new();
    for project in &matrix.projects {
        let total = totals.get(project).copied().unwrap_or(Decimal::ZERO);

        let participants: Vec<(&CollabRef, u32, Decimal)> = matrix
            .collaborators
            .iter()
            .filter_map(|collab| {
                let days = matrix.days(project, &collab.id);
                (days > 0).then(|| (collab, days, weight_of(project, collab)))
            })
            .collect();

        let denominator: Decimal = participants
            .iter()
            .map(|(_, days, weight)| *weight * Decimal::from(*days))
            .sum();

        for (collab, days, weight) in participants {
            let weighted = weight * Decimal::from(days);
            let share = if denominator.is_zero() {
                Decimal::ZERO
            } else {
                (total * weighted / denominator).round_dp(2)
            };
            lines.push(BonusLine {
                project: project.clone(),
                collaborator_id: collab.id.clone(),
                collaborator_name: collab.name.clone(),
                days,
                weight,
                share,
            });
        }
    }
    lines
}
