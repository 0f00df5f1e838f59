//! Petty-cash balance computations.
//! Debt balances are exits minus entries: a positive number means the
//! collaborator still owes receipts (or repayment) against disbursed
//! cash.

use crate::models::CashMovement;
use crate::utils::text::contains_ci;
use crate::utils::{in_window, stamp_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct BalanceLine {
    pub collaborator_id: String,
    pub collaborator_name: String,
    pub record_type: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunningLine {
    pub transaction_id: String,
    pub collaborator_id: String,
    pub collaborator_name: String,
    pub record_type: String,
    pub detail: String,
    pub entry: Decimal,
    pub exit: Decimal,
    /// Cumulative exits − entries up to and including this movement.
    pub running: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    pub entries: Decimal,
    pub exits: Decimal,
    pub difference: Decimal,
}

/// Outstanding balances grouped by (collaborator, record type).
/// Only strictly positive balances are reported: the ledger surfaces
/// debts, settled or over-reimbursed pairs are dropped. The free-text
/// filter applies after aggregation, over id, name and record type.
pub fn compute_balances(movements: &[CashMovement], filter: Option<&str>) -> Vec<BalanceLine> {
    let mut groups: BTreeMap<(String, String), (String, Decimal)> = BTreeMap::new();
    for mv in movements {
        let key = (mv.collaborator_id.clone(), mv.record_type.clone());
        let slot = groups
            .entry(key)
            .or_insert_with(|| (mv.collaborator_name.clone(), Decimal::ZERO));
        slot.1 += mv.exit - mv.entry;
    }

    groups
        .into_iter()
        .filter(|(_, (_, balance))| *balance > Decimal::ZERO)
        .map(|((id, record_type), (name, balance))| BalanceLine {
            collaborator_id: id,
            collaborator_name: name,
            record_type,
            balance,
        })
        .filter(|line| match filter {
            Some(needle) if !needle.trim().is_empty() => {
                contains_ci(&line.collaborator_id, needle)
                    || contains_ci(&line.collaborator_name, needle)
                    || contains_ci(&line.record_type, needle)
            }
            _ => true,
        })
        .collect()
}

/// Running balance over the stored row order. Movements are never
/// re-sorted by date, the cumulative column follows the ledger as it
/// was written. The window and the optional record-type filter decide
/// which rows participate.
pub fn compute_running_balance(
    movements: &[CashMovement],
    from: NaiveDate,
    to: NaiveDate,
    type_filter: Option<&str>,
) -> (Vec<RunningLine>, LedgerTotals) {
    let mut lines = Vec::new();
    let mut totals = LedgerTotals::default();
    let mut running = Decimal::ZERO;

    for mv in movements {
        let Some(date) = stamp_date(&mv.timestamp) else {
            continue;
        };
        if !in_window(date, from, to) {
            continue;
        }
        if let Some(t) = type_filter
            && !t.trim().is_empty()
            && !mv.record_type.eq_ignore_ascii_case(t.trim())
        {
            continue;
        }

        running += mv.exit - mv.entry;
        totals.entries += mv.entry;
        totals.exits += mv.exit;
        lines.push(RunningLine {
            transaction_id: mv.transaction_id.clone(),
            collaborator_id: mv.collaborator_id.clone(),
            collaborator_name: mv.collaborator_name.clone(),
            record_type: mv.record_type.clone(),
            detail: mv.detail.clone(),
            entry: mv.entry,
            exit: mv.exit,
            running,
        });
    }

    totals.difference = totals.exits - totals.entries;
    (lines, totals)
}
