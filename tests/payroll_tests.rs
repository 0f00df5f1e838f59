mod common;

use common::*;
use rnomina::core::calculator::aggregate::{aggregate, classify};
use rnomina::core::payroll::PayrollLogic;
use rnomina::models::AttendanceCategory;
use rust_decimal_macros::dec;

#[test]
fn classification_partitions_the_period() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    push_attendance(&mut store, 1, "C001", "2024-03-01", "Trabajado", "");
    push_attendance(&mut store, 2, "C001", "2024-03-02", "Falta Justificada", "");
    push_attendance(&mut store, 3, "C001", "2024-03-03", "Falta Injustificada", "");
    push_attendance(&mut store, 4, "C001", "2024-03-04", "Licencia Médica", "");
    push_attendance(&mut store, 5, "C001", "2024-03-05", "Vacaciones", "");
    // outside the month, never counted
    push_attendance(&mut store, 6, "C001", "2024-04-01", "Trabajado", "");

    let records = rnomina::core::attendance::AttendanceLogic::load_all(&store).unwrap();
    let rules = cfg().classification_rules;
    let counts = aggregate(&records, 3, 2024, &rules);
    let c = counts["C001"];

    let in_period: Vec<_> = records
        .iter()
        .filter(|r| r.date.format("%Y-%m").to_string() == "2024-03")
        .collect();
    let unclassified = in_period
        .iter()
        .filter(|r| classify(&r.status, &rules).is_none())
        .count() as u32;

    assert_eq!(
        c.worked + c.justified_absence + c.unjustified_absence + c.medical_leave + unclassified,
        in_period.len() as u32
    );
    assert_eq!(unclassified, 1); // "Vacaciones" matches no rule
}

#[test]
fn unjustified_keyword_wins_over_justified() {
    let rules = cfg().classification_rules;
    assert_eq!(
        classify("Falta Injustificada", &rules),
        Some(AttendanceCategory::UnjustifiedAbsence)
    );
    assert_eq!(
        classify("Falta Justificada", &rules),
        Some(AttendanceCategory::JustifiedAbsence)
    );
    // case-insensitive substring
    assert_eq!(
        classify("  día TRABAJADO en obra ", &rules),
        Some(AttendanceCategory::Worked)
    );
    assert_eq!(classify("Permiso Especial", &rules), None);
}

#[test]
fn payable_days_exclude_unjustified_absences() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    // 20 worked + 1 justified + 1 leave + 3 unjustified = 22 payable
    for day in 1..=20 {
        push_attendance(
            &mut store,
            day,
            "C001",
            &format!("2024-03-{day:02}"),
            "Trabajado",
            "",
        );
    }
    push_attendance(&mut store, 21, "C001", "2024-03-21", "Falta Justificada", "");
    push_attendance(&mut store, 22, "C001", "2024-03-22", "Licencia Médica", "");
    for day in 23..=25 {
        push_attendance(
            &mut store,
            day,
            "C001",
            &format!("2024-03-{day:02}"),
            "Falta Injustificada",
            "",
        );
    }

    let lines = PayrollLogic::compute(&store, &cfg(), 3, 2024).unwrap();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line.payable_days, 22);
    assert_eq!(line.unjustified_absence, 3);
    // 900000 / 30 * 22, exact
    assert_eq!(line.computed_salary, dec!(660000));
}

#[test]
fn collaborator_without_records_appears_with_zeros() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);
    add_collaborator(&mut store, "C002", "Luis Soto", "Ayudante", 600000);
    push_attendance(&mut store, 1, "C001", "2024-03-01", "Trabajado", "");

    let lines = PayrollLogic::compute(&store, &cfg(), 3, 2024).unwrap();
    assert_eq!(lines.len(), 2);
    let idle = lines.iter().find(|l| l.collaborator_id == "C002").unwrap();
    assert_eq!(idle.payable_days, 0);
    assert_eq!(idle.computed_salary, dec!(0));
    assert_eq!(idle.base_salary, dec!(600000));
}

#[test]
fn inactive_collaborators_are_left_out() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);
    add_collaborator(&mut store, "C002", "Luis Soto", "Ayudante", 600000);
    rnomina::core::collaborators::CollaboratorLogic::set_status(
        &mut store,
        rnomina::models::Role::Admin,
        "C002",
        rnomina::models::CollabStatus::Inactive,
    )
    .unwrap();

    let lines = PayrollLogic::compute(&store, &cfg(), 3, 2024).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].collaborator_id, "C001");
}
