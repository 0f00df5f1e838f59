mod common;

use common::*;
use rnomina::core::calculator::balance::{compute_balances, compute_running_balance};
use rnomina::core::ledger::LedgerLogic;
use rnomina::errors::AppError;
use rnomina::models::{MovementKind, NewMovement, Role, VoucherStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn new_movement(kind: MovementKind, amount: i64) -> NewMovement {
    NewMovement {
        collaborator_id: "C001".to_string(),
        record_type: "Viáticos".to_string(),
        kind,
        amount: Decimal::from(amount),
        detail: "anticipo".to_string(),
    }
}

#[test]
fn entry_and_exit_columns_are_mutually_exclusive() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    let receipt = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &new_movement(MovementKind::Exit, 5000),
    )
    .unwrap();
    assert_eq!(receipt.movement.exit, dec!(5000));
    assert_eq!(receipt.movement.entry, dec!(0));

    let receipt = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &new_movement(MovementKind::Entry, 2000),
    )
    .unwrap();
    assert_eq!(receipt.movement.entry, dec!(2000));
    assert_eq!(receipt.movement.exit, dec!(0));

    for mv in LedgerLogic::movements(&store).unwrap() {
        assert!(mv.entry.is_zero() || mv.exit.is_zero());
    }
}

#[test]
fn movement_validation() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    let unknown_collab = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &NewMovement {
            collaborator_id: "C999".to_string(),
            ..new_movement(MovementKind::Exit, 100)
        },
    );
    assert!(matches!(unknown_collab, Err(AppError::NotFound(_))));

    let unknown_type = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &NewMovement {
            record_type: "Cafetería".to_string(),
            ..new_movement(MovementKind::Exit, 100)
        },
    );
    assert!(matches!(unknown_type, Err(AppError::Validation(_))));

    let zero = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &new_movement(MovementKind::Exit, 0),
    );
    assert!(matches!(zero, Err(AppError::InvalidAmount(_))));
}

#[test]
fn transaction_ids_are_unique_and_increasing() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    let mut previous = 0i64;
    for _ in 0..5 {
        let receipt = LedgerLogic::record_movement(
            &mut store,
            Role::Admin,
            &StubVoucher,
            &cfg(),
            &new_movement(MovementKind::Entry, 100),
        )
        .unwrap();
        let millis: i64 = receipt
            .movement
            .transaction_id
            .strip_prefix("TX-")
            .unwrap()
            .parse()
            .unwrap();
        assert!(millis > previous);
        previous = millis;
    }
}

#[test]
fn exit_movement_gets_a_voucher() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    let receipt = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &new_movement(MovementKind::Exit, 5000),
    )
    .unwrap();

    assert!(receipt.voucher_error.is_none());
    let refs = receipt.voucher.unwrap();
    assert!(refs.pdf_file_id.starts_with("pdf-TX-"));

    let stored = &LedgerLogic::movements(&store).unwrap()[0];
    assert_eq!(stored.voucher_status, VoucherStatus::Issued);
    assert_eq!(stored.voucher_pdf_id, refs.pdf_file_id);
    assert_eq!(stored.voucher_url, refs.document_url);
}

#[test]
fn notify_failure_is_non_fatal() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    let receipt = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &FailingNotify,
        &cfg(),
        &new_movement(MovementKind::Exit, 5000),
    )
    .unwrap();

    // movement persisted with its references, delivery failure reported
    assert!(receipt.voucher_error.is_some());
    let stored = &LedgerLogic::movements(&store).unwrap()[0];
    assert_eq!(stored.exit, dec!(5000));
    assert_eq!(stored.voucher_status, VoucherStatus::Failed);
    assert!(!stored.voucher_pdf_id.is_empty());

    // manual re-trigger with a working channel succeeds
    let tx = receipt.movement.transaction_id.clone();
    LedgerLogic::resend_voucher(&mut store, Role::Admin, &StubVoucher, &cfg(), &tx).unwrap();
    let stored = &LedgerLogic::movements(&store).unwrap()[0];
    assert_eq!(stored.voucher_status, VoucherStatus::Issued);
}

#[test]
fn resend_for_an_entry_movement_is_a_validation_error() {
    let mut store = seeded_store();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);

    let receipt = LedgerLogic::record_movement(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &new_movement(MovementKind::Entry, 100),
    )
    .unwrap();

    let err = LedgerLogic::resend_voucher(
        &mut store,
        Role::Admin,
        &StubVoucher,
        &cfg(),
        &receipt.movement.transaction_id,
    );
    assert!(matches!(err, Err(AppError::Validation(_))));
}

#[test]
fn only_positive_balances_are_reported() {
    // entries 100 + 200, exit 50 → balance 50 - 300 = -250, dropped
    let movements = vec![
        movement("TX-1", "C001", "Ana Pérez", "Viáticos", 100, 0, "2024-03-01"),
        movement("TX-2", "C001", "Ana Pérez", "Viáticos", 200, 0, "2024-03-02"),
        movement("TX-3", "C001", "Ana Pérez", "Viáticos", 0, 50, "2024-03-03"),
        // separate record type with an outstanding debt
        movement("TX-4", "C001", "Ana Pérez", "Combustible", 0, 80, "2024-03-04"),
        movement("TX-5", "C002", "Luis Soto", "Viáticos", 0, 120, "2024-03-05"),
    ];

    let lines = compute_balances(&movements, None);
    assert_eq!(lines.len(), 2);
    assert!(
        lines
            .iter()
            .all(|l| !(l.collaborator_id == "C001" && l.record_type == "Viáticos"))
    );
    let fuel = lines
        .iter()
        .find(|l| l.record_type == "Combustible")
        .unwrap();
    assert_eq!(fuel.balance, dec!(80));

    let filtered = compute_balances(&movements, Some("luis"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].collaborator_id, "C002");
}

#[test]
fn running_balance_follows_stored_row_order() {
    // rows deliberately out of date order; the cumulative column must
    // follow storage order, not the calendar
    let movements = vec![
        movement("TX-1", "C001", "Ana Pérez", "Viáticos", 0, 300, "2024-03-05"),
        movement("TX-2", "C001", "Ana Pérez", "Viáticos", 100, 0, "2024-03-02"),
        movement("TX-3", "C001", "Ana Pérez", "Viáticos", 0, 50, "2024-03-09"),
        // outside the window
        movement("TX-4", "C001", "Ana Pérez", "Viáticos", 0, 999, "2024-04-01"),
    ];

    let (lines, totals) =
        compute_running_balance(&movements, d("2024-03-01"), d("2024-03-31"), None);
    let running: Vec<Decimal> = lines.iter().map(|l| l.running).collect();
    assert_eq!(running, vec![dec!(300), dec!(200), dec!(250)]);
    assert_eq!(totals.entries, dec!(100));
    assert_eq!(totals.exits, dec!(350));
    assert_eq!(totals.difference, dec!(250));
}

#[test]
fn running_balance_type_filter() {
    let movements = vec![
        movement("TX-1", "C001", "Ana Pérez", "Viáticos", 0, 300, "2024-03-05"),
        movement("TX-2", "C001", "Ana Pérez", "Combustible", 0, 40, "2024-03-06"),
    ];
    let (lines, totals) = compute_running_balance(
        &movements,
        d("2024-03-01"),
        d("2024-03-31"),
        Some("Combustible"),
    );
    assert_eq!(lines.len(), 1);
    assert_eq!(totals.exits, dec!(40));
}
