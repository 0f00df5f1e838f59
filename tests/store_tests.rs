mod common;

use common::*;
use rnomina::store::{MemoryStore, RowStore, SqliteStore, TableId, seed};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn adapter_contract(store: &mut dyn RowStore) {
    assert!(store.read_all(TableId::Projects).unwrap().is_empty());

    let first = store
        .append_row(TableId::Projects, row(&["P-1", "Torre Norte"]))
        .unwrap();
    let second = store
        .append_row(TableId::Projects, row(&["P-2", "Torre Sur"]))
        .unwrap();
    let third = store
        .append_row(TableId::Projects, row(&["P-3", "Obra Este"]))
        .unwrap();
    assert_eq!((first, second, third), (0, 1, 2));

    // keyed lookup, trim-exact
    assert_eq!(
        store.find_row_index(TableId::Projects, 0, " P-2 ").unwrap(),
        Some(1)
    );
    assert_eq!(
        store.find_row_index(TableId::Projects, 0, "P-9").unwrap(),
        None
    );

    store.update_cell(TableId::Projects, 1, 1, "Torre Sur II").unwrap();
    // writing past the current row width grows the row
    store.update_cell(TableId::Projects, 1, 3, "Activo").unwrap();
    let rows = store.read_all(TableId::Projects).unwrap();
    assert_eq!(rows[1], row(&["P-2", "Torre Sur II", "", "Activo"]));

    // deleting shifts the rows after it up by one
    store.delete_row(TableId::Projects, 0).unwrap();
    let rows = store.read_all(TableId::Projects).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "P-2");
    assert_eq!(
        store.find_row_index(TableId::Projects, 0, "P-3").unwrap(),
        Some(1)
    );

    // out-of-range indices are store errors
    assert!(store.update_cell(TableId::Projects, 9, 0, "x").is_err());
    assert!(store.delete_row(TableId::Projects, 9).is_err());
}

#[test]
fn memory_store_contract() {
    let mut store = MemoryStore::new();
    adapter_contract(&mut store);
}

#[test]
fn sqlite_store_contract() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    adapter_contract(&mut store);
}

#[test]
fn sqlite_store_persists_to_disk() {
    let path = temp_out("sqlite_persist", "sqlite");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store
            .append_row(TableId::Projects, row(&["P-1", "Torre Norte"]))
            .unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    let rows = store.read_all(TableId::Projects).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Torre Norte");
    std::fs::remove_file(&path).ok();
}

#[test]
fn seeding_is_idempotent() {
    let mut store = seeded_store();
    let config_rows = store.read_all(TableId::Config).unwrap().len();
    let weight_rows = store.read_all(TableId::WeightsStandard).unwrap().len();
    let user_rows = store.read_all(TableId::Users).unwrap().len();

    seed(&mut store, &cfg(), "admin@example.com").unwrap();

    assert_eq!(store.read_all(TableId::Config).unwrap().len(), config_rows);
    assert_eq!(
        store.read_all(TableId::WeightsStandard).unwrap().len(),
        weight_rows
    );
    assert_eq!(store.read_all(TableId::Users).unwrap().len(), user_rows);
}

#[test]
fn seed_registers_the_initial_admin() {
    let store = seeded_store();
    let users = store.read_all(TableId::Users).unwrap();
    assert!(
        users
            .iter()
            .any(|r| r[0] == "admin@example.com" && r[1] == "ADMINISTRADOR")
    );
}

#[test]
fn mutations_leave_an_audit_trail() {
    let mut store = seeded_store();
    let before = store.read_all(TableId::Log).unwrap().len();
    add_collaborator(&mut store, "C001", "Ana Pérez", "Técnico", 900000);
    let log = store.read_all(TableId::Log).unwrap();
    assert_eq!(log.len(), before + 1);
    let last = log.last().unwrap();
    assert_eq!(last[1], "register_collaborator");
    assert_eq!(last[3], "C001");
}
