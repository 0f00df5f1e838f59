//! System bootstrap: seed the configuration lists, the standard bonus
//! weights and the first administrator. Safe to run any number of times;
//! rows already present are left alone.

use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::store::{RowStore, TableId};
use crate::utils::text::norm_email;
use crate::utils::now_stamp;
use tracing::debug;

const CONFIG_LISTS: &[(&str, &[&str])] = &[
    (
        "Cargos",
        &["Técnico", "Ayudante", "Supervisor", "Administrativo", "Gerente"],
    ),
    (
        "Departamentos",
        &["Producción", "Calidad", "Administración", "Gerencia"],
    ),
    (
        "EstadosAsistencia",
        &[
            "Trabajado",
            "Falta Justificada",
            "Falta Injustificada",
            "Licencia Médica",
        ],
    ),
    (
        "Asignaciones",
        &["Turno Mañana", "Turno Tarde", "Obra Principal"],
    ),
    ("Vehiculos", &["Camioneta 1", "Camioneta 2", "No Aplica"]),
    (
        "TiposMovimientoCaja",
        &["Viáticos", "Combustible", "Materiales", "Herramientas"],
    ),
];

/// Seed every table the system needs. `admin_email` becomes the first
/// `ADMINISTRADOR` entry when the user table does not know it yet.
pub fn seed(store: &mut dyn RowStore, cfg: &AppConfig, admin_email: &str) -> AppResult<()> {
    seed_config_lists(store)?;
    seed_standard_weights(store, cfg)?;
    seed_admin(store, admin_email)?;
    debug!("store seeded");
    Ok(())
}

fn seed_config_lists(store: &mut dyn RowStore) -> AppResult<()> {
    let existing = store.read_all(TableId::Config)?;
    for (list, values) in CONFIG_LISTS {
        let present = existing
            .iter()
            .any(|r| r.first().map(|c| c.trim() == *list).unwrap_or(false));
        if present {
            continue;
        }
        for value in *values {
            store.append_row(
                TableId::Config,
                vec![(*list).to_string(), (*value).to_string()],
            )?;
        }
    }
    Ok(())
}

fn seed_standard_weights(store: &mut dyn RowStore, cfg: &AppConfig) -> AppResult<()> {
    for seed in &cfg.standard_weights {
        if store
            .find_row_index(TableId::WeightsStandard, 0, &seed.job_title)?
            .is_none()
        {
            store.append_row(
                TableId::WeightsStandard,
                vec![seed.job_title.clone(), seed.weight.to_string()],
            )?;
        }
    }
    Ok(())
}

fn seed_admin(store: &mut dyn RowStore, admin_email: &str) -> AppResult<()> {
    let email = norm_email(admin_email);
    if email.is_empty() {
        return Ok(());
    }
    if store.find_row_index(TableId::Users, 0, &email)?.is_none() {
        store.append_row(TableId::Users, vec![email, "ADMINISTRADOR".to_string()])?;
        store.append_row(
            TableId::Log,
            vec![
                now_stamp(),
                "seed".to_string(),
                "Usuarios".to_string(),
                "initial administrator".to_string(),
            ],
        )?;
    }
    Ok(())
}
