use crate::errors::{AppError, AppResult};
use crate::store::TableId;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub code: String,                         // ⇔ Codigo (unique)
    pub name: String,                         // ⇔ Nombre
    pub registration_date: Option<NaiveDate>, // ⇔ FechaRegistro
    pub status: String,                       // ⇔ Estado ("Activo" on registration)
    pub client: String,                       // ⇔ Cliente
    pub contact: String,                      // ⇔ Contacto
    pub phone: String,                        // ⇔ Telefono
    pub timestamp: String,                    // ⇔ Timestamp
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub code: String,
    pub name: String,
    pub client: String,
    pub contact: String,
    pub phone: String,
}

impl Project {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.name.clone(),
            self.registration_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.status.clone(),
            self.client.clone(),
            self.contact.clone(),
            self.phone.clone(),
            self.timestamp.clone(),
        ]
    }

    pub fn from_row(row: &[String]) -> AppResult<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let code = cell(0).trim().to_string();
        if code.is_empty() {
            return Err(AppError::InvalidRow {
                sheet: TableId::Projects.sheet_name().to_string(),
                detail: "empty project code".to_string(),
            });
        }

        let registration_date = match cell(2).trim() {
            "" => None,
            s => Some(
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::InvalidDate(s.to_string()))?,
            ),
        };

        Ok(Project {
            code,
            name: cell(1).to_string(),
            registration_date,
            status: cell(3).to_string(),
            client: cell(4).to_string(),
            contact: cell(5).to_string(),
            phone: cell(6).to_string(),
            timestamp: cell(7).to_string(),
        })
    }
}
