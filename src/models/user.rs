use serde::Serialize;

/// Application role as stored in the `Usuarios` sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,     // "ADMINISTRADOR"
    Assistant, // "ASISTENTE"
    NoAccess,  // "SIN_ACCESO"
}

impl Role {
    pub fn to_sheet_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMINISTRADOR",
            Role::Assistant => "ASISTENTE",
            Role::NoAccess => "SIN_ACCESO",
        }
    }

    /// Parse a stored role cell (case-insensitive, trimmed). `None` for
    /// anything the table should not contain.
    pub fn from_sheet_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ADMINISTRADOR" => Some(Role::Admin),
            "ASISTENTE" => Some(Role::Assistant),
            "SIN_ACCESO" => Some(Role::NoAccess),
            _ => None,
        }
    }

    pub fn can_mutate(&self) -> bool {
        !matches!(self, Role::NoAccess)
    }
}
