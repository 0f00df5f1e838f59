//! Row Store Adapter: the only gateway to durable state.
//! Tables are sheets of string cells; data rows are 0-based and never
//! include the header row (headers are adapter bookkeeping).

use crate::errors::AppResult;

pub mod audit;
pub mod initialize;
pub mod memory;
pub mod sqlite;

pub use initialize::seed;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// One sheet row, positional cells as stored.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    Collaborators,
    Attendance,
    Config,
    Users,
    Projects,
    Ledger,
    Weights,
    WeightsStandard,
    BonusMatrix,
    Log,
}

impl TableId {
    pub const ALL: [TableId; 10] = [
        TableId::Collaborators,
        TableId::Attendance,
        TableId::Config,
        TableId::Users,
        TableId::Projects,
        TableId::Ledger,
        TableId::Weights,
        TableId::WeightsStandard,
        TableId::BonusMatrix,
        TableId::Log,
    ];

    /// Sheet name as it exists in the spreadsheet this store mirrors.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            TableId::Collaborators => "Colaboradores",
            TableId::Attendance => "RegistrosAsistencia",
            TableId::Config => "Configuracion",
            TableId::Users => "Usuarios",
            TableId::Projects => "Proyectos",
            TableId::Ledger => "CajaChica",
            TableId::Weights => "Ponderaciones",
            TableId::WeightsStandard => "PonderacionesEstandar",
            TableId::BonusMatrix => "MatrizBonos",
            TableId::Log => "Log",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            TableId::Collaborators => &[
                "ID_Colaborador",
                "NombreCompleto",
                "Cargo",
                "Departamento",
                "FechaIngreso",
                "SueldoBase",
                "Estado",
                "FechaCreacion",
            ],
            TableId::Attendance => &[
                "ID_Registro",
                "ID_Colaborador",
                "Fecha",
                "EstadoAsistencia",
                "Asignacion",
                "Vehiculo",
                "HorasTrabajadas",
                "Observaciones",
                "Timestamp",
            ],
            TableId::Config => &["Lista", "Valor"],
            TableId::Users => &["Email", "Rol"],
            TableId::Projects => &[
                "Codigo",
                "Nombre",
                "FechaRegistro",
                "Estado",
                "Cliente",
                "Contacto",
                "Telefono",
                "Timestamp",
            ],
            TableId::Ledger => &[
                "ID_Transaccion",
                "ID_Colaborador",
                "NombreColaborador",
                "TipoRegistro",
                "Entrada",
                "Salida",
                "Detalle",
                "Timestamp",
                "UrlComprobante",
                "ID_PDF",
                "EstadoComprobante",
            ],
            TableId::Weights => &["Proyecto", "ID_Colaborador", "Peso"],
            TableId::WeightsStandard => &["Cargo", "Peso"],
            TableId::BonusMatrix => &["Proyecto", "ID_Colaborador", "Dias"],
            TableId::Log => &["Fecha", "Operacion", "Objetivo", "Detalle"],
        }
    }
}

/// The five operations every backend must provide (object-safe so the
/// core can take `&mut dyn RowStore`).
///
/// Key matching in [`RowStore::find_row_index`] is trim-exact on the cell
/// text and returns the first match; callers keep the at-most-one-match
/// discipline by never inserting duplicate keys.
pub trait RowStore {
    /// Every data row of the table, in stored order.
    fn read_all(&self, table: TableId) -> AppResult<Vec<Row>>;

    /// Append a row at the end; returns its 0-based index.
    fn append_row(&mut self, table: TableId, row: Row) -> AppResult<usize>;

    fn update_cell(&mut self, table: TableId, row: usize, col: usize, value: &str) -> AppResult<()>;

    /// Remove a row; rows after it shift up by one.
    fn delete_row(&mut self, table: TableId, row: usize) -> AppResult<()>;

    fn find_row_index(
        &self,
        table: TableId,
        key_col: usize,
        key: &str,
    ) -> AppResult<Option<usize>>;
}
