//! In-memory backend. Request-scoped work and tests run against this;
//! it mirrors the sheet semantics of the durable backend exactly.

use crate::errors::{AppError, AppResult};
use crate::store::{Row, RowStore, TableId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<TableId, Vec<Row>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self, table: TableId) -> &[Row] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    fn rows_mut(&mut self, table: TableId) -> &mut Vec<Row> {
        self.tables.entry(table).or_default()
    }

    fn out_of_range(table: TableId, row: usize) -> AppError {
        AppError::Store(format!(
            "row {} out of range in '{}'",
            row,
            table.sheet_name()
        ))
    }
}

impl RowStore for MemoryStore {
    fn read_all(&self, table: TableId) -> AppResult<Vec<Row>> {
        Ok(self.rows(table).to_vec())
    }

    fn append_row(&mut self, table: TableId, row: Row) -> AppResult<usize> {
        let rows = self.rows_mut(table);
        rows.push(row);
        Ok(rows.len() - 1)
    }

    fn update_cell(&mut self, table: TableId, row: usize, col: usize, value: &str) -> AppResult<()> {
        let rows = self.rows_mut(table);
        let target = rows
            .get_mut(row)
            .ok_or_else(|| Self::out_of_range(table, row))?;
        if target.len() <= col {
            target.resize(col + 1, String::new());
        }
        target[col] = value.to_string();
        Ok(())
    }

    fn delete_row(&mut self, table: TableId, row: usize) -> AppResult<()> {
        let rows = self.rows_mut(table);
        if row >= rows.len() {
            return Err(Self::out_of_range(table, row));
        }
        rows.remove(row);
        Ok(())
    }

    fn find_row_index(
        &self,
        table: TableId,
        key_col: usize,
        key: &str,
    ) -> AppResult<Option<usize>> {
        let key = key.trim();
        Ok(self.rows(table).iter().position(|r| {
            r.get(key_col)
                .map(|cell| cell.trim() == key)
                .unwrap_or(false)
        }))
    }
}
