//! Durable backend over SQLite. Sheets are stored as a generic cell
//! table `sheet_cell(sheet, row, col, value)` so every table shares one
//! schema; header titles are persisted separately and never surface as
//! data rows.

use crate::errors::{AppError, AppResult};
use crate::store::{Row, RowStore, TableId};
use rusqlite::{Connection, params};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> AppResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sheet_header (
                 sheet TEXT NOT NULL,
                 col   INTEGER NOT NULL,
                 title TEXT NOT NULL,
                 PRIMARY KEY (sheet, col)
             );
             CREATE TABLE IF NOT EXISTS sheet_cell (
                 sheet TEXT NOT NULL,
                 row   INTEGER NOT NULL,
                 col   INTEGER NOT NULL,
                 value TEXT NOT NULL,
                 PRIMARY KEY (sheet, row, col)
             );",
        )?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO sheet_header (sheet, col, title) VALUES (?1, ?2, ?3)",
        )?;
        for table in TableId::ALL {
            for (col, title) in table.headers().iter().enumerate() {
                stmt.execute(params![table.sheet_name(), col as i64, title])?;
            }
        }
        Ok(())
    }

    fn row_count(&self, table: TableId) -> AppResult<usize> {
        let n: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(row) + 1, 0) FROM sheet_cell WHERE sheet = ?1",
            [table.sheet_name()],
            |r| r.get(0),
        )?;
        Ok(n as usize)
    }

    fn check_range(&self, table: TableId, row: usize) -> AppResult<()> {
        if row >= self.row_count(table)? {
            return Err(AppError::Store(format!(
                "row {} out of range in '{}'",
                row,
                table.sheet_name()
            )));
        }
        Ok(())
    }
}

impl RowStore for SqliteStore {
    fn read_all(&self, table: TableId) -> AppResult<Vec<Row>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT row, col, value FROM sheet_cell
             WHERE sheet = ?1
             ORDER BY row ASC, col ASC",
        )?;

        let mut rows = vec![Row::new(); self.row_count(table)?];
        let mut cells = stmt.query([table.sheet_name()])?;
        while let Some(cell) = cells.next()? {
            let row: i64 = cell.get(0)?;
            let col: i64 = cell.get(1)?;
            let value: String = cell.get(2)?;
            let target = &mut rows[row as usize];
            if target.len() <= col as usize {
                target.resize(col as usize + 1, String::new());
            }
            target[col as usize] = value;
        }
        Ok(rows)
    }

    fn append_row(&mut self, table: TableId, row: Row) -> AppResult<usize> {
        let index = self.row_count(table)?;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO sheet_cell (sheet, row, col, value) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (col, value) in row.iter().enumerate() {
                stmt.execute(params![table.sheet_name(), index as i64, col as i64, value])?;
            }
        }
        tx.commit()?;
        Ok(index)
    }

    fn update_cell(&mut self, table: TableId, row: usize, col: usize, value: &str) -> AppResult<()> {
        self.check_range(table, row)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO sheet_cell (sheet, row, col, value)
             VALUES (?1, ?2, ?3, ?4)",
            params![table.sheet_name(), row as i64, col as i64, value],
        )?;
        Ok(())
    }

    fn delete_row(&mut self, table: TableId, row: usize) -> AppResult<()> {
        self.check_range(table, row)?;
        // Delete-then-shift keeps indices dense, like removing a sheet row.
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM sheet_cell WHERE sheet = ?1 AND row = ?2",
            params![table.sheet_name(), row as i64],
        )?;
        // Two passes via negative temporaries: a single `row = row - 1`
        // can trip the (sheet, row, col) primary key mid-update because
        // SQLite checks the constraint per row in unspecified order.
        tx.execute(
            "UPDATE sheet_cell SET row = -row WHERE sheet = ?1 AND row > ?2",
            params![table.sheet_name(), row as i64],
        )?;
        tx.execute(
            "UPDATE sheet_cell SET row = -row - 1 WHERE sheet = ?1 AND row < 0",
            params![table.sheet_name()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn find_row_index(
        &self,
        table: TableId,
        key_col: usize,
        key: &str,
    ) -> AppResult<Option<usize>> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT row FROM sheet_cell
                 WHERE sheet = ?1 AND col = ?2 AND TRIM(value) = ?3
                 ORDER BY row ASC LIMIT 1",
                params![table.sheet_name(), key_col as i64, key.trim()],
                |r| r.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(found.map(|r| r as usize))
    }
}
