//! Operations audit trail. Every mutating operation appends one line to
//! the `Log` table after it succeeds.

use crate::errors::AppResult;
use crate::store::{RowStore, TableId};
use crate::utils::now_stamp;

pub fn record(
    store: &mut dyn RowStore,
    operation: &str,
    target: &str,
    detail: &str,
) -> AppResult<()> {
    store.append_row(
        TableId::Log,
        vec![
            now_stamp(),
            operation.to_string(),
            target.to_string(),
            detail.to_string(),
        ],
    )?;
    Ok(())
}
