//! Player board worksheets.

use crate::domain::board::from_preset;
use crate::domain::{range_for, Cell, CellRange, Grid};
use crate::store::{SheetStore, SheetWrite, StoreError};

/// Read the `n`×`n` active region. Rows may come back short or missing.
pub async fn read_board(store: &dyn SheetStore, sheet: &str, n: u32) -> Result<Grid, StoreError> {
    store.get(sheet, range_for(n)).await
}

/// Write one cell (1-based row/col).
pub async fn write_cell(
    store: &dyn SheetStore,
    sheet: &str,
    row: u32,
    col: u32,
    cell: Cell,
) -> Result<(), StoreError> {
    store.update_cell(sheet, row, col, cell.as_str()).await
}

/// Rewrite the whole fixed-size block for a fresh round in a single call.
pub async fn reset_board(
    store: &dyn SheetStore,
    sheet: &str,
    n: usize,
    preset: &Grid,
) -> Result<(), StoreError> {
    store
        .update(sheet, CellRange::full_board(), &from_preset(preset, n))
        .await
}

/// Reset several boards with one batched write. Every sheet must exist.
pub async fn reset_boards(
    store: &dyn SheetStore,
    sheets: &[String],
    n: usize,
    preset: &Grid,
) -> Result<(), StoreError> {
    let board = from_preset(preset, n);
    let writes: Vec<SheetWrite> = sheets
        .iter()
        .map(|sheet| SheetWrite {
            sheet: sheet.clone(),
            range: CellRange::full_board(),
            values: board.clone(),
        })
        .collect();
    store.batch_update(&writes).await
}

/// Clear every value on a board worksheet.
pub async fn clear_board(store: &dyn SheetStore, sheet: &str) -> Result<(), StoreError> {
    store.clear(sheet).await
}

/// Split `players` into worksheets that exist and ones that do not.
pub async fn partition_existing(
    store: &dyn SheetStore,
    players: &[String],
) -> Result<(Vec<String>, Vec<String>), StoreError> {
    let titles = store.worksheets().await?;
    Ok(players
        .iter()
        .cloned()
        .partition(|p| titles.iter().any(|t| t == p)))
}
