//! Spreadsheet-backed storage.
//!
//! The game keeps no state of its own; everything lives in named worksheets
//! of one spreadsheet. [`SheetStore`] is the narrow range-read/range-write
//! seam every repository goes through, so the backing service can be swapped
//! (Google Sheets in production, [`MemoryStore`] for local runs and tests).

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CellRange, Grid};

pub mod error;
pub mod memory;
pub mod retry;
pub mod sheets;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use retry::{RetryPolicy, RetryingStore};
pub use sheets::SheetsStore;

/// Shared handle held by application state.
pub type SharedStore = Arc<dyn SheetStore>;

/// One rectangular write inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetWrite {
    pub sheet: String,
    pub range: CellRange,
    pub values: Grid,
}

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Titles of every worksheet in the spreadsheet.
    async fn worksheets(&self) -> Result<Vec<String>, StoreError>;

    /// Read a rectangle. Trailing empty cells and rows may be omitted.
    async fn get(&self, sheet: &str, range: CellRange) -> Result<Grid, StoreError>;

    /// Overwrite a rectangle starting at its top-left corner.
    async fn update(&self, sheet: &str, range: CellRange, values: &Grid) -> Result<(), StoreError>;

    /// Apply several writes, possibly across worksheets, in one call.
    async fn batch_update(&self, writes: &[SheetWrite]) -> Result<(), StoreError>;

    /// Clear every value of a worksheet.
    async fn clear(&self, sheet: &str) -> Result<(), StoreError>;

    /// Append rows after the last non-empty row, all in one call.
    async fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError>;

    /// Every populated value of a worksheet.
    async fn get_all_values(&self, sheet: &str) -> Result<Grid, StoreError>;

    /// Read one cell; empty cells read as `None`.
    async fn get_cell(&self, sheet: &str, row: u32, col: u32) -> Result<Option<String>, StoreError> {
        let grid = self.get(sheet, CellRange::cell(row, col)).await?;
        Ok(grid
            .into_iter()
            .next()
            .and_then(|r| r.into_iter().next())
            .filter(|v| !v.is_empty()))
    }

    async fn append_row(&self, sheet: &str, row: &[String]) -> Result<(), StoreError> {
        self.append_rows(sheet, &[row.to_vec()]).await
    }

    async fn update_cell(&self, sheet: &str, row: u32, col: u32, value: &str) -> Result<(), StoreError> {
        self.update(sheet, CellRange::cell(row, col), &vec![vec![value.to_string()]])
            .await
    }
}
