//! In-process [`SheetStore`] mirroring the read semantics of a hosted sheet.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{SheetStore, SheetWrite, StoreError};
use crate::domain::{CellRange, Grid};

#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: RwLock<HashMap<String, Grid>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with empty worksheets.
    pub fn with_worksheets<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for title in titles {
            store.add_worksheet(title);
        }
        store
    }

    pub fn add_worksheet(&self, title: impl Into<String>) {
        self.sheets.write().entry(title.into()).or_default();
    }

    pub fn remove_worksheet(&self, title: &str) {
        self.sheets.write().remove(title);
    }

    fn write_block(grid: &mut Grid, range: CellRange, values: &Grid) -> Result<(), StoreError> {
        if values.len() > range.rows() as usize
            || values.iter().any(|r| r.len() > range.cols() as usize)
        {
            return Err(StoreError::Rejected(format!(
                "values do not fit range {range}"
            )));
        }
        for (dr, row) in values.iter().enumerate() {
            let r = range.start_row as usize - 1 + dr;
            if grid.len() <= r {
                grid.resize_with(r + 1, Vec::new);
            }
            for (dc, value) in row.iter().enumerate() {
                let c = range.start_col as usize - 1 + dc;
                let target = &mut grid[r];
                if target.len() <= c {
                    target.resize(c + 1, String::new());
                }
                target[c] = value.clone();
            }
        }
        Ok(())
    }
}

/// Drop trailing empty cells of each row, then trailing empty rows.
fn trim(mut grid: Grid) -> Grid {
    for row in grid.iter_mut() {
        while row.last().is_some_and(|v| v.is_empty()) {
            row.pop();
        }
    }
    while grid.last().is_some_and(|r| r.is_empty()) {
        grid.pop();
    }
    grid
}

fn not_found(sheet: &str) -> StoreError {
    StoreError::WorksheetNotFound(sheet.to_string())
}

#[async_trait]
impl SheetStore for MemoryStore {
    async fn worksheets(&self) -> Result<Vec<String>, StoreError> {
        let mut titles: Vec<String> = self.sheets.read().keys().cloned().collect();
        titles.sort();
        Ok(titles)
    }

    async fn get(&self, sheet: &str, range: CellRange) -> Result<Grid, StoreError> {
        let sheets = self.sheets.read();
        let grid = sheets.get(sheet).ok_or_else(|| not_found(sheet))?;
        let block: Grid = (range.start_row..=range.end_row)
            .map(|row| {
                let source = grid.get(row as usize - 1);
                (range.start_col..=range.end_col)
                    .map(|col| {
                        source
                            .and_then(|r| r.get(col as usize - 1))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        Ok(trim(block))
    }

    async fn update(&self, sheet: &str, range: CellRange, values: &Grid) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write();
        let grid = sheets.get_mut(sheet).ok_or_else(|| not_found(sheet))?;
        Self::write_block(grid, range, values)
    }

    async fn batch_update(&self, writes: &[SheetWrite]) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write();
        // Check every target exists first so a missing worksheet leaves nothing half-written.
        if let Some(missing) = writes.iter().find(|w| !sheets.contains_key(&w.sheet)) {
            return Err(not_found(&missing.sheet));
        }
        for write in writes {
            if let Some(grid) = sheets.get_mut(&write.sheet) {
                Self::write_block(grid, write.range, &write.values)?;
            }
        }
        Ok(())
    }

    async fn clear(&self, sheet: &str) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write();
        let grid = sheets.get_mut(sheet).ok_or_else(|| not_found(sheet))?;
        grid.clear();
        Ok(())
    }

    async fn append_rows(&self, sheet: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write();
        let grid = sheets.get_mut(sheet).ok_or_else(|| not_found(sheet))?;
        let last_used = grid
            .iter()
            .rposition(|r| r.iter().any(|v| !v.is_empty()))
            .map_or(0, |i| i + 1);
        grid.truncate(last_used);
        grid.extend(rows.iter().cloned());
        Ok(())
    }

    async fn get_all_values(&self, sheet: &str) -> Result<Grid, StoreError> {
        let sheets = self.sheets.read();
        let grid = sheets.get(sheet).ok_or_else(|| not_found(sheet))?;
        Ok(trim(grid.clone()))
    }
}
