//! The round counter in the control worksheet.

use crate::config::game::ROUND_CELL;
use crate::domain::RoundState;
use crate::store::{SheetStore, StoreError};

/// Current round; a missing or unreadable cell counts as not started.
pub async fn get_round(store: &dyn SheetStore, control_sheet: &str) -> Result<RoundState, StoreError> {
    let (row, col) = ROUND_CELL;
    let raw = store.get_cell(control_sheet, row, col).await?;
    Ok(RoundState::from_cell(raw.as_deref()))
}

pub async fn set_round(
    store: &dyn SheetStore,
    control_sheet: &str,
    state: RoundState,
) -> Result<(), StoreError> {
    let (row, col) = ROUND_CELL;
    store
        .update_cell(control_sheet, row, col, &state.stored_value().to_string())
        .await
}
