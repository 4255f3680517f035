use crate::domain::{Grid, PresetTable};
use crate::store::{SheetStore, StoreError};

/// Raw preset flags for an active round; rounds without a region yield an empty grid.
pub async fn load_preset(
    store: &dyn SheetStore,
    presets_sheet: &str,
    table: &PresetTable,
    round: u8,
) -> Result<Grid, StoreError> {
    match table.range_for_round(round) {
        Some(range) => store.get(presets_sheet, range).await,
        None => Ok(Grid::new()),
    }
}
