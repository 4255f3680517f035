//! Append-only results log.

use crate::domain::{PlayerScore, ResultRow};
use crate::store::{SheetStore, StoreError};

/// Append a round marker followed by one row per player.
///
/// The whole round goes out as a single append, so the marker is never in
/// the log without its player rows.
pub async fn append_round(
    store: &dyn SheetStore,
    sheet: &str,
    round: u8,
    scores: &[PlayerScore],
) -> Result<(), StoreError> {
    let rows: Vec<Vec<String>> = std::iter::once(ResultRow::marker_row(round))
        .chain(scores.iter().map(ResultRow::player_row))
        .collect();
    store.append_rows(sheet, &rows).await
}

/// Every parseable row in log order. Blank or malformed rows are dropped.
pub async fn all_rows(store: &dyn SheetStore, sheet: &str) -> Result<Vec<ResultRow>, StoreError> {
    let values = store.get_all_values(sheet).await?;
    Ok(values.iter().filter_map(|row| ResultRow::parse(row)).collect())
}

pub async fn clear(store: &dyn SheetStore, sheet: &str) -> Result<(), StoreError> {
    store.clear(sheet).await
}

pub fn has_round(rows: &[ResultRow], round: u8) -> bool {
    rows.iter()
        .any(|row| matches!(row, ResultRow::RoundMarker(r) if *r == round))
}
