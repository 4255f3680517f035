//! Read behavior the repositories rely on, checked against the memory store.

use panel_backend::domain::board::padded;
use panel_backend::domain::{range_for, CellRange};
use panel_backend::repos::boards;
use panel_backend::store::{MemoryStore, SheetStore, StoreError};

use crate::support::fixtures::grid;

#[tokio::test]
async fn ragged_reads_are_padded_by_the_caller() {
    let store = MemoryStore::with_worksheets(["Player1"]);
    store.update_cell("Player1", 1, 1, "1").await.unwrap();
    store.update_cell("Player1", 3, 2, "2").await.unwrap();

    let raw = boards::read_board(&store, "Player1", 3).await.unwrap();
    assert_eq!(raw, grid(&[&["1"], &[], &["", "2"]]));
    assert_eq!(
        padded(&raw, 3),
        grid(&[&["1", "", ""], &["", "", ""], &["", "2", ""]])
    );
}

#[tokio::test]
async fn reads_outside_written_cells_are_empty() {
    let store = MemoryStore::with_worksheets(["Player1"]);
    let block = store.get("Player1", range_for(10)).await.unwrap();
    assert!(block.is_empty());
    assert_eq!(store.get_cell("Player1", 10, 10).await.unwrap(), None);
}

#[tokio::test]
async fn full_board_write_clears_cells_outside_the_region() {
    let store = MemoryStore::with_worksheets(["Player1"]);
    store.update_cell("Player1", 10, 10, "1").await.unwrap();
    boards::reset_board(&store, "Player1", 3, &grid(&[&["1"]]))
        .await
        .unwrap();

    assert_eq!(store.get_cell("Player1", 10, 10).await.unwrap(), None);
    assert_eq!(
        store.get("Player1", CellRange::full_board()).await.unwrap(),
        grid(&[&["2", "0", "0"], &["0", "0", "0"], &["0", "0", "0"]])
    );
}

#[tokio::test]
async fn appends_skip_over_cleared_tail_rows() {
    let store = MemoryStore::with_worksheets(["Results"]);
    store
        .update("Results", CellRange::new(1, 1, 3, 1), &grid(&[&["a"], &["b"], &["c"]]))
        .await
        .unwrap();
    store
        .update("Results", CellRange::new(2, 1, 3, 1), &grid(&[&[""], &[""]]))
        .await
        .unwrap();
    store
        .append_row("Results", &["d".to_string()])
        .await
        .unwrap();

    assert_eq!(
        store.get_all_values("Results").await.unwrap(),
        grid(&[&["a"], &["d"]])
    );
}

#[tokio::test]
async fn every_operation_reports_missing_worksheets() {
    let store = MemoryStore::new();
    let missing = StoreError::WorksheetNotFound("Player9".into());

    assert_eq!(store.get("Player9", CellRange::cell(1, 1)).await, Err(missing.clone()));
    assert_eq!(store.update_cell("Player9", 1, 1, "1").await, Err(missing.clone()));
    assert_eq!(store.clear("Player9").await, Err(missing.clone()));
    assert_eq!(store.append_row("Player9", &[]).await, Err(missing.clone()));
    assert_eq!(store.get_all_values("Player9").await, Err(missing));
    assert!(store.worksheets().await.unwrap().is_empty());
}
