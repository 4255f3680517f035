use panel_backend::config::GameConfig;
use panel_backend::domain::scoring::final_totals;
use panel_backend::errors::ErrorCode;
use panel_backend::infra::state::seeded_memory_store;
use panel_backend::repos::results;
use panel_backend::services::{BoardLocks, GameService, ScoreService};
use panel_backend::store::{SheetStore, StoreError};

use crate::support::fixtures::GameFixture;
use crate::support::flaky_store::FlakyStore;

fn game() -> GameConfig {
    GameFixture::with_players(&["Player1", "Player2"]).game
}

/// Round 1 scored and logged: Player2 opened 2, Player1 opened 1.
async fn play_round_one(store: &FlakyStore, game: &GameConfig, locks: &BoardLocks) {
    let svc = GameService::new(store, game, locks);
    svc.next_round().await.unwrap();
    svc.open_panel("Player2", 1, 1).await.unwrap();
    svc.open_panel("Player2", 1, 2).await.unwrap();
    svc.open_panel("Player1", 2, 2).await.unwrap();
    let report = ScoreService::new(store, game, locks).calculate().await.unwrap();
    assert!(report.recorded);
}

async fn open_three_in_round_two(store: &FlakyStore, game: &GameConfig, locks: &BoardLocks) {
    let svc = GameService::new(store, game, locks);
    svc.next_round().await.unwrap();
    for col in 1..=3 {
        svc.open_panel("Player1", 3, col).await.unwrap();
    }
}

#[tokio::test]
async fn failed_round_append_leaves_nothing_and_is_finished_later() {
    let game = game();
    let locks = BoardLocks::new();
    let store = FlakyStore::new(seeded_memory_store(&game));
    play_round_one(&store, &game, &locks).await;
    open_three_in_round_two(&store, &game, &locks).await;

    store.fail_next_appends(StoreError::Upstream { status: 500, detail: "boom".into() }, 1);
    let scores = ScoreService::new(&store, &game, &locks);
    let err = scores.calculate().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);

    let rows = results::all_rows(&store, &game.results_sheet).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(!results::has_round(&rows, 2));

    let report = scores.calculate().await.unwrap();
    assert_eq!(report.round, 2);
    assert!(report.recorded);

    let rows = results::all_rows(&store, &game.results_sheet).await.unwrap();
    let totals: Vec<(String, u32)> = final_totals(&rows, &game.players)
        .into_iter()
        .map(|t| (t.player, t.score))
        .collect();
    assert_eq!(totals, [("Player1".to_string(), 4), ("Player2".to_string(), 2)]);
}

#[tokio::test]
async fn append_that_landed_despite_a_timeout_is_complete() {
    let game = game();
    let locks = BoardLocks::new();
    let store = FlakyStore::new(seeded_memory_store(&game)).with_landing_appends();
    play_round_one(&store, &game, &locks).await;
    open_three_in_round_two(&store, &game, &locks).await;

    store.fail_next_appends(StoreError::Timeout("response lost".into()), 1);
    let scores = ScoreService::new(&store, &game, &locks);
    assert!(scores.calculate().await.is_err());

    let again = scores.calculate().await.unwrap();
    assert!(!again.recorded);

    let log = store.get_all_values(&game.results_sheet).await.unwrap();
    let round_two: Vec<&[String]> = log[3..].iter().map(Vec::as_slice).collect();
    assert_eq!(round_two.len(), 3);
    assert_eq!(round_two[0], ["#round", "2"]);
    assert_eq!(round_two[1][..2], ["Player1".to_string(), "3".to_string()]);
    assert_eq!(round_two[2][..2], ["Player2".to_string(), "0".to_string()]);
}
