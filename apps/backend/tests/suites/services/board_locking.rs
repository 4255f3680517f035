use std::sync::Arc;
use std::time::Duration;

use panel_backend::domain::{ResultRow, RoundState};
use panel_backend::infra::state::seeded_memory_store;
use panel_backend::repos::results;
use panel_backend::services::{BoardLocks, GameService, ScoreService};

use crate::support::fixtures::GameFixture;
use crate::support::flaky_store::FlakyStore;

/// Every status read during round `r` must see a fully laid out board for `r`.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn status_never_pairs_a_round_with_a_stale_board() {
    let fixture = GameFixture::with_players(&["Player1", "Player2"]);
    let store = fixture.store.clone();
    let game = Arc::new(fixture.game.clone());
    let locks = Arc::new(BoardLocks::new());

    let writer = {
        let (store, game, locks) = (store.clone(), game.clone(), locks.clone());
        tokio::spawn(async move {
            let svc = GameService::new(store.as_ref(), &game, &locks);
            for _ in 0..9 {
                svc.next_round().await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for player in ["Player1", "Player2"] {
        let (store, game, locks) = (store.clone(), game.clone(), locks.clone());
        readers.push(tokio::spawn(async move {
            let svc = GameService::new(store.as_ref(), &game, &locks);
            loop {
                let view = svc.status(player).await.unwrap();
                if let RoundState::Active(r) = view.round {
                    let n = view.n.unwrap() as usize;
                    assert_eq!(n, r as usize + 1);
                    let panels = view.panels.unwrap();
                    for row in &panels {
                        assert!(
                            row.iter().all(|c| c == "0" || c == "2"),
                            "round {r} saw a torn board: {panels:?}"
                        );
                    }
                    if r == 9 {
                        break;
                    }
                }
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_opens_on_one_board_all_land() {
    let fixture = GameFixture::with_players(&["Player1"]);
    fixture.set_round("4").await;
    let store = fixture.store.clone();
    let game = Arc::new(fixture.game.clone());
    let locks = Arc::new(BoardLocks::new());

    let mut tasks = Vec::new();
    for row in 1..=5u32 {
        for col in 1..=5u32 {
            let (store, game, locks) = (store.clone(), game.clone(), locks.clone());
            tasks.push(tokio::spawn(async move {
                GameService::new(store.as_ref(), &game, &locks)
                    .open_panel("Player1", row, col)
                    .await
                    .unwrap();
            }));
        }
    }
    for task in tasks {
        task.await.unwrap();
    }

    let board = fixture.board("Player1").await;
    assert_eq!(board.len(), 5);
    assert!(board.iter().all(|row| row.len() == 5 && row.iter().all(|c| c == "1")));
}

/// An advance that arrives while a round is being scored waits for the count.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scoring_counts_the_round_it_read() {
    let game = Arc::new(GameFixture::with_players(&["Player1", "Player2"]).game);
    let locks = Arc::new(BoardLocks::new());
    let store = Arc::new(
        FlakyStore::new(seeded_memory_store(&game)).with_read_delay(Duration::from_millis(50)),
    );

    let svc = GameService::new(store.as_ref(), &game, &locks);
    svc.next_round().await.unwrap();
    for (row, col) in [(1, 1), (1, 2), (2, 1)] {
        svc.open_panel("Player1", row, col).await.unwrap();
    }

    let before = store.calls();
    let scoring = {
        let (store, game, locks) = (store.clone(), game.clone(), locks.clone());
        tokio::spawn(async move {
            ScoreService::new(store.as_ref(), &game, &locks)
                .calculate()
                .await
                .unwrap()
        })
    };
    // Listing done and the round read under way: the board guards are held.
    while store.calls() < before + 2 {
        tokio::task::yield_now().await;
    }
    let advance = svc.next_round().await.unwrap();
    let report = scoring.await.unwrap();

    assert_eq!(advance.round, RoundState::Active(2));
    assert_eq!(report.round, 1);
    assert_eq!(report.results[0].player, "Player1");
    assert_eq!(report.results[0].opened, 3);

    let rows = results::all_rows(store.as_ref(), &game.results_sheet).await.unwrap();
    assert_eq!(rows[0], ResultRow::RoundMarker(1));
    assert_eq!(
        rows[1],
        ResultRow::Player {
            player: "Player1".into(),
            score: 3,
            opened: 3
        }
    );
}
