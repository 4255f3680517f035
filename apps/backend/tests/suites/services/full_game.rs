use panel_backend::domain::RoundState;
use panel_backend::services::{BoardLocks, GameService, ScoreService};

use crate::support::fixtures::GameFixture;

#[tokio::test]
async fn nine_rounds_then_clear_then_reset() {
    let fixture = GameFixture::with_players(&["Player1", "Player2"]);
    let store = fixture.store.as_ref();
    let locks = BoardLocks::new();
    let game = GameService::new(store, &fixture.game, &locks);
    let scores = ScoreService::new(store, &fixture.game, &locks);

    for round in 1..=9u8 {
        let advance = game.next_round().await.unwrap();
        assert_eq!(advance.round, RoundState::Active(round));
        let n = advance.n.unwrap() as u32;
        assert_eq!(n, round as u32 + 1);

        // Player1 opens the far corner every round, Player2 opens two cells.
        game.open_panel("Player1", n, n).await.unwrap();
        game.open_panel("Player2", 1, 1).await.unwrap();
        game.admin_open_panel(Some("Player2"), 2, 2).await.unwrap();

        let view = game.status("Player2").await.unwrap();
        let panels = view.panels.unwrap();
        assert_eq!(panels.len(), n as usize);
        assert_eq!(panels[0][0], "1");
        assert_eq!(panels[1][1], "2");

        let report = scores.calculate().await.unwrap();
        assert!(report.recorded);
        assert_eq!(report.results[0].player, "Player2");
        assert_eq!(report.results[0].score, 2);
        assert_eq!(report.results[1].score, 1);
    }

    let cleared = game.next_round().await.unwrap();
    assert_eq!(cleared.round, RoundState::Clear);
    assert_eq!(game.status("Player1").await.unwrap().round, RoundState::Clear);
    assert_eq!(game.next_round().await.unwrap().round, RoundState::Clear);

    let totals = scores.final_scores().await.unwrap();
    assert_eq!(totals[0].player, "Player2");
    assert_eq!(totals[0].score, 18);
    assert_eq!(totals[1].player, "Player1");
    assert_eq!(totals[1].score, 9);

    let reset = game.reset_game().await.unwrap();
    assert_eq!(reset.round, RoundState::NotStarted);
    let view = game.status("Player1").await.unwrap();
    assert_eq!(view.round, RoundState::NotStarted);
    assert!(view.panels.is_none());
    assert!(scores.final_scores().await.unwrap().is_empty());
    assert!(fixture.results().await.is_empty());

    // The next game starts again at round 1 on a clean board.
    let advance = game.next_round().await.unwrap();
    assert_eq!(advance.round, RoundState::Active(1));
    assert_eq!(
        fixture.board("Player1").await,
        crate::support::fixtures::grid(&[&["0", "0"], &["0", "0"]])
    );
}

#[tokio::test]
async fn presets_open_cells_before_players_do() {
    let fixture = GameFixture::with_players(&["Player1"]);
    fixture
        .set_preset(3, &[&["1", "1", "1", "1"], &[], &[], &["0", "0", "0", "1"]])
        .await;
    fixture.set_round("2").await;
    let locks = BoardLocks::new();
    let store = fixture.store.as_ref();

    GameService::new(store, &fixture.game, &locks)
        .next_round()
        .await
        .unwrap();
    let report = ScoreService::new(store, &fixture.game, &locks)
        .calculate()
        .await
        .unwrap();

    assert_eq!(report.round, 3);
    assert_eq!(report.results[0].opened, 5);
    assert_eq!(report.results[0].closed, 11);
}
