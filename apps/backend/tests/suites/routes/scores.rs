use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, assert_success};
use panel_backend::store::SheetStore;
use serde_json::json;

use crate::common::into_parts;
use crate::support::app_builder::create_test_app;
use crate::support::fixtures::{grid, GameFixture};

#[actix_web::test]
async fn round_three_scores_are_ranked_and_logged_once() {
    let fixture = GameFixture::with_players(&["Player1", "Player2", "Player3"]);
    fixture.set_round("3").await;
    fixture
        .fill_board(
            "Player2",
            &[
                &["1", "1", "0", "0"],
                &["1", "2", "0", "0"],
                &["1", "0", "2", "0"],
                &["1", "0", "0", "0", "1"],
            ],
        )
        .await;
    fixture.fill_board("Player3", &[&["2", "0", "0", "0"]]).await;
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/scores").to_request();
    let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
    let json = assert_success(status, &body);

    assert_eq!(json["round"], 3);
    assert_eq!(json["recorded"], true);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["player"], "Player2");
    assert_eq!(results[0]["score"], 7);
    assert_eq!(results[0]["opened"], 7);
    assert_eq!(results[0]["closed"], 9);
    assert_eq!(results[1]["player"], "Player3");
    assert_eq!(results[1]["score"], 1);
    assert_eq!(results[2]["player"], "Player1");
    assert_eq!(results[2]["score"], 0);

    let req = test::TestRequest::get().uri("/calculate_scores").to_request();
    let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
    let json = assert_success(status, &body);
    assert_eq!(json["recorded"], false);

    assert_eq!(
        fixture.results().await,
        grid(&[
            &["#round", "3"],
            &["Player2", "7", "7", "9"],
            &["Player3", "1", "1", "15"],
            &["Player1", "0", "0", "16"],
        ])
    );
}

#[actix_web::test]
async fn scoring_before_the_game_starts_is_rejected() {
    let fixture = GameFixture::new();
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/scores").to_request();
    let (status, headers, body) = into_parts(test::call_service(&app, req).await).await;
    assert_error_envelope(status, &headers, &body, "ROUND_NOT_ACTIVE", None);
    assert!(fixture.results().await.is_empty());
}

#[actix_web::test]
async fn final_scores_total_every_logged_round() {
    let fixture = GameFixture::with_players(&["Player1", "Player2", "Player3"]);
    let log = grid(&[
        &["#round", "1"],
        &["Player1", "1", "1", "3"],
        &["Player2", "2", "2", "2"],
        &["Player3", "2", "2", "2"],
        &["#round", "2"],
        &["Player1", "4", "4", "5"],
        &["Player2", "3", "3", "6"],
        &["Player3", "1", "1", "8"],
    ]);
    for row in &log {
        fixture
            .store
            .append_row(&fixture.game.results_sheet, row)
            .await
            .unwrap();
    }
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    for uri in ["/final_scores", "/get_final_scores"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
        let json = assert_success(status, &body);
        let ranked: Vec<(&str, u64)> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| (t["player"].as_str().unwrap(), t["score"].as_u64().unwrap()))
            .collect();
        // Player1 and Player2 tie on 5; roster order breaks it.
        assert_eq!(ranked, [("Player1", 5), ("Player2", 5), ("Player3", 3)]);
    }
}

#[actix_web::test]
async fn final_scores_of_an_empty_log_are_empty() {
    let fixture = GameFixture::new();
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/final_scores").to_request();
    let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
    let json = assert_success(status, &body);
    assert_eq!(json["results"], json!([]));
}
