use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, assert_success};
use serde_json::json;

use crate::common::into_parts;
use crate::support::app_builder::create_test_app;
use crate::support::fixtures::{grid, GameFixture};

#[actix_web::test]
async fn player_open_writes_one() {
    let fixture = GameFixture::new();
    fixture.set_round("2").await;
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    for uri in ["/open", "/open_panel"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({"user": "Player3", "row": 2, "col": 3}))
            .to_request();
        let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
        assert_success(status, &body);
    }

    assert_eq!(
        fixture.board("Player3").await,
        grid(&[&[], &["", "", "1"]])
    );
}

#[actix_web::test]
async fn admin_open_writes_two_and_defaults_to_admin_board() {
    let fixture = GameFixture::new();
    fixture.set_round("1").await;
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/admin_open")
        .set_json(json!({"row": 1, "col": 1}))
        .to_request();
    let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
    assert_success(status, &body);

    let req = test::TestRequest::post()
        .uri("/admin_open_panel")
        .set_json(json!({"user": "Player4", "row": 2, "col": 2}))
        .to_request();
    let (status, _, body) = into_parts(test::call_service(&app, req).await).await;
    assert_success(status, &body);

    assert_eq!(fixture.board("Player1").await, grid(&[&["2"]]));
    assert_eq!(fixture.board("Player4").await, grid(&[&[], &["", "2"]]));
}

#[actix_web::test]
async fn out_of_range_cell_is_rejected() {
    let fixture = GameFixture::new();
    fixture.set_round("1").await;
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/open")
        .set_json(json!({"user": "Player1", "row": 3, "col": 1}))
        .to_request();
    let (status, headers, body) = into_parts(test::call_service(&app, req).await).await;
    assert_error_envelope(status, &headers, &body, "INVALID_CELL", Some("2x2"));
    assert!(fixture.board("Player1").await.is_empty());
}

#[actix_web::test]
async fn opening_before_the_game_starts_is_rejected() {
    let fixture = GameFixture::new();
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/open")
        .set_json(json!({"user": "Player1", "row": 1, "col": 1}))
        .to_request();
    let (status, headers, body) = into_parts(test::call_service(&app, req).await).await;
    assert_error_envelope(status, &headers, &body, "ROUND_NOT_ACTIVE", None);
}

#[actix_web::test]
async fn missing_user_is_bad_request() {
    let fixture = GameFixture::new();
    fixture.set_round("1").await;
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/open")
        .set_json(json!({"row": 1, "col": 1}))
        .to_request();
    let (status, headers, body) = into_parts(test::call_service(&app, req).await).await;
    assert_error_envelope(status, &headers, &body, "BAD_REQUEST", Some("user"));
}

#[actix_web::test]
async fn opening_on_missing_board_is_worksheet_not_found() {
    let fixture = GameFixture::new();
    fixture.set_round("1").await;
    fixture.store.remove_worksheet("Player6");
    let app = create_test_app(fixture.state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/open")
        .set_json(json!({"user": "Player6", "row": 1, "col": 1}))
        .to_request();
    let (status, headers, body) = into_parts(test::call_service(&app, req).await).await;
    assert_error_envelope(status, &headers, &body, "WORKSHEET_NOT_FOUND", None);
}
