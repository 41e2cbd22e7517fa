use actix_web::{App, test, web};
use serde_json::{Value, json};

use chainflux::api::{self, AppState};
use chainflux::ledger::{ChainStore, Ledger};

fn state_in(dir: &tempfile::TempDir) -> web::Data<AppState> {
    let store = ChainStore::new(dir.path().join("chain.json"));
    let ledger = Ledger::open(store, 2).expect("open ledger");
    web::Data::new(AppState::new(ledger))
}

#[actix_web::test]
async fn chain_starts_with_genesis() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_in(&dir))
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["length"], 1);
    assert_eq!(body["difficulty"], 2);
    assert_eq!(body["chain"][0]["index"], 0);
    assert_eq!(body["chain"][0]["title"], "Genesis");
    assert_eq!(body["chain"][0]["previous_hash"], "0");
}

#[actix_web::test]
async fn queue_then_mine_grows_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_in(&dir))
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/")
        .set_json(json!({
            "title": "T",
            "narrative": "N",
            "linked_blocks": [0],
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "event_queued");
    assert_eq!(body["pending"], 1);

    let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "block_mined");
    assert_eq!(body["mined_index"], 1);
    assert!(body["hash"].as_str().unwrap().starts_with("00"));

    let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["length"], 2);
    assert_eq!(body["chain"][1]["title"], "T");

    let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["valid"], true);
}

#[actix_web::test]
async fn mining_an_empty_queue_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_in(&dir))
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "no_pending_events");
    assert_eq!(body["mined_index"], Value::Null);
}

#[actix_web::test]
async fn event_without_a_title_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_in(&dir))
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/events/")
        .set_json(json!({
            "title": "   ",
            "narrative": "N",
            "linked_blocks": [],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // missing fields are rejected by the JSON extractor
    let req = test::TestRequest::post()
        .uri("/api/v1/events/")
        .set_json(json!({ "title": "T" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn pending_lists_queued_events_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_in(&dir))
            .configure(api::init_routes),
    )
    .await;

    for title in ["first", "second"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/events/")
            .set_json(json!({
                "title": title,
                "narrative": "…",
                "linked_blocks": [],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get().uri("/api/v1/pending/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["size"], 2);
    assert_eq!(body["events"][0]["title"], "first");
    assert_eq!(body["events"][1]["title"], "second");
}

#[actix_web::test]
async fn explorer_page_renders_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state_in(&dir))
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("ChainFlux"));
    assert!(html.contains("#0: Genesis"));
}
