use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Balance, CatalogItem, HistoryItem, Location, ReturnResponse};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- reference data ---

#[tokio::test]
async fn catalog_lists_seeded_items() {
    let resp = app().oneshot(get("/api/catalog")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<CatalogItem> = body_json(resp).await;
    assert_eq!(items.len(), 10);
    assert!(items.iter().any(|i| i.item_sku == "ALUMINUM_CAN_330ML" && i.points_awarded == 12));
}

#[tokio::test]
async fn locations_list_seeded_stores() {
    let resp = app().oneshot(get("/api/locations")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let locations: Vec<Location> = body_json(resp).await;
    assert_eq!(locations.len(), 8);
    assert_eq!(locations[0].name, "Korzinka Chilanzar");
}

// --- users ---

#[tokio::test]
async fn unknown_user_balance_is_404_with_detail() {
    let resp = app().oneshot(get("/api/users/TEST_USER_123/balance")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn unknown_user_history_is_empty() {
    let resp = app().oneshot(get("/api/users/nobody/history")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let history: Vec<HistoryItem> = body_json(resp).await;
    assert!(history.is_empty());
}

// --- returns ---

#[tokio::test]
async fn unknown_sku_is_validation_error() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/returns",
            r#"{"user_id_string":"u","item_sku":"NOT_A_SKU"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"][0]["msg"], "SKU not found");
    assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "item_sku"]));
}

#[tokio::test]
async fn malformed_return_is_validation_error() {
    let resp = app()
        .oneshot(json_request("POST", "/api/returns", r#"{"item_sku":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].is_array());
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}

#[tokio::test]
async fn blank_user_is_validation_error() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/returns",
            r#"{"user_id_string":"  ","item_sku":"PAPER_BAG"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- full award lifecycle ---

#[tokio::test]
async fn returns_award_points_every_time() {
    use tower::Service;

    let mut app = app().into_service();
    let body = r#"{"user_id_string":"user_1","item_sku":"PET_BOTTLE_500ML"}"#;

    // two identical returns
    for _ in 0..2 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/api/returns", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let result: ReturnResponse = body_json(resp).await;
        assert_eq!(result.status, "success");
        assert!(result.message.contains("+10 points"));
    }

    // a different item
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/returns",
            r#"{"user_id_string":"user_1","item_sku":"CARDBOARD_BOX_LARGE"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // balance counts both duplicates
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/users/user_1/balance"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let balance: Balance = body_json(resp).await;
    assert_eq!(balance.user_id_string, "user_1");
    assert_eq!(balance.balance, 45);

    // history is newest first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/users/user_1/history"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let history: Vec<HistoryItem> = body_json(resp).await;
    let points: Vec<i64> = history.iter().map(|h| h.points_awarded).collect();
    assert_eq!(points, vec![25, 10, 10]);
    assert_eq!(history[0].item_name, "Large Cardboard Box");
    assert!(history.iter().all(|h| h.location_name == mock_server::SCAN_LOCATION));

    // other users are untouched
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/users/user_2/balance"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
