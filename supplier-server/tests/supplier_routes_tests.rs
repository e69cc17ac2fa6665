use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ledger_store::InMemoryTabularStore;
use supplier_server::{create_app, ServerConfig, SupplierServer};

/// Test app over an in-memory ledger
struct TestApp {
    store: Arc<InMemoryTabularStore>,
    app: Router,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryTabularStore::new());
        let server =
            SupplierServer::with_store(store.clone(), ServerConfig::default(), "in-memory");
        Self {
            store,
            app: create_app(server),
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Supplier backend is running!");
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "in-memory");
}

#[tokio::test]
async fn test_register_and_list_suppliers() {
    let app = TestApp::new();

    let (status, body) = app.post("/suppliers", json!({ "name": "Acme" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    app.post("/suppliers", json!({ "name": "Supplier A" })).await;

    let (status, body) = app.get("/suppliers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Acme", "Supplier A"]));
}

#[tokio::test]
async fn test_register_duplicate_is_bad_request() {
    let app = TestApp::new();
    app.post("/suppliers", json!({ "name": "Acme" })).await;

    let (status, body) = app.post("/suppliers", json!({ "name": "Acme" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Supplier already exists" }));
}

#[tokio::test]
async fn test_register_without_name_never_reaches_store() {
    let app = TestApp::new();

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "   " })] {
        let (status, response) = app.post("/suppliers", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "Supplier name required" }));
    }
    assert_eq!(app.store.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/suppliers")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_latest_is_null_before_first_entry() {
    let app = TestApp::new();
    app.post("/suppliers", json!({ "name": "Acme" })).await;

    let (status, body) = app.get("/supplier/Acme/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_append_then_latest_and_history() {
    let app = TestApp::new();
    app.post("/suppliers", json!({ "name": "Acme" })).await;

    let (status, body) = app
        .post(
            "/supplier/Acme",
            json!({
                "date": "2024-01-01",
                "openingBalance": 1000,
                "purchase": 200,
                "payment": 50,
                "closingBalance": 1150,
                "remarks": ""
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, latest) = app.get("/supplier/Acme/latest").await;
    assert_eq!(
        latest,
        json!({
            "Date": "2024-01-01",
            "Opening Balance": "1000",
            "Purchases": "200",
            "Payments": "50",
            "Closing Balance": "1150",
            "Remarks": ""
        })
    );

    app.post(
        "/supplier/Acme",
        json!({
            "date": "2024-01-02",
            "openingBalance": "1150",
            "purchase": "0",
            "payment": "150",
            "closingBalance": "1000",
            "remarks": "cash"
        }),
    )
    .await;

    let (_, latest) = app.get("/supplier/Acme/latest").await;
    assert_eq!(latest["Date"], "2024-01-02");
    assert_eq!(latest["Remarks"], "cash");

    let (status, history) = app.get("/supplier/Acme/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["header"][1], "Opening Balance");
    assert_eq!(history["rows"].as_array().unwrap().len(), 2);
    assert_eq!(history["rows"][0]["Closing Balance"], "1150");
}

#[tokio::test]
async fn test_percent_encoded_supplier_names_route() {
    let app = TestApp::new();
    app.post("/suppliers", json!({ "name": "Bob's Farm" })).await;

    let (status, _) = app
        .post(
            "/supplier/Bob's%20Farm",
            json!({ "date": "2024-03-01", "openingBalance": "0", "purchase": "10", "payment": "0", "closingBalance": "10" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, latest) = app.get("/supplier/Bob's%20Farm/latest").await;
    assert_eq!(latest["Closing Balance"], "10");
}

#[tokio::test]
async fn test_unknown_supplier_is_server_error() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/supplier/Ghost", json!({ "date": "2024-01-01" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Unable to parse range"));

    let (status, _) = app.get("/supplier/Ghost/latest").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unbalanced_rows_are_stored_as_sent() {
    let app = TestApp::new();
    app.post("/suppliers", json!({ "name": "Acme" })).await;

    let (status, _) = app
        .post(
            "/supplier/Acme",
            json!({
                "date": "2024-01-01",
                "openingBalance": "100",
                "purchase": "abc",
                "payment": "5",
                "closingBalance": "999"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, latest) = app.get("/supplier/Acme/latest").await;
    assert_eq!(latest["Purchases"], "abc");
    assert_eq!(latest["Closing Balance"], "999");
}

#[tokio::test]
async fn test_amounts_at_decimal_limit_are_stored() {
    let app = TestApp::new();
    app.post("/suppliers", json!({ "name": "Acme" })).await;

    let (status, body) = app
        .post(
            "/supplier/Acme",
            json!({
                "date": "2024-01-01",
                "openingBalance": "79228162514264337593543950335",
                "purchase": "1",
                "payment": "0",
                "closingBalance": "0"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, latest) = app.get("/supplier/Acme/latest").await;
    assert_eq!(latest["Opening Balance"], "79228162514264337593543950335");
    assert_eq!(latest["Closing Balance"], "0");
}
