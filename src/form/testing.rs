//! Test fixtures shared by the form session tests

use super::transport::CONTACT_PATH;
use super::ContactRequest;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A backend that answers every inquiry with a fixed status
#[derive(Clone)]
pub struct StubBackend {
    pub status: StatusCode,
    /// Content-Type header and JSON body of each request received
    pub received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn record(
    State(stub): State<StubBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.received.lock().unwrap().push((content_type, body));
    stub.status
}

/// Serve a stub backend on an ephemeral port, returning its base URL
pub async fn spawn_backend(status: StatusCode) -> (String, StubBackend) {
    let stub = StubBackend {
        status,
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route(CONTACT_PATH, post(record))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

pub fn jane() -> ContactRequest {
    ContactRequest {
        name: "Jane".to_string(),
        email: "jane@x.com".to_string(),
        phone: String::new(),
        service: "furniture".to_string(),
        message: "Hi".to_string(),
    }
}
