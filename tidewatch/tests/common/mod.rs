//! Fake weather provider served over real HTTP with axum.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde_json::{Value, json};

/// Behavior of one fake endpoint.
#[derive(Clone)]
pub enum Endpoint {
    Ok(Value),
    Status(StatusCode),
}

impl Endpoint {
    fn respond(self, params: &HashMap<String, String>) -> (StatusCode, Json<Value>) {
        if !params.contains_key("latitude") || !params.contains_key("longitude") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "missing coordinates" })),
            );
        }
        match self {
            Endpoint::Ok(body) => (StatusCode::OK, Json(body)),
            Endpoint::Status(status) => (status, Json(json!({ "error": "unavailable" }))),
        }
    }
}

/// Serve `/current` and `/forecast` on an ephemeral port; returns the base URL.
pub async fn spawn_provider(current: Endpoint, forecast: Endpoint) -> String {
    let app = Router::new()
        .route(
            "/current",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let current = current.clone();
                async move { current.respond(&params) }
            }),
        )
        .route(
            "/forecast",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let forecast = forecast.clone();
                async move { forecast.respond(&params) }
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake provider");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake provider");
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_provider() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn current_conditions() -> Value {
    json!({ "items": [ { "forecasts": [ { "area": "Venice", "forecast": "Fair" } ] } ] })
}
