//! In-process inventory backend for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const ADMIN_TOKEN: &str = "t1";
pub const STAFF_TOKEN: &str = "t2";
pub const EXPIRED_TOKEN: &str = "expired";

fn authorized(headers: &HeaderMap) -> Result<&str, Response> {
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match bearer {
        Some(token) if token == ADMIN_TOKEN || token == STAFF_TOKEN => Ok(token),
        _ => Err(StatusCode::UNAUTHORIZED.into_response()),
    }
}

fn product(id: i64, name: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "sku": format!("SKU-{id}"),
        "category": category,
        "price": 12.5,
        "qty": 40,
        "description": null
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match (username, password) {
        ("alice", "secret") => Json(json!({
            "token": ADMIN_TOKEN,
            "userId": 5,
            "username": "alice",
            "role": "ADMIN"
        }))
        .into_response(),
        ("bob", "secret") => Json(json!({
            "token": STAFF_TOKEN,
            "userId": 6,
            "username": "bob",
            "role": "STAFF"
        }))
        .into_response(),
        ("mallory", _) => StatusCode::UNAUTHORIZED.into_response(),
        _ => (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response(),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    match body["username"].as_str() {
        Some("taken") => (StatusCode::CONFLICT, "Username already exists").into_response(),
        Some(_) if body["role"].is_string() => StatusCode::CREATED.into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn products(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([
        product(1, "Widget", "Tools"),
        product(2, "Bolt", "Hardware")
    ]))
    .into_response()
}

async fn search_products(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let name = params.get("name").cloned().unwrap_or_default();
    Json(json!([product(9, &name, "Search")])).into_response()
}

async fn products_by_category(headers: HeaderMap, Path(category): Path<String>) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([product(3, "Saw", &category)])).into_response()
}

async fn suppliers(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([{
        "id": 1,
        "name": "Acme",
        "contact": "Wile",
        "email": "wile@acme.test"
    }]))
    .into_response()
}

async fn transactions(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    // Not a list: clients must report a decode failure
    Json(json!({ "unexpected": true })).into_response()
}

async fn users(headers: HeaderMap) -> Response {
    match authorized(&headers) {
        Ok(ADMIN_TOKEN) => Json(json!([
            { "id": 5, "username": "alice", "role": "ADMIN" },
            { "id": 6, "username": "bob", "role": "STAFF" },
            { "id": 7, "username": "Alina", "role": "MANAGER" }
        ]))
        .into_response(),
        Ok(_) => StatusCode::FORBIDDEN.into_response(),
        Err(denied) => denied,
    }
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "contentType": header("content-type"),
        "authorization": header("authorization"),
        "trace": header("x-trace"),
    }))
}

pub fn router() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/products", get(products))
        .route("/api/products/search", get(search_products))
        .route("/api/products/category/:category", get(products_by_category))
        .route("/api/suppliers", get(suppliers))
        .route("/api/transactions", get(transactions))
        .route("/api/users", get(users))
        .route("/api/echo-headers", get(echo_headers))
}

/// Serve on an ephemeral port inside the current runtime; returns the API base
pub async fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    base_url(addr)
}

/// Serve from a dedicated thread with its own runtime; returns the API base
pub fn serve_in_background() -> String {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router()).await.unwrap();
        });
    });
    base_url(rx.recv().unwrap())
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}/api")
}
