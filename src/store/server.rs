//! Axum router serving a [`MemoryStore`] over the `/words` HTTP contract.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::{
    foundation::error::WeaveError,
    model::placement::WordPlacement,
    store::{SnapshotStore, http::ADMIN_PASSWORD_HEADER, memory::MemoryStore},
};

/// Shared state behind the router.
#[derive(Clone, Debug)]
pub struct StoreState {
    store: MemoryStore,
}

impl StoreState {
    /// `store` should carry the admin password via
    /// [`MemoryStore::with_admin_password`]; without one any DELETE succeeds.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

/// Build the `/words` router. Methods other than GET, POST and DELETE get 405.
///
/// HEAD is routed explicitly since a GET route would otherwise answer it.
pub fn router(state: StoreState) -> Router {
    Router::new()
        .route(
            "/words",
            get(list_handler)
                .post(append_handler)
                .delete(clear_handler)
                .head(method_not_allowed),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the task is dropped.
pub async fn serve(state: StoreState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "snapshot store listening");
    axum::serve(listener, router(state)).await
}

async fn list_handler(State(state): State<StoreState>) -> Response {
    match state.store.fetch().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn append_handler(State(state): State<StoreState>, body: Bytes) -> Response {
    let Ok(value) = serde_json::from_slice::<Value>(&body) else {
        return error_response(StatusCode::BAD_REQUEST, "Empty body");
    };

    match placement_from_body(&value) {
        Some(word) => {
            if let Err(e) = state.store.append(&word).await {
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
            }
            tracing::debug!(text = %word.text, "word appended");
        }
        // Incomplete entries are acknowledged but not stored.
        None => tracing::debug!("incomplete word dropped"),
    }
    Json(json!({ "success": true })).into_response()
}

async fn clear_handler(State(state): State<StoreState>, headers: HeaderMap) -> Response {
    let password = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match state.store.clear(password).await {
        Ok(()) => {
            tracing::info!("collection cleared");
            Json(json!({ "success": true })).into_response()
        }
        Err(WeaveError::ResetFailed(msg)) => error_response(StatusCode::FORBIDDEN, &msg),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn method_not_allowed() -> Response {
    let mut res = StatusCode::METHOD_NOT_ALLOWED.into_response();
    res.headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, POST, DELETE"));
    res
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

/// Extract a placement when all four fields are present and non-null.
/// Coordinates may arrive as numbers or numeric strings.
fn placement_from_body(body: &Value) -> Option<WordPlacement> {
    let field = |name: &str| body.get(name).filter(|v| !v.is_null());

    let text = match field("text")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let coord = |name: &str| -> Option<f64> {
        match field(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    };
    let x = coord("x")?;
    let y = coord("y")?;
    let color = match field("color")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Some(WordPlacement::new(text, x, y, color))
}

#[cfg(test)]
#[path = "../../tests/unit/store/server.rs"]
mod tests;
