use axum::{Json, extract::State};
use serde_json::{Value, json};

use super::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "mappings": state.mappings.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
