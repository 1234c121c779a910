use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::AppState;
use crate::models::{Mapping, MappingListResponse, MappingResponse, Validate};

/// `POST /proxy/mappings`
pub async fn add_mapping(
    State(state): State<AppState>,
    payload: Result<Json<Mapping>, JsonRejection>,
) -> (StatusCode, Json<MappingResponse>) {
    let mapping = match payload {
        Ok(Json(mapping)) => mapping,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MappingResponse::failed(rejection.body_text())),
            );
        }
    };

    if let Err(e) = mapping.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(MappingResponse::failed(e.to_string())),
        );
    }

    tracing::info!(
        "Mapping {} -> {}",
        mapping.hostname,
        mapping.destination
    );
    state.mappings.upsert(mapping.clone());
    (StatusCode::CREATED, Json(MappingResponse::ok(mapping)))
}

/// `GET /proxy/mappings`
pub async fn list_mappings(State(state): State<AppState>) -> Json<MappingListResponse> {
    let mappings = state.mappings.list();
    Json(MappingListResponse {
        success: true,
        total: mappings.len(),
        mappings,
    })
}

/// `DELETE /proxy/mappings/{domain}`
pub async fn remove_mapping(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> (StatusCode, Json<MappingResponse>) {
    match state.mappings.remove(&domain) {
        Ok(()) => {
            tracing::info!("Removed mapping for {}", domain);
            (
                StatusCode::OK,
                Json(MappingResponse {
                    success: true,
                    mapping: None,
                    error: None,
                }),
            )
        }
        Err(e) => (StatusCode::NOT_FOUND, Json(MappingResponse::failed(e.to_string()))),
    }
}
