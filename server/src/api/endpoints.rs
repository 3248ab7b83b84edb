//! Request handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use cohortrx_contracts::{
    patient::PatientQuery,
    prediction::{DataStatus, PredictionResponse},
};

use crate::api::error::ApiError;
use crate::api::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_loaded: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// `GET /`: liveness banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Drug Recommendation API is running",
        status: "healthy",
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.engine.snapshot();
    Json(HealthResponse {
        status: "healthy",
        data_loaded: snapshot.is_some(),
        loaded_at: snapshot.map(|c| c.loaded_at()),
    })
}

/// `GET /data/status`
pub async fn data_status(State(state): State<AppState>) -> Json<DataStatus> {
    Json(state.engine.status())
}

/// `POST /data/reload`: reload the configured dataset and swap it in.
///
/// On failure the previous corpus keeps serving.
pub async fn reload(State(state): State<AppState>) -> Result<Json<DataStatus>, ApiError> {
    let engine = Arc::clone(&state.engine);
    let source = Arc::clone(&state.source);
    let status = tokio::task::spawn_blocking(move || engine.reload(source.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("reload task failed: {e}")))??;
    Ok(Json(status))
}

/// `POST /predict`: recommend drugs for one patient.
pub async fn predict(
    State(state): State<AppState>,
    Json(query): Json<PatientQuery>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let engine = Arc::clone(&state.engine);

    // Matching scans the whole corpus; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || engine.predict(&query))
        .await
        .map_err(|e| ApiError::Internal(format!("prediction task failed: {e}")))??;

    info!(
        %request_id,
        recommendations = response.recommendations.len(),
        interactions = response.interactions.len(),
        similar_patients = response.similar_patients_count,
        "prediction served"
    );
    Ok(Json(response))
}
