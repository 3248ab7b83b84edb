//! Route table.
//!
//! | Method | Path           | Handler                 |
//! |--------|----------------|-------------------------|
//! | GET    | `/`            | `endpoints::root`       |
//! | GET    | `/health`      | `endpoints::health`     |
//! | GET    | `/data/status` | `endpoints::data_status`|
//! | POST   | `/data/reload` | `endpoints::reload`     |
//! | POST   | `/predict`     | `endpoints::predict`    |
//!
//! CORS is fully permissive: the service is meant to sit behind a
//! browser front end on another origin.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(endpoints::root))
        .route("/health", get(endpoints::health))
        .route("/data/status", get(endpoints::data_status))
        .route("/data/reload", post(endpoints::reload))
        .route("/predict", post(endpoints::predict))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
