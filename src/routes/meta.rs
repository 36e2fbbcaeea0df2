use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::AppState;

/// Service metadata shown to clients before they pick a mode
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    /// Whether the server holds a SerpAPI key of its own
    pub has_serpapi: bool,
    pub environment: String,
    pub version: &'static str,
}

pub async fn meta(State(state): State<Arc<AppState>>) -> Json<MetaResponse> {
    Json(MetaResponse {
        has_serpapi: state.config.serpapi_key().is_some(),
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
