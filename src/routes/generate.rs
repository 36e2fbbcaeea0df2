use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{EngineResult, GenerateRequest},
    routes::AppState,
    services::generation,
};

/// Handler for outfit generation
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<EngineResult>> {
    let Json(request) = payload?;

    tracing::info!(
        request_id = %request_id,
        purpose = %request.intake.purpose,
        country = %request.intake.country,
        outfits_count = request.outfits_count,
        "Processing generate request"
    );

    let result = generation::generate(request, &state.config, &state.http_client).await?;

    tracing::info!(
        request_id = %request_id,
        mode = ?result.mode,
        outfits = result.outfits.len(),
        "Generation completed"
    );

    Ok(Json(result))
}
