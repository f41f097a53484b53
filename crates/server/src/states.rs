//! State-catalog API endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use engine::EngineError;

use crate::{ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<engine::State>>, ServerError> {
    Ok(Json(state.engine.all_states().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<engine::State>, ServerError> {
    let found = state
        .engine
        .state_by_code(&code)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("state not exists".to_string()))?;
    Ok(Json(found))
}
