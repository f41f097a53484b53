//! Trip chat API endpoints.

use api_types::message::MessageNew;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Message, Participant};

use crate::{ServerError, server::ServerState, user};

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<Message>>, ServerError> {
    Ok(Json(
        state.engine.trip_messages(&user.username, &trip_id).await?,
    ))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
    Json(payload): Json<MessageNew>,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    let message = state
        .engine
        .send_message(&user.username, &trip_id, &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// The roster is public, like the trip page itself.
pub async fn participants(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<Participant>>, ServerError> {
    Ok(Json(state.engine.trip_participants(&trip_id).await?))
}
