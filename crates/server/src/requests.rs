//! Join-request API endpoints.

use api_types::request::{Decision, RequestNew, RequestRespond};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{RequestDecision, RequestWithRequester, RequestWithTrip, TripRequest};

use crate::{ServerError, server::ServerState, user};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<RequestNew>,
) -> Result<(StatusCode, Json<TripRequest>), ServerError> {
    let request = state
        .engine
        .send_trip_request(&user.username, &payload.trip_id, payload.message.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<RequestWithRequester>>, ServerError> {
    Ok(Json(
        state.engine.trip_requests(&user.username, &trip_id).await?,
    ))
}

pub async fn respond(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(request_id): Path<String>,
    Json(payload): Json<RequestRespond>,
) -> Result<StatusCode, ServerError> {
    let decision = match payload.response {
        Decision::Accepted => RequestDecision::Accepted,
        Decision::Rejected => RequestDecision::Rejected,
    };
    state
        .engine
        .respond_to_trip_request(&user.username, &request_id, decision)
        .await?;
    Ok(StatusCode::OK)
}

pub async fn mine(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<RequestWithTrip>>, ServerError> {
    Ok(Json(state.engine.user_requests(&user.username).await?))
}
