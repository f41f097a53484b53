//! Profile API endpoints.

use api_types::profile::ProfileUpsert;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{Profile, ProfileView, UserStats};

use crate::{ServerError, server::ServerState, user};

pub async fn mine(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Option<ProfileView>>, ServerError> {
    Ok(Json(state.engine.get_profile(&user.username).await?))
}

pub async fn upsert(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpsert>,
) -> Result<Json<Profile>, ServerError> {
    let profile = state
        .engine
        .upsert_profile(
            &user.username,
            &payload.name,
            payload.bio.as_deref(),
            &payload.interests,
            payload.avatar.as_deref(),
        )
        .await?;
    Ok(Json(profile))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<Option<ProfileView>>, ServerError> {
    Ok(Json(state.engine.get_profile(&username).await?))
}

pub async fn my_stats(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<UserStats>, ServerError> {
    Ok(Json(state.engine.user_stats(&user.username).await?))
}

pub async fn stats(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<UserStats>, ServerError> {
    Ok(Json(state.engine.user_stats(&username).await?))
}
