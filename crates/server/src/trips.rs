//! Trips API endpoints.

use api_types::trip::{TripListQuery, TripNew, TripSearchQuery};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{EngineError, NewTrip, Trip, TripSearch, TripStatus, TripWithAuthor};

use crate::{ServerError, server::ServerState, user};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TripNew>,
) -> Result<(StatusCode, Json<Trip>), ServerError> {
    let trip = state
        .engine
        .create_trip(
            &user.username,
            NewTrip {
                destination: payload.destination,
                start_date: payload.start_date,
                end_date: payload.end_date,
                budget: payload.budget,
                max_travelers: payload.max_travelers,
                interests: payload.interests,
                description: payload.description,
                image_url: payload.image_url,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(trip)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TripListQuery>,
) -> Result<Json<Vec<TripWithAuthor>>, ServerError> {
    let status = query
        .status
        .as_deref()
        .map(TripStatus::try_from)
        .transpose()?;
    Ok(Json(state.engine.list_trips(status, query.limit).await?))
}

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<TripSearchQuery>,
) -> Result<Json<Vec<TripWithAuthor>>, ServerError> {
    // interests arrive as a comma-separated list
    let interests = query.interests.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    });

    let trips = state
        .engine
        .search_trips(TripSearch {
            destination: query.destination,
            max_budget: query.max_budget,
            interests,
        })
        .await?;
    Ok(Json(trips))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<TripWithAuthor>, ServerError> {
    let trip = state
        .engine
        .trip_by_id(&trip_id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("trip not exists".to_string()))?;
    Ok(Json(trip))
}

pub async fn mine(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Trip>>, ServerError> {
    Ok(Json(state.engine.user_trips(&user.username).await?))
}
