//! Tourist-place catalog API endpoints.

use api_types::place::{FeaturedQuery, PlaceBudgetQuery, PlaceNew, PlaceSearchQuery};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{CategoryCount, EngineError, Place, StatePlaceCount};

use crate::{ServerError, server::ServerState, user};

pub async fn create(
    Extension(_): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PlaceNew>,
) -> Result<(StatusCode, Json<Place>), ServerError> {
    let place = state
        .engine
        .create_place(engine::NewPlace {
            state: payload.state,
            state_code: payload.state_code,
            place_name: payload.place_name,
            category: payload.category,
            description: payload.description,
            timings: payload.timings,
            entry_fee: payload.entry_fee,
            best_time: payload.best_time,
            nearest_railway: payload.nearest_railway,
            nearest_bus: payload.nearest_bus,
            nearest_airport: payload.nearest_airport,
            metro_station: payload.metro_station,
            accessibility: payload.accessibility,
            guided_tours: payload.guided_tours,
            parking: payload.parking,
            nearby_amenities: payload.nearby_amenities,
            official_website: payload.official_website,
            wikipedia: payload.wikipedia,
            special_notes: payload.special_notes,
            image_url: payload.image_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(place)))
}

pub async fn featured(
    State(state): State<ServerState>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<Vec<Place>>, ServerError> {
    Ok(Json(state.engine.featured_places(query.limit).await?))
}

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<PlaceSearchQuery>,
) -> Result<Json<Vec<Place>>, ServerError> {
    Ok(Json(state.engine.search_places(&query.q).await?))
}

pub async fn by_budget(
    State(state): State<ServerState>,
    Query(query): Query<PlaceBudgetQuery>,
) -> Result<Json<Vec<Place>>, ServerError> {
    Ok(Json(
        state
            .engine
            .places_by_budget(query.min_budget, query.max_budget)
            .await?,
    ))
}

pub async fn popular_categories(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryCount>>, ServerError> {
    Ok(Json(state.engine.popular_categories().await?))
}

pub async fn states_with_places(
    State(state): State<ServerState>,
) -> Result<Json<Vec<StatePlaceCount>>, ServerError> {
    Ok(Json(state.engine.states_with_places().await?))
}

pub async fn by_state(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<Place>>, ServerError> {
    Ok(Json(state.engine.places_by_state(&code).await?))
}

pub async fn by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Place>>, ServerError> {
    Ok(Json(state.engine.places_by_category(&category).await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(place_id): Path<String>,
) -> Result<Json<Place>, ServerError> {
    let place = state
        .engine
        .place_by_id(&place_id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("place not exists".to_string()))?;
    Ok(Json(place))
}
