//! Weather API endpoint.

use api_types::weather::{WeatherQuery, WeatherReading};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::server::ServerState;

pub async fn current(
    State(state): State<ServerState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherReading> {
    Json(state.weather.current(&query.location))
}
