//! Planning-assistant and photo endpoints. These proxy to the external
//! providers; failures degrade to canned fallbacks or empty lists, so the
//! handlers themselves are infallible.

use api_types::{
    assist::{ChatReply, ChatRequest, DestinationQuery},
    destination::DestinationInfo,
    itinerary::{Itinerary, ItineraryRequest},
    photo::{DestinationPhotoQuery, PhotoView, PlacePhotoQuery, TravelPhotoQuery},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{server::ServerState, user};

pub async fn itinerary(
    Extension(_): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ItineraryRequest>,
) -> Json<Itinerary> {
    Json(state.assist.generate_itinerary(&payload).await)
}

pub async fn chat(
    Extension(_): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatReply> {
    let reply = state
        .assist
        .chat(&payload.message, payload.context.as_deref())
        .await;
    Json(ChatReply { reply })
}

pub async fn destination_info(
    Extension(_): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<DestinationQuery>,
) -> Json<DestinationInfo> {
    Json(state.assist.destination_info(&query.destination).await)
}

pub async fn place_photos(
    State(state): State<ServerState>,
    Query(query): Query<PlacePhotoQuery>,
) -> Json<Vec<PhotoView>> {
    Json(state.photos.place_images(&query.name, query.count).await)
}

pub async fn destination_photos(
    State(state): State<ServerState>,
    Query(query): Query<DestinationPhotoQuery>,
) -> Json<Vec<PhotoView>> {
    Json(
        state
            .photos
            .destination_images(&query.destination, query.category.as_deref())
            .await,
    )
}

pub async fn travel_photos(
    State(state): State<ServerState>,
    Query(query): Query<TravelPhotoQuery>,
) -> Json<Vec<PhotoView>> {
    Json(state.photos.random_travel_images(query.count).await)
}
