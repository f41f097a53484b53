use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use connectors::{AssistClient, PhotoClient, WeatherService};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{assist, budgets, messages, places, profiles, requests, states, trips, user, weather};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    pub assist: Arc<AssistClient>,
    pub photos: Arc<PhotoClient>,
    pub weather: Arc<WeatherService>,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<user::Model> = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Browsing endpoints: no credentials required.
fn public_router(state: ServerState) -> Router {
    Router::new()
        .route("/signup", post(user::signup))
        .route("/trips", get(trips::list))
        .route("/trips/search", get(trips::search))
        .route("/trips/{trip_id}", get(trips::get))
        .route("/trips/{trip_id}/participants", get(messages::participants))
        .route("/states", get(states::list))
        .route("/states/{code}", get(states::get))
        .route("/places/featured", get(places::featured))
        .route("/places/search", get(places::search))
        .route("/places/budget", get(places::by_budget))
        .route("/places/categories", get(places::popular_categories))
        .route("/places/states", get(places::states_with_places))
        .route("/places/state/{code}", get(places::by_state))
        .route("/places/category/{category}", get(places::by_category))
        .route("/places/{place_id}", get(places::get))
        .route("/weather", get(weather::current))
        .route("/photos/place", get(assist::place_photos))
        .route("/photos/destination", get(assist::destination_photos))
        .route("/photos/travel", get(assist::travel_photos))
        .with_state(state)
}

/// Everything that acts on behalf of a user sits behind Basic auth.
fn auth_router(state: ServerState) -> Router {
    Router::new()
        .route("/trips", post(trips::create))
        .route("/trips/{trip_id}/requests", get(requests::list))
        .route("/trips/{trip_id}/messages", get(messages::list).post(messages::create))
        .route("/trips/{trip_id}/budget", get(budgets::for_trip))
        .route("/requests", post(requests::create))
        .route("/requests/{request_id}/respond", post(requests::respond))
        .route("/budgets", post(budgets::create))
        .route("/budgets/{budget_id}/expenses", get(budgets::expenses).post(budgets::add_expense))
        .route("/budgets/{budget_id}/summary", get(budgets::summary))
        .route("/user/trips", get(trips::mine))
        .route("/user/requests", get(requests::mine))
        .route("/user/stats", get(profiles::my_stats))
        .route("/profile", get(profiles::mine).put(profiles::upsert))
        .route("/profiles/{username}", get(profiles::get))
        .route("/profiles/{username}/stats", get(profiles::stats))
        .route("/places", post(places::create))
        .route("/assist/itinerary", post(assist::itinerary))
        .route("/assist/chat", post(assist::chat))
        .route("/assist/destination", get(assist::destination_info))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

fn router(state: ServerState) -> Router {
    public_router(state.clone()).merge(auth_router(state))
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
