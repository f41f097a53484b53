//! The server's view of an account: the row Basic auth checks against,
//! plus the signup endpoint.

use api_types::user::Signup;
use axum::{Json, extract::State, http::StatusCode};
use engine::EngineError;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{ServerError, server::ServerState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Register a new account. Usernames are unique.
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<Signup>,
) -> Result<StatusCode, ServerError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ServerError::Generic(
            "username and password are required".to_string(),
        ));
    }

    let existing = Entity::find_by_id(&payload.username)
        .one(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?;
    if existing.is_some() {
        return Err(EngineError::ExistingKey(payload.username).into());
    }

    let user = ActiveModel {
        username: ActiveValue::Set(payload.username),
        password: ActiveValue::Set(payload.password),
        name: ActiveValue::Set(payload.name),
        email: ActiveValue::Set(payload.email),
    };
    user.insert(&state.db)
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?;

    Ok(StatusCode::CREATED)
}
