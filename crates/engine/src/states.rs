//! Indian states shown on the destination map, with their headline
//! attractions. Seeded once at startup; `code` is unique.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError,
    profiles::{decode_tags, encode_tags},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub attractions: Vec<String>,
    pub best_time: String,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "states")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: String,
    /// JSON-encoded array of attraction names.
    pub attractions: String,
    pub best_time: String,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&State> for ActiveModel {
    fn from(state: &State) -> Self {
        Self {
            id: ActiveValue::Set(state.id.to_string()),
            code: ActiveValue::Set(state.code.clone()),
            name: ActiveValue::Set(state.name.clone()),
            description: ActiveValue::Set(state.description.clone()),
            attractions: ActiveValue::Set(encode_tags(&state.attractions)),
            best_time: ActiveValue::Set(state.best_time.clone()),
            image_url: ActiveValue::Set(state.image_url.clone()),
        }
    }
}

impl TryFrom<Model> for State {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("state not exists".to_string()))?,
            code: model.code,
            name: model.name,
            description: model.description,
            attractions: decode_tags(&model.attractions)?,
            best_time: model.best_time,
            image_url: model.image_url,
        })
    }
}
