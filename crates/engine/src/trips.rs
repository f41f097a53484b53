//! Trip primitives.
//!
//! A `Trip` is a journey posted by one author with capacity for co-travelers.
//! The author counts as the first traveler; capacity changes only through the
//! request-acceptance path in `ops::requests`.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, profiles};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Open,
    Full,
    Completed,
}

impl TripStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Full => "full",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TripStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "open" => Ok(Self::Open),
            "full" => Ok(Self::Full),
            "completed" => Ok(Self::Completed),
            other => Err(EngineError::InvalidValue(format!(
                "invalid trip status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub author_id: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: i64,
    pub max_travelers: i32,
    pub current_travelers: i32,
    pub interests: Vec<String>,
    pub description: String,
    pub status: TripStatus,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Arguments for creating a trip. The engine fills in the author, the
/// traveler count and the initial status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: i64,
    pub max_travelers: i32,
    pub interests: Vec<String>,
    pub description: String,
    pub image_url: Option<String>,
}

/// Search filters. Each filter is applied only when present:
/// case-insensitive substring on destination, inclusive upper bound on
/// budget, any-interest overlap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TripSearch {
    pub destination: Option<String>,
    pub max_budget: Option<i64>,
    pub interests: Option<Vec<String>>,
}

/// Denormalized author display attached to trip listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripWithAuthor {
    pub trip: Trip,
    pub author: AuthorSummary,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub author_id: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: i64,
    pub max_travelers: i32,
    pub current_travelers: i32,
    /// JSON-encoded array of interest tags.
    pub interests: String,
    pub description: String,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trip_requests::Entity")]
    TripRequests,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::trip_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripRequests.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Trip> for ActiveModel {
    fn from(trip: &Trip) -> Self {
        Self {
            id: ActiveValue::Set(trip.id.to_string()),
            author_id: ActiveValue::Set(trip.author_id.clone()),
            destination: ActiveValue::Set(trip.destination.clone()),
            start_date: ActiveValue::Set(trip.start_date.clone()),
            end_date: ActiveValue::Set(trip.end_date.clone()),
            budget: ActiveValue::Set(trip.budget),
            max_travelers: ActiveValue::Set(trip.max_travelers),
            current_travelers: ActiveValue::Set(trip.current_travelers),
            interests: ActiveValue::Set(profiles::encode_tags(&trip.interests)),
            description: ActiveValue::Set(trip.description.clone()),
            status: ActiveValue::Set(trip.status.as_str().to_string()),
            image_url: ActiveValue::Set(trip.image_url.clone()),
            created_at: ActiveValue::Set(trip.created_at),
        }
    }
}

impl TryFrom<Model> for Trip {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
            author_id: model.author_id,
            destination: model.destination,
            start_date: model.start_date,
            end_date: model.end_date,
            budget: model.budget,
            max_travelers: model.max_travelers,
            current_travelers: model.current_travelers,
            interests: profiles::decode_tags(&model.interests)?,
            description: model.description,
            status: TripStatus::try_from(model.status.as_str())?,
            image_url: model.image_url,
            created_at: model.created_at,
        })
    }
}
