//! Per-trip chat messages and the participant roster.
//!
//! Chat access is restricted to the trip author and travelers whose join
//! request was accepted. `system` messages are emitted by the engine itself
//! (for example when a traveler joins) and rendered under a synthetic
//! "System" sender.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    System,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::System => "system",
        }
    }
}

impl TryFrom<&str> for MessageKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "text" => Ok(Self::Text),
            "system" => Ok(Self::System),
            other => Err(EngineError::InvalidValue(format!(
                "invalid message kind: {other}"
            ))),
        }
    }
}

/// Display identity attached to every message in a chat listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SenderSummary {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub sender_id: String,
    pub content: String,
    pub kind: MessageKind,
    pub sender: SenderSummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Author,
    Member,
}

/// One member of a trip: the author, or a traveler whose request was
/// accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: ParticipantRole,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub sender_id: String,
    pub content: String,
    pub kind: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trips::Entity",
        from = "Column::TripId",
        to = "super::trips::Column::Id"
    )]
    Trip,
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Message> for ActiveModel {
    fn from(message: &Message) -> Self {
        Self {
            id: ActiveValue::Set(message.id.to_string()),
            trip_id: ActiveValue::Set(message.trip_id.to_string()),
            sender_id: ActiveValue::Set(message.sender_id.clone()),
            content: ActiveValue::Set(message.content.clone()),
            kind: ActiveValue::Set(message.kind.as_str().to_string()),
            created_at: ActiveValue::Set(message.created_at),
        }
    }
}
