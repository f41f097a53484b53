//! Join requests: the workflow through which a traveler asks to join a trip.
//!
//! Each (trip, requester) pair can hold at most one request, whatever its
//! status. Only the trip author may decide a request.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(EngineError::InvalidValue(format!(
                "invalid request status: {other}"
            ))),
        }
    }
}

/// The author's verdict on a pending request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

impl RequestDecision {
    pub fn as_status(self) -> RequestStatus {
        match self {
            Self::Accepted => RequestStatus::Accepted,
            Self::Rejected => RequestStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub requester_id: String,
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Requester details shown to the trip author when reviewing requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequesterSummary {
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestWithRequester {
    pub request: TripRequest,
    pub requester: RequesterSummary,
}

/// A request paired with its trip, as listed on the requester's own page.
/// The trip is `None` when it has since been deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestWithTrip {
    pub request: TripRequest,
    pub trip: Option<crate::Trip>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "trip_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub requester_id: String,
    pub message: String,
    pub status: String,
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

impl From<&TripRequest> for ActiveModel {
    fn from(request: &TripRequest) -> Self {
        Self {
            id: ActiveValue::Set(request.id.to_string()),
            trip_id: ActiveValue::Set(request.trip_id.to_string()),
            requester_id: ActiveValue::Set(request.requester_id.clone()),
            message: ActiveValue::Set(request.message.clone()),
            status: ActiveValue::Set(request.status.as_str().to_string()),
            created_at: ActiveValue::Set(request.created_at),
        }
    }
}

impl TryFrom<Model> for TripRequest {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("request not exists".to_string()))?,
            trip_id: Uuid::parse_str(&model.trip_id)
                .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
            requester_id: model.requester_id,
            message: model.message,
            status: RequestStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
        })
    }
}
