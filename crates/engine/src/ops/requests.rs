//! The join-request workflow: send, review, decide.

use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    EngineError, MessageKind, RequestDecision, RequestStatus, RequestWithRequester,
    RequestWithTrip, RequesterSummary, ResultEngine, Trip, TripRequest, TripStatus, messages,
    profiles, trip_requests, trips,
};

use super::{Engine, with_tx};

impl Engine {
    /// Ask to join a trip. A user gets one request per trip, whatever its
    /// outcome; only `open` trips accept requests and authors cannot
    /// request their own.
    pub async fn send_trip_request(
        &self,
        user_id: &str,
        trip_id: &str,
        message: Option<&str>,
    ) -> ResultEngine<TripRequest> {
        with_tx!(self, |db_tx| {
            let existing = trip_requests::Entity::find()
                .filter(trip_requests::Column::TripId.eq(trip_id.to_string()))
                .filter(trip_requests::Column::RequesterId.eq(user_id.to_string()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(
                    "Request already sent for this trip".to_string(),
                ));
            }

            let trip = self.find_trip_by_id(&db_tx, trip_id).await?;
            let Some(trip) = trip else {
                return Err(EngineError::TripUnavailable(trip_id.to_string()));
            };
            if TripStatus::try_from(trip.status.as_str())? != TripStatus::Open {
                return Err(EngineError::TripUnavailable(trip_id.to_string()));
            }
            if trip.author_id == user_id {
                return Err(EngineError::SelfRequest(trip_id.to_string()));
            }

            let request = TripRequest {
                id: Uuid::new_v4(),
                trip_id: Uuid::parse_str(&trip.id)
                    .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
                requester_id: user_id.to_string(),
                message: message.unwrap_or_default().to_string(),
                status: RequestStatus::Pending,
                created_at: Utc::now(),
            };
            let entry: trip_requests::ActiveModel = (&request).into();
            entry.insert(&db_tx).await?;
            Ok(request)
        })
    }

    /// The review roster for a trip. Only the author sees it; anyone else
    /// gets an empty list.
    pub async fn trip_requests(
        &self,
        user_id: &str,
        trip_id: &str,
    ) -> ResultEngine<Vec<RequestWithRequester>> {
        with_tx!(self, |db_tx| {
            let Some(trip) = self.find_trip_by_id(&db_tx, trip_id).await? else {
                return Ok(Vec::new());
            };
            if trip.author_id != user_id {
                return Ok(Vec::new());
            }

            let requests = trip_requests::Entity::find()
                .filter(trip_requests::Column::TripId.eq(trip_id.to_string()))
                .order_by_asc(trip_requests::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(requests.len());
            for model in requests {
                let requester = self.requester_summary(&db_tx, &model.requester_id).await?;
                out.push(RequestWithRequester {
                    request: model.try_into()?,
                    requester,
                });
            }
            Ok(out)
        })
    }

    /// Accept or reject a pending request. Only the trip author may decide.
    /// On acceptance the traveler count grows, the trip flips to `full`
    /// once capacity is reached, and a system message lands in the chat.
    pub async fn respond_to_trip_request(
        &self,
        user_id: &str,
        request_id: &str,
        decision: RequestDecision,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let request = trip_requests::Entity::find_by_id(request_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("request not exists".to_string()))?;

            let trip = self.find_trip_by_id(&db_tx, &request.trip_id).await?;
            let Some(trip) = trip else {
                return Err(EngineError::Forbidden(
                    "not the author of this trip".to_string(),
                ));
            };
            if trip.author_id != user_id {
                return Err(EngineError::Forbidden(
                    "not the author of this trip".to_string(),
                ));
            }

            trip_requests::Entity::update_many()
                .col_expr(
                    trip_requests::Column::Status,
                    Expr::value(decision.as_status().as_str()),
                )
                .filter(trip_requests::Column::Id.eq(request_id.to_string()))
                .exec(&db_tx)
                .await?;

            if decision == RequestDecision::Accepted {
                let new_count = trip.current_travelers + 1;
                let new_status = if new_count >= trip.max_travelers {
                    TripStatus::Full
                } else {
                    TripStatus::Open
                };
                trips::Entity::update_many()
                    .col_expr(trips::Column::CurrentTravelers, Expr::value(new_count))
                    .col_expr(trips::Column::Status, Expr::value(new_status.as_str()))
                    .filter(trips::Column::Id.eq(trip.id.clone()))
                    .exec(&db_tx)
                    .await?;

                let announcement = messages::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    trip_id: ActiveValue::Set(trip.id.clone()),
                    sender_id: ActiveValue::Set(user_id.to_string()),
                    content: ActiveValue::Set(
                        "A new traveler has joined the trip!".to_string(),
                    ),
                    kind: ActiveValue::Set(MessageKind::System.as_str().to_string()),
                    created_at: ActiveValue::Set(Utc::now()),
                };
                announcement.insert(&db_tx).await?;
            }

            Ok(())
        })
    }

    /// All requests a user has sent, each paired with its trip.
    pub async fn user_requests(&self, user_id: &str) -> ResultEngine<Vec<RequestWithTrip>> {
        with_tx!(self, |db_tx| {
            let requests = trip_requests::Entity::find()
                .filter(trip_requests::Column::RequesterId.eq(user_id.to_string()))
                .order_by_desc(trip_requests::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(requests.len());
            for model in requests {
                let trip = self
                    .find_trip_by_id(&db_tx, &model.trip_id)
                    .await?
                    .map(Trip::try_from)
                    .transpose()?;
                out.push(RequestWithTrip {
                    request: model.try_into()?,
                    trip,
                });
            }
            Ok(out)
        })
    }

    async fn requester_summary(
        &self,
        db_tx: &sea_orm::DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<RequesterSummary> {
        let profile = profiles::Entity::find_by_id(user_id.to_string())
            .one(db_tx)
            .await?;
        if let Some(profile) = profile {
            return Ok(RequesterSummary {
                name: profile.name,
                avatar: profile.avatar,
                bio: profile.bio,
                interests: profiles::decode_tags(&profile.interests)?,
            });
        }
        let identity = self.display_identity(db_tx, user_id).await?;
        Ok(RequesterSummary {
            name: identity.name,
            avatar: identity.avatar,
            bio: None,
            interests: Vec::new(),
        })
    }
}
