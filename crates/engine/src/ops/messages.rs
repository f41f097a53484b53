//! Trip chat: message history, posting, participant roster.

use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Message, MessageKind, Participant, ParticipantRole, ResultEngine, SenderSummary,
    messages, trip_requests, trip_requests::RequestStatus,
};

use super::{Engine, with_tx};

impl Engine {
    /// Chat history in posting order. Users without chat access (and
    /// unknown trips) read an empty list rather than an error.
    pub async fn trip_messages(&self, user_id: &str, trip_id: &str) -> ResultEngine<Vec<Message>> {
        with_tx!(self, |db_tx| {
            let Some(trip) = self.find_trip_by_id(&db_tx, trip_id).await? else {
                return Ok(Vec::new());
            };
            if !self.has_chat_access(&db_tx, &trip, user_id).await? {
                return Ok(Vec::new());
            }

            let models = messages::Entity::find()
                .filter(messages::Column::TripId.eq(trip_id.to_string()))
                .order_by_asc(messages::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(models.len());
            for model in models {
                let kind = MessageKind::try_from(model.kind.as_str())?;
                let sender = if kind == MessageKind::System {
                    SenderSummary {
                        name: "System".to_string(),
                        avatar: None,
                    }
                } else {
                    self.display_identity(&db_tx, &model.sender_id).await?
                };
                out.push(Message {
                    id: Uuid::parse_str(&model.id).map_err(|_| {
                        EngineError::KeyNotFound("message not exists".to_string())
                    })?,
                    trip_id: Uuid::parse_str(&model.trip_id)
                        .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
                    sender_id: model.sender_id,
                    content: model.content,
                    kind,
                    sender,
                    created_at: model.created_at,
                });
            }
            Ok(out)
        })
    }

    /// Post a text message. Unlike reads, writing into a chat without
    /// access is an error.
    pub async fn send_message(
        &self,
        user_id: &str,
        trip_id: &str,
        content: &str,
    ) -> ResultEngine<Message> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_by_id(&db_tx, trip_id).await?;
            if !self.has_chat_access(&db_tx, &trip, user_id).await? {
                return Err(EngineError::Forbidden(
                    "no chat access for this trip".to_string(),
                ));
            }

            let sender = self.display_identity(&db_tx, user_id).await?;
            let message = Message {
                id: Uuid::new_v4(),
                trip_id: Uuid::parse_str(&trip.id)
                    .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
                sender_id: user_id.to_string(),
                content: content.to_string(),
                kind: MessageKind::Text,
                sender,
                created_at: Utc::now(),
            };
            let entry: messages::ActiveModel = (&message).into();
            entry.insert(&db_tx).await?;
            Ok(message)
        })
    }

    /// The trip roster: the author first, then accepted travelers in
    /// acceptance order. Public, like the trip page itself.
    pub async fn trip_participants(&self, trip_id: &str) -> ResultEngine<Vec<Participant>> {
        with_tx!(self, |db_tx| {
            let Some(trip) = self.find_trip_by_id(&db_tx, trip_id).await? else {
                return Ok(Vec::new());
            };

            let author = self.display_identity(&db_tx, &trip.author_id).await?;
            let mut participants = vec![Participant {
                user_id: trip.author_id.clone(),
                name: author.name,
                avatar: author.avatar,
                role: ParticipantRole::Author,
            }];

            let accepted = trip_requests::Entity::find()
                .filter(trip_requests::Column::TripId.eq(trip_id.to_string()))
                .filter(trip_requests::Column::Status.eq(RequestStatus::Accepted.as_str()))
                .order_by_asc(trip_requests::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            for request in accepted {
                let member = self.display_identity(&db_tx, &request.requester_id).await?;
                participants.push(Participant {
                    user_id: request.requester_id,
                    name: member.name,
                    avatar: member.avatar,
                    role: ParticipantRole::Member,
                });
            }
            Ok(participants)
        })
    }
}
