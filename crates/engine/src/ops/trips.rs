//! Trip browsing, creation and search.

use chrono::Utc;
use sea_orm::{
    DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    AuthorSummary, NewTrip, ResultEngine, Trip, TripSearch, TripStatus, TripWithAuthor, trips,
};

use super::{Engine, with_tx};

const DEFAULT_LIST_LIMIT: u64 = 20;

impl Engine {
    /// Post a new trip. The author counts as the first traveler and the
    /// trip starts out `open`.
    pub async fn create_trip(&self, user_id: &str, args: NewTrip) -> ResultEngine<Trip> {
        let trip = Trip {
            id: Uuid::new_v4(),
            author_id: user_id.to_string(),
            destination: args.destination,
            start_date: args.start_date,
            end_date: args.end_date,
            budget: args.budget,
            max_travelers: args.max_travelers,
            current_travelers: 1,
            interests: args.interests,
            description: args.description,
            status: TripStatus::Open,
            image_url: args.image_url,
            created_at: Utc::now(),
        };
        let entry: trips::ActiveModel = (&trip).into();
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            entry.insert(&db_tx).await?;
            Ok(trip)
        })
    }

    /// Newest trips first, optionally filtered by status.
    pub async fn list_trips(
        &self,
        status: Option<TripStatus>,
        limit: Option<u64>,
    ) -> ResultEngine<Vec<TripWithAuthor>> {
        with_tx!(self, |db_tx| {
            let mut query = trips::Entity::find()
                .order_by_desc(trips::Column::CreatedAt)
                .limit(limit.unwrap_or(DEFAULT_LIST_LIMIT));
            if let Some(status) = status {
                query = query.filter(trips::Column::Status.eq(status.as_str()));
            }
            let models = query.all(&db_tx).await?;
            self.attach_authors(&db_tx, models).await
        })
    }

    /// A single trip with its author, or `None` when the id is unknown.
    pub async fn trip_by_id(&self, trip_id: &str) -> ResultEngine<Option<TripWithAuthor>> {
        with_tx!(self, |db_tx| {
            let Some(model) = self.find_trip_by_id(&db_tx, trip_id).await? else {
                return Ok(None);
            };
            let author = self.display_identity(&db_tx, &model.author_id).await?;
            Ok(Some(TripWithAuthor {
                trip: model.try_into()?,
                author: AuthorSummary {
                    name: author.name,
                    avatar: author.avatar,
                },
            }))
        })
    }

    /// All trips a user has posted, newest first.
    pub async fn user_trips(&self, user_id: &str) -> ResultEngine<Vec<Trip>> {
        with_tx!(self, |db_tx| {
            trips::Entity::find()
                .filter(trips::Column::AuthorId.eq(user_id.to_string()))
                .order_by_desc(trips::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Trip::try_from)
                .collect()
        })
    }

    /// Full-scan search. Each filter applies only when present:
    /// case-insensitive substring on destination, inclusive budget cap,
    /// any-interest overlap.
    pub async fn search_trips(&self, filter: TripSearch) -> ResultEngine<Vec<TripWithAuthor>> {
        with_tx!(self, |db_tx| {
            let models = trips::Entity::find()
                .order_by_desc(trips::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut matches = Vec::new();
            for model in models {
                let trip = Trip::try_from(model)?;
                if let Some(destination) = &filter.destination
                    && !trip
                        .destination
                        .to_lowercase()
                        .contains(&destination.to_lowercase())
                {
                    continue;
                }
                if let Some(max_budget) = filter.max_budget
                    && trip.budget > max_budget
                {
                    continue;
                }
                if let Some(interests) = &filter.interests
                    && !interests.is_empty()
                    && !trip.interests.iter().any(|i| interests.contains(i))
                {
                    continue;
                }
                matches.push(trip);
            }

            let mut out = Vec::with_capacity(matches.len());
            for trip in matches {
                let author = self.display_identity(&db_tx, &trip.author_id).await?;
                out.push(TripWithAuthor {
                    trip,
                    author: AuthorSummary {
                        name: author.name,
                        avatar: author.avatar,
                    },
                });
            }
            Ok(out)
        })
    }

    async fn attach_authors(
        &self,
        db_tx: &DatabaseTransaction,
        models: Vec<trips::Model>,
    ) -> ResultEngine<Vec<TripWithAuthor>> {
        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let author = self.display_identity(db_tx, &model.author_id).await?;
            out.push(TripWithAuthor {
                trip: model.try_into()?,
                author: AuthorSummary {
                    name: author.name,
                    avatar: author.avatar,
                },
            });
        }
        Ok(out)
    }
}
