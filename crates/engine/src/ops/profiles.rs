//! Profile reads, the create-or-update upsert, and the stats counters
//! shown on the profile page.

use sea_orm::{PaginatorTrait, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{
    Profile, ProfileView, ResultEngine, TripStatus, UserStats, budgets, profiles,
    trip_requests, trip_requests::RequestStatus, trips, users,
};

use super::{Engine, with_tx};

impl Engine {
    /// A user's profile joined with their account email, or `None` when no
    /// profile has been created yet.
    pub async fn get_profile(&self, user_id: &str) -> ResultEngine<Option<ProfileView>> {
        with_tx!(self, |db_tx| {
            let Some(model) = profiles::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?
            else {
                return Ok(None);
            };
            let account = users::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?;
            Ok(Some(ProfileView {
                profile: model.try_into()?,
                email: account.and_then(|u| u.email),
            }))
        })
    }

    /// Create the caller's profile, or patch it when one exists. New
    /// profiles always start unverified.
    pub async fn upsert_profile(
        &self,
        user_id: &str,
        name: &str,
        bio: Option<&str>,
        interests: &[String],
        avatar: Option<&str>,
    ) -> ResultEngine<Profile> {
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;

            let existing = profiles::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?;

            let verified = existing.as_ref().is_some_and(|m| m.verified);
            let profile = Profile {
                user_id: user_id.to_string(),
                name: name.to_string(),
                bio: bio.map(ToString::to_string),
                interests: interests.to_vec(),
                verified,
                avatar: avatar.map(ToString::to_string),
            };

            if existing.is_some() {
                profiles::Entity::update_many()
                    .col_expr(profiles::Column::Name, Expr::value(profile.name.clone()))
                    .col_expr(profiles::Column::Bio, Expr::value(profile.bio.clone()))
                    .col_expr(
                        profiles::Column::Interests,
                        Expr::value(profiles::encode_tags(&profile.interests)),
                    )
                    .col_expr(
                        profiles::Column::Avatar,
                        Expr::value(profile.avatar.clone()),
                    )
                    .filter(profiles::Column::UserId.eq(user_id.to_string()))
                    .exec(&db_tx)
                    .await?;
            } else {
                let entry: profiles::ActiveModel = (&profile).into();
                entry.insert(&db_tx).await?;
            }
            Ok(profile)
        })
    }

    /// Aggregate counters: trips created and completed, trips joined
    /// through accepted requests, and the sum of all budget totals.
    pub async fn user_stats(&self, user_id: &str) -> ResultEngine<UserStats> {
        with_tx!(self, |db_tx| {
            let trips_created = trips::Entity::find()
                .filter(trips::Column::AuthorId.eq(user_id.to_string()))
                .count(&db_tx)
                .await?;

            let completed_trips = trips::Entity::find()
                .filter(trips::Column::AuthorId.eq(user_id.to_string()))
                .filter(trips::Column::Status.eq(TripStatus::Completed.as_str()))
                .count(&db_tx)
                .await?;

            let trips_joined = trip_requests::Entity::find()
                .filter(trip_requests::Column::RequesterId.eq(user_id.to_string()))
                .filter(trip_requests::Column::Status.eq(RequestStatus::Accepted.as_str()))
                .count(&db_tx)
                .await?;

            let total_budget_managed = budgets::Entity::find()
                .filter(budgets::Column::UserId.eq(user_id.to_string()))
                .all(&db_tx)
                .await?
                .iter()
                .map(|b| b.total_budget)
                .sum();

            Ok(UserStats {
                trips_created,
                trips_joined,
                total_budget_managed,
                completed_trips,
            })
        })
    }
}
