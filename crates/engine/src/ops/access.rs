//! Shared lookup and authorization helpers used by the operation modules.
//!
//! Access failures surface differently by call kind: queries degrade to an
//! empty result at their call site, mutations get an error from these
//! helpers.

use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};

use crate::{
    EngineError, ResultEngine, budgets, messages::SenderSummary, profiles, trip_requests,
    trip_requests::RequestStatus, trips, users,
};

use super::Engine;

impl Engine {
    pub(super) async fn find_trip_by_id(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
    ) -> ResultEngine<Option<trips::Model>> {
        trips::Entity::find_by_id(trip_id.to_string())
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn require_trip_by_id(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
    ) -> ResultEngine<trips::Model> {
        self.find_trip_by_id(db, trip_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("trip not exists".to_string()))
    }

    pub(super) async fn find_budget_by_id(
        &self,
        db: &DatabaseTransaction,
        budget_id: &str,
    ) -> ResultEngine<Option<budgets::Model>> {
        budgets::Entity::find_by_id(budget_id.to_string())
            .one(db)
            .await
            .map_err(Into::into)
    }

    /// Budgets are private: anyone but the owner gets `Forbidden`.
    pub(super) async fn require_budget_owner(
        &self,
        db: &DatabaseTransaction,
        budget_id: &str,
        user_id: &str,
    ) -> ResultEngine<budgets::Model> {
        let model = self
            .find_budget_by_id(db, budget_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::Forbidden(
                "budget belongs to another user".to_string(),
            ));
        }
        Ok(model)
    }

    pub(super) async fn accepted_request(
        &self,
        db: &DatabaseTransaction,
        trip_id: &str,
        user_id: &str,
    ) -> ResultEngine<Option<trip_requests::Model>> {
        trip_requests::Entity::find()
            .filter(trip_requests::Column::TripId.eq(trip_id.to_string()))
            .filter(trip_requests::Column::RequesterId.eq(user_id.to_string()))
            .filter(trip_requests::Column::Status.eq(RequestStatus::Accepted.as_str()))
            .one(db)
            .await
            .map_err(Into::into)
    }

    /// Chat access belongs to the trip author and to travelers whose request
    /// was accepted.
    pub(super) async fn has_chat_access(
        &self,
        db: &DatabaseTransaction,
        trip: &trips::Model,
        user_id: &str,
    ) -> ResultEngine<bool> {
        if trip.author_id == user_id {
            return Ok(true);
        }
        Ok(self
            .accepted_request(db, &trip.id, user_id)
            .await?
            .is_some())
    }

    /// Display identity for a user: profile name, then account name, then
    /// "Unknown". The avatar only ever comes from the profile.
    pub(super) async fn display_identity(
        &self,
        db: &DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<SenderSummary> {
        let profile = profiles::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?;
        if let Some(profile) = profile {
            return Ok(SenderSummary {
                name: profile.name,
                avatar: profile.avatar,
            });
        }
        let account = users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?;
        Ok(SenderSummary {
            name: account
                .and_then(|u| u.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            avatar: None,
        })
    }

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
