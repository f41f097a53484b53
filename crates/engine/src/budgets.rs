//! Per-user, per-trip budgets.
//!
//! A budget splits a planned amount across the five fixed categories; the
//! stored total is the sum of the allocations at creation time. Budgets are
//! strictly private to their owner.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CategorySet, EngineError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: String,
    pub allocations: CategorySet,
    pub total_budget: i64,
    pub created_at: DateTime<Utc>,
}

/// Planned vs spent, per category and overall. `remaining` may go negative
/// when the owner overspends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub spent: CategorySet,
    pub total_spent: i64,
    pub remaining: i64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub user_id: String,
    pub travel: i64,
    pub food: i64,
    pub stay: i64,
    pub activities: i64,
    pub misc: i64,
    pub total_budget: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            trip_id: ActiveValue::Set(budget.trip_id.to_string()),
            user_id: ActiveValue::Set(budget.user_id.clone()),
            travel: ActiveValue::Set(budget.allocations.travel),
            food: ActiveValue::Set(budget.allocations.food),
            stay: ActiveValue::Set(budget.allocations.stay),
            activities: ActiveValue::Set(budget.allocations.activities),
            misc: ActiveValue::Set(budget.allocations.misc),
            total_budget: ActiveValue::Set(budget.total_budget),
            created_at: ActiveValue::Set(budget.created_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            trip_id: Uuid::parse_str(&model.trip_id)
                .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
            user_id: model.user_id,
            allocations: CategorySet {
                travel: model.travel,
                food: model.food,
                stay: model.stay,
                activities: model.activities,
                misc: model.misc,
            },
            total_budget: model.total_budget,
            created_at: model.created_at,
        })
    }
}
