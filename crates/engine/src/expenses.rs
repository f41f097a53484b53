//! Expenses recorded against a budget.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ExpenseCategory};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub user_id: String,
    pub category: ExpenseCategory,
    pub amount: i64,
    pub description: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub budget_id: String,
    pub user_id: String,
    pub category: String,
    pub amount: i64,
    pub description: String,
    pub date: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id"
    )]
    Budget,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budget.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            budget_id: ActiveValue::Set(expense.budget_id.to_string()),
            user_id: ActiveValue::Set(expense.user_id.clone()),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            amount: ActiveValue::Set(expense.amount),
            description: ActiveValue::Set(expense.description.clone()),
            date: ActiveValue::Set(expense.date.clone()),
            created_at: ActiveValue::Set(expense.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("expense not exists".to_string()))?,
            budget_id: Uuid::parse_str(&model.budget_id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            user_id: model.user_id,
            category: ExpenseCategory::try_from(model.category.as_str())?,
            amount: model.amount,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
