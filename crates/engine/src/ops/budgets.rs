//! Budgets and expenses. Strictly private: reads from anyone but the
//! owner come back empty, writes fail.

use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Budget, BudgetSummary, CategorySet, EngineError, Expense, ExpenseCategory, ResultEngine,
    budgets, expenses,
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a budget for a trip. One budget per (trip, user); the stored
    /// total is the sum of the category allocations.
    pub async fn create_budget(
        &self,
        user_id: &str,
        trip_id: &str,
        allocations: CategorySet,
    ) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_by_id(&db_tx, trip_id).await?;

            let existing = budgets::Entity::find()
                .filter(budgets::Column::TripId.eq(trip_id.to_string()))
                .filter(budgets::Column::UserId.eq(user_id.to_string()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(
                    "budget already exists for this trip".to_string(),
                ));
            }

            let budget = Budget {
                id: Uuid::new_v4(),
                trip_id: Uuid::parse_str(&trip.id)
                    .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
                user_id: user_id.to_string(),
                allocations,
                total_budget: allocations.total(),
                created_at: Utc::now(),
            };
            let entry: budgets::ActiveModel = (&budget).into();
            entry.insert(&db_tx).await?;
            Ok(budget)
        })
    }

    /// The caller's own budget for a trip, if any.
    pub async fn trip_budget(&self, user_id: &str, trip_id: &str) -> ResultEngine<Option<Budget>> {
        with_tx!(self, |db_tx| {
            budgets::Entity::find()
                .filter(budgets::Column::TripId.eq(trip_id.to_string()))
                .filter(budgets::Column::UserId.eq(user_id.to_string()))
                .one(&db_tx)
                .await?
                .map(Budget::try_from)
                .transpose()
        })
    }

    /// Record an expense against one of the owner's budgets.
    pub async fn add_expense(
        &self,
        user_id: &str,
        budget_id: &str,
        category: ExpenseCategory,
        amount: i64,
        description: &str,
        date: &str,
    ) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let budget = self.require_budget_owner(&db_tx, budget_id, user_id).await?;

            let expense = Expense {
                id: Uuid::new_v4(),
                budget_id: Uuid::parse_str(&budget.id)
                    .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
                user_id: user_id.to_string(),
                category,
                amount,
                description: description.to_string(),
                date: date.to_string(),
                created_at: Utc::now(),
            };
            let entry: expenses::ActiveModel = (&expense).into();
            entry.insert(&db_tx).await?;
            Ok(expense)
        })
    }

    /// Expense history, newest first. Empty for non-owners.
    pub async fn budget_expenses(
        &self,
        user_id: &str,
        budget_id: &str,
    ) -> ResultEngine<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            let Some(budget) = self.find_budget_by_id(&db_tx, budget_id).await? else {
                return Ok(Vec::new());
            };
            if budget.user_id != user_id {
                return Ok(Vec::new());
            }

            expenses::Entity::find()
                .filter(expenses::Column::BudgetId.eq(budget_id.to_string()))
                .order_by_desc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expense::try_from)
                .collect()
        })
    }

    /// Planned vs spent per category. `remaining` goes negative on
    /// overspend. `None` for non-owners and unknown budgets.
    pub async fn budget_summary(
        &self,
        user_id: &str,
        budget_id: &str,
    ) -> ResultEngine<Option<BudgetSummary>> {
        with_tx!(self, |db_tx| {
            let Some(model) = self.find_budget_by_id(&db_tx, budget_id).await? else {
                return Ok(None);
            };
            if model.user_id != user_id {
                return Ok(None);
            }

            let rows = expenses::Entity::find()
                .filter(expenses::Column::BudgetId.eq(budget_id.to_string()))
                .all(&db_tx)
                .await?;

            let mut spent = CategorySet::default();
            for row in rows {
                spent.add(ExpenseCategory::try_from(row.category.as_str())?, row.amount);
            }

            let budget = Budget::try_from(model)?;
            let total_spent = spent.total();
            Ok(Some(BudgetSummary {
                remaining: budget.total_budget - total_spent,
                budget,
                spent,
                total_spent,
            }))
        })
    }
}
