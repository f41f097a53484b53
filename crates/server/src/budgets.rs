//! Budget and expense API endpoints.

use api_types::budget::{BudgetNew, ExpenseNew};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Budget, BudgetSummary, CategorySet, Expense, ExpenseCategory};

use crate::{ServerError, server::ServerState, user};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<Budget>), ServerError> {
    let categories = payload.categories;
    let budget = state
        .engine
        .create_budget(
            &user.username,
            &payload.trip_id,
            CategorySet {
                travel: categories.travel,
                food: categories.food,
                stay: categories.stay,
                activities: categories.activities,
                misc: categories.misc,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

pub async fn for_trip(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Option<Budget>>, ServerError> {
    Ok(Json(
        state.engine.trip_budget(&user.username, &trip_id).await?,
    ))
}

pub async fn add_expense(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(budget_id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let category = ExpenseCategory::try_from(payload.category.as_str())?;
    let expense = state
        .engine
        .add_expense(
            &user.username,
            &budget_id,
            category,
            payload.amount,
            &payload.description,
            &payload.date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn expenses(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(budget_id): Path<String>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    Ok(Json(
        state
            .engine
            .budget_expenses(&user.username, &budget_id)
            .await?,
    ))
}

pub async fn summary(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(budget_id): Path<String>,
) -> Result<Json<Option<BudgetSummary>>, ServerError> {
    Ok(Json(
        state
            .engine
            .budget_summary(&user.username, &budget_id)
            .await?,
    ))
}
