//! Expense endpoints

use api_types::{
    Amount, Message,
    expense::{Expense, ExpenseNew, ExpenseUpdate, Member},
};
use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use engine::{EngineError, Money};

use crate::{ServerError, identity::Identity, server::ServerState};

fn to_api_expense(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        description: expense.description,
        total_amount: expense.total_amount.to_string(),
        paid_by_user_id: expense.paid_by_user_id,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        members: expense
            .members
            .into_iter()
            .map(|member| Member {
                user_id: member.user_id,
                split_amount: member.split_amount.to_string(),
            })
            .collect(),
    }
}

fn parse_amount(amount: &Amount) -> Result<Money, EngineError> {
    amount.as_decimal_text().parse()
}

pub async fn add(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let Json(payload) = payload?;

    let total_amount = payload
        .total_amount
        .as_ref()
        .ok_or_else(|| EngineError::InvalidInput("totalAmount is required".to_string()))
        .and_then(parse_amount)?;

    let expense = state
        .engine
        .add_expense(
            identity.user_id,
            engine::ExpenseNew {
                description: payload.description.unwrap_or_default(),
                total_amount,
                member_ids: payload.member_ids.unwrap_or_default(),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(to_api_expense(expense))))
}

pub async fn list(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state.engine.expenses(identity.user_id).await?;
    Ok(Json(expenses.into_iter().map(to_api_expense).collect()))
}

pub async fn get(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    expense_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(expense_id) = expense_id?;
    let expense = state.engine.expense(expense_id, identity.user_id).await?;
    Ok(Json(to_api_expense(expense)))
}

pub async fn update(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    expense_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(expense_id) = expense_id?;
    let Json(payload) = payload?;

    let total_amount = payload.total_amount.as_ref().map(parse_amount).transpose()?;

    let expense = state
        .engine
        .update_expense(
            expense_id,
            identity.user_id,
            engine::ExpenseUpdate {
                description: payload.description,
                total_amount,
                member_ids: payload.member_ids,
            },
        )
        .await?;

    Ok(Json(to_api_expense(expense)))
}

pub async fn delete(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    expense_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ServerError> {
    let Path(expense_id) = expense_id?;
    state
        .engine
        .delete_expense(expense_id, identity.user_id)
        .await?;
    Ok(Json(Message::new("Expense deleted successfully")))
}
