//! Request surface for the account core. Thin: deserialize, call the
//! service, serialize. All policy lives in `services::account_service`.

use axum::{
    Json,
    extract::{Path, State},
};
use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::AppState;
use crate::domain::Account;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMoneyRequest {
    pub account_number: String,
    pub amount: BigDecimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMoneyRequest {
    pub sender_account_number: String,
    pub receiver_account_number: String,
    pub amount: BigDecimal,
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    let account = state.service.create_account(request.user_id).await?;
    Ok(Json(account))
}

pub async fn add_money(
    State(state): State<AppState>,
    Json(request): Json<AddMoneyRequest>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .service
        .credit(&request.account_number, &request.amount)
        .await?;
    Ok(Json(account))
}

pub async fn send_money(
    State(state): State<AppState>,
    Json(request): Json<SendMoneyRequest>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .service
        .transfer(
            &request.sender_account_number,
            &request.receiver_account_number,
            &request.amount,
        )
        .await?;
    Ok(Json(account))
}

pub async fn view_balance(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<BigDecimal>, AppError> {
    let balance = state.service.view_balance(&account_number).await?;
    Ok(Json(balance))
}
