pub mod adapters;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod ports;
pub mod services;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::ports::LedgerStore;
use crate::services::AccountService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AccountService>,
    pub ledger: Arc<dyn LedgerStore>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/accounts/create", post(handlers::accounts::create_account))
        .route("/accounts/add", post(handlers::accounts::add_money))
        .route("/accounts/send", post(handlers::accounts::send_money))
        .route(
            "/accounts/balance/:account_number",
            get(handlers::accounts::view_balance),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
