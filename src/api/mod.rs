//! HTTP surface: a thin request/response mapper over the engine.
//!
//! Handlers validate the user, take one lock guard for the duration of the
//! request, and hand the store to the engine. No domain logic lives here.

mod error;

pub use error::ApiError;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::engine::{self, BalanceReport};
use crate::model::{NewTransaction, Transaction, TxId, UserId};
use crate::store::InMemoryLedger;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<InMemoryLedger>>,
}

/// Build the service router.
pub fn router(ledger: Arc<RwLock<InMemoryLedger>>) -> Router {
    let state = AppState { ledger };

    Router::new()
        .route("/health", get(health))
        .route(
            "/users/:user_id/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/users/:user_id/transactions/:transaction_id",
            get(get_transaction),
        )
        .route("/users/:user_id/balance", get(get_balance))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn ensure_user(ledger: &InMemoryLedger, user: UserId) -> Result<(), ApiError> {
    if ledger.user_exists(user) {
        Ok(())
    } else {
        Err(ApiError::UserNotFound(user))
    }
}

/// All transactions of a user.
async fn list_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let ledger = state.ledger.read();
    ensure_user(&ledger, user_id)?;
    Ok(Json(ledger.all(user_id)))
}

/// A single transaction of a user.
async fn get_transaction(
    State(state): State<AppState>,
    Path((user_id, transaction_id)): Path<(UserId, TxId)>,
) -> Result<Json<Transaction>, ApiError> {
    let ledger = state.ledger.read();
    ensure_user(&ledger, user_id)?;
    ledger
        .get(user_id, transaction_id)
        .map(Json)
        .ok_or(ApiError::TransactionNotFound(transaction_id))
}

/// Record a new transaction in the user's ledger.
async fn create_transaction(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(new): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    if new.amount.is_negative() {
        return Err(ApiError::NegativeAmount);
    }

    let mut ledger = state.ledger.write();
    ensure_user(&ledger, user_id)?;
    let tx = ledger.insert(user_id, new);
    info!(user = user_id, tx = tx.id, kind = ?tx.kind, "transaction recorded");
    Ok((StatusCode::CREATED, Json(tx)))
}

/// Balance report: completed withdrawals, scheduled-withdrawal coverage, and
/// the net balance.
async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<BalanceReport>, ApiError> {
    // one read guard across all queries keeps the report internally consistent
    let ledger = state.ledger.read();
    ensure_user(&ledger, user_id)?;
    Ok(Json(engine::report(&*ledger, user_id)))
}
