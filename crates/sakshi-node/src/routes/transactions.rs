//! Transaction broadcast and receipt queries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use sakshi_core::{TransactionId, TransactionReceipt};
use sakshi_ledger::SignedTransaction;

use crate::error::AppError;
use crate::state::AppState;

/// Response to a successful broadcast.
#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastResponse {
    /// Id under which the transaction entered the pending pool.
    pub transaction_id: TransactionId,
}

/// Router for `/v1/transactions/*`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/transactions", post(broadcast))
        .route("/v1/transactions/:id", get(receipt))
}

/// POST /v1/transactions — accept a signed transaction into the pool.
///
/// Returns `202 Accepted` with the transaction id. Acceptance is not
/// confirmation: the caller polls the receipt endpoint for inclusion.
async fn broadcast(
    State(state): State<AppState>,
    Json(tx): Json<SignedTransaction>,
) -> Result<(StatusCode, Json<BroadcastResponse>), AppError> {
    let id = state.chain.write().broadcast(tx)?;
    Ok((StatusCode::ACCEPTED, Json(BroadcastResponse { transaction_id: id })))
}

/// GET /v1/transactions/{id} — the receipt for a broadcast transaction.
async fn receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionReceipt>, AppError> {
    let id = TransactionId::from_hex(&id).map_err(|e| AppError::Validation(e.to_string()))?;
    let chain = state.chain.read();
    chain
        .receipt(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("transaction {id}")))
}
