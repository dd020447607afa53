//! Dev faucet and balance queries.
//!
//! The chain charges a fee per submission, so something must fund
//! addresses. In a real deployment funds arrive off-system; for development
//! and tests the faucet credits an address directly. Disabled via
//! `SAKSHI_FAUCET_ENABLED=false`.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use sakshi_core::ChainAddress;

use crate::error::AppError;
use crate::state::AppState;

/// Faucet request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct FaucetRequest {
    /// Address to credit.
    pub address: ChainAddress,
    /// Amount to credit.
    pub amount: u64,
}

/// Balance of an address after a faucet credit or on query.
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The queried address.
    pub address: ChainAddress,
    /// Its current balance.
    pub balance: u64,
}

/// Router for faucet and account queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/faucet", post(credit))
        .route("/v1/accounts/:address", get(balance))
}

/// POST /v1/faucet — credit an address (dev only).
async fn credit(
    State(state): State<AppState>,
    Json(req): Json<FaucetRequest>,
) -> Result<Json<BalanceResponse>, AppError> {
    if !state.config.faucet_enabled {
        return Err(AppError::Forbidden("faucet disabled".to_string()));
    }
    let mut chain = state.chain.write();
    chain.credit(req.address, req.amount);
    tracing::info!(address = %req.address, amount = req.amount, "faucet credit");
    Ok(Json(BalanceResponse {
        address: req.address,
        balance: chain.balance(&req.address),
    }))
}

/// GET /v1/accounts/{address} — current balance (0 if never funded).
async fn balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let address =
        ChainAddress::from_hex(&address).map_err(|e| AppError::Validation(e.to_string()))?;
    let balance = state.chain.read().balance(&address);
    Ok(Json(BalanceResponse { address, balance }))
}
