//! Ledger read path: records, head, events.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use sakshi_core::{EvidenceRecord, LedgerEvent, SequenceId};

use crate::error::AppError;
use crate::state::AppState;

/// Summary of the ledger head.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeadResponse {
    /// The sequence id the next confirmed submission will receive.
    pub next_sequence_id: SequenceId,
    /// Number of blocks produced.
    pub block_height: u64,
}

/// Router for the read path.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/records", get(list_records))
        .route("/v1/records/head", get(head))
        .route("/v1/records/:seq", get(get_record))
        .route("/v1/events", get(list_events))
}

/// GET /v1/records — all records in submission order.
async fn list_records(State(state): State<AppState>) -> Json<Vec<EvidenceRecord>> {
    Json(state.chain.read().records().to_vec())
}

/// GET /v1/records/head — next sequence id and block height.
async fn head(State(state): State<AppState>) -> Json<HeadResponse> {
    let chain = state.chain.read();
    Json(HeadResponse {
        next_sequence_id: chain.next_sequence_id(),
        block_height: chain.blocks().len() as u64,
    })
}

/// GET /v1/records/{seq} — the record at a sequence id, 404 past the head.
async fn get_record(
    State(state): State<AppState>,
    Path(seq): Path<u64>,
) -> Result<Json<EvidenceRecord>, AppError> {
    let chain = state.chain.read();
    chain
        .record(SequenceId(seq))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("record {seq}")))
}

/// GET /v1/events — ledger events in emission order.
async fn list_events(State(state): State<AppState>) -> Json<Vec<LedgerEvent>> {
    Json(state.chain.read().events().to_vec())
}
