//! Background block producer.
//!
//! Ticks at the configured interval and drains the pending pool into a
//! block. A submission's confirmation latency is therefore bounded below by
//! the interval — the property timeout tests rely on.

use std::time::Duration;

use sakshi_core::Timestamp;

use crate::state::AppState;

/// Run the block production loop until the task is aborted.
///
/// Holding the write lock only for the duration of one `produce_block` call
/// keeps broadcast latency flat while a block is cut.
pub async fn run(state: AppState, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // Skip ticks we fall behind on rather than bursting to catch up.
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        let produced = state.chain.write().produce_block(Timestamp::now());
        match produced {
            Ok(Some(block_ref)) => {
                tracing::debug!(height = block_ref.height, "block producer tick");
            }
            Ok(None) => {}
            // Pooled transactions survive; the next tick retries them.
            Err(e) => tracing::error!(error = %e, "block production failed"),
        }
    }
}
