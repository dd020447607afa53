//! Shared application state.

use std::sync::Arc;

use parking_lot::RwLock;

use sakshi_ledger::{Chain, ChainConfig};

use crate::config::NodeConfig;

/// State shared across all request handlers and the block producer.
///
/// The chain lock is the serialization point for all submissions — the
/// single-node equivalent of the consensus ordering guarantee.
#[derive(Clone)]
pub struct AppState {
    /// The chain, behind a write lock taken by broadcast and block
    /// production; reads take the shared side.
    pub chain: Arc<RwLock<Chain>>,
    /// Node configuration resolved at startup.
    pub config: Arc<NodeConfig>,
}

impl AppState {
    /// Build state from a resolved configuration.
    pub fn new(config: NodeConfig) -> Self {
        let chain = Chain::new(ChainConfig {
            submission_fee: config.submission_fee,
        });
        Self {
            chain: Arc::new(RwLock::new(chain)),
            config: Arc::new(config),
        }
    }
}
