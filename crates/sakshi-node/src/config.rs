//! Node configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SAKSHI_BIND_ADDR` | `127.0.0.1:8545` | listen address |
//! | `SAKSHI_BLOCK_INTERVAL_MS` | `500` | block production interval |
//! | `SAKSHI_SUBMISSION_FEE` | `10` | flat fee per submission |
//! | `SAKSHI_FAUCET_ENABLED` | `true` | dev faucet endpoint on/off |
//!
//! Unset variables fall back to defaults; malformed values are errors at
//! startup rather than silent fallbacks.

use std::net::SocketAddr;
use std::time::Duration;

/// Resolved node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Address the HTTP listener binds.
    pub bind_addr: SocketAddr,
    /// Interval between block production ticks.
    pub block_interval: Duration,
    /// Flat fee reserved per submission.
    pub submission_fee: u64,
    /// Whether the dev faucet endpoint accepts requests.
    pub faucet_enabled: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8545)),
            block_interval: Duration::from_millis(500),
            submission_fee: 10,
            faucet_enabled: true,
        }
    }
}

impl NodeConfig {
    /// Resolve configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails on malformed values; a variable that is set must parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("SAKSHI_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|e| anyhow::anyhow!("SAKSHI_BIND_ADDR {addr:?}: {e}"))?;
        }
        if let Ok(ms) = std::env::var("SAKSHI_BLOCK_INTERVAL_MS") {
            let ms: u64 = ms
                .parse()
                .map_err(|e| anyhow::anyhow!("SAKSHI_BLOCK_INTERVAL_MS {ms:?}: {e}"))?;
            config.block_interval = Duration::from_millis(ms);
        }
        if let Ok(fee) = std::env::var("SAKSHI_SUBMISSION_FEE") {
            config.submission_fee = fee
                .parse()
                .map_err(|e| anyhow::anyhow!("SAKSHI_SUBMISSION_FEE {fee:?}: {e}"))?;
        }
        if let Ok(v) = std::env::var("SAKSHI_FAUCET_ENABLED") {
            config.faucet_enabled = v.to_lowercase() != "false";
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let c = NodeConfig::default();
        assert_eq!(c.submission_fee, 10);
        assert!(c.faucet_enabled);
        assert_eq!(c.block_interval, Duration::from_millis(500));
    }
}
