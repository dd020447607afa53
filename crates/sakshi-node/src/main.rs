//! Node entry point: resolve config, spawn the block producer, serve HTTP.

use sakshi_node::config::NodeConfig;
use sakshi_node::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = NodeConfig::from_env()?;
    let bind_addr = config.bind_addr;
    let block_interval = config.block_interval;
    tracing::info!(
        %bind_addr,
        ?block_interval,
        submission_fee = config.submission_fee,
        faucet = config.faucet_enabled,
        "starting sakshi-node"
    );

    let state = AppState::new(config);
    tokio::spawn(sakshi_node::producer::run(state.clone(), block_interval));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, sakshi_node::app(state).into_make_service()).await?;
    Ok(())
}
