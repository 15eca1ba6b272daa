use anyhow::Context;
use sellah_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    print_banner();
    tracing::info!(environment = %config.environment, "Sellah server starting");

    // 2. Shared state (opens the document store)
    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    // 3. HTTP server (runs until shutdown signal)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
