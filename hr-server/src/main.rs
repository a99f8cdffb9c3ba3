use hr_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, working directory, logging) and configuration
    let config = setup_environment()?;

    print_banner();
    tracing::info!(environment = %config.environment, "HR server starting...");

    // 2. Open the database and seed demo data
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(code = %e.code, "Startup failed: {}", e);
            return Err(e.into());
        }
    };

    // 3. Serve HTTP until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
