//! mailwise server entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use mailwise_core::init_tracing;
use mailwise_providers::GmailProvider;
use mailwise_server::cli::Cli;
use mailwise_server::{
    HttpServer, ServerConfig, ServerResult, create_router, new_shared_state, shutdown_signal,
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let tracing_config = match cli.tracing_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServerResult<()> {
    let config = ServerConfig::from_cli(&cli)?;

    let provider = GmailProvider::new(config.google.clone())?;
    let state = new_shared_state(Arc::new(provider));

    let server = HttpServer::bind(&config).await?;
    info!("🚀 Server running at http://localhost:{}", server.local_addr().port());

    server
        .run_until_shutdown(create_router(state), shutdown_signal())
        .await
}
