use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_router::network::Network;
use metro_router::planner::{Engine, RouterConfig};
use metro_router::web::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let network = match &config.network_path {
        Some(path) => {
            info!(path = %path.display(), "loading network");
            Network::load(path)?
        }
        None => Network::medellin()?,
    };
    info!(
        stations = network.len(),
        connections = network.connections().len(),
        "network ready"
    );

    let state = AppState::new(Engine::new(network, RouterConfig::default()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "metro router listening");
    info!("endpoints: GET /stations, POST /route, POST /route/alternatives, GET /disruptions, POST /resilience");

    axum::serve(listener, app).await?;
    Ok(())
}
