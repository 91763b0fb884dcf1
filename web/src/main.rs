use anyhow::{Context, Result, anyhow};
use axum::Router;
use clap::Parser;
use state::{AppState, SharedState};
use std::{collections::HashMap, net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod config;
mod error;
mod state;

use config::EnvConfig;

const API_PREFIX: &str = "/api";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the environment configuration file
    #[arg(short, long, default_value = "orgmap.yaml")]
    pub config: PathBuf,
    /// Name of the environment section of the configuration file to use
    #[arg(short, long, default_value = "dev")]
    pub env: String,
}

fn app(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, api::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("ORGMAPWEB_LOG"))
        .init();
    let args = Cli::parse();
    debug!("loading configuration from '{}'", args.config.display());
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Unable to read config file '{}'", args.config.display()))?;
    let mut configs: HashMap<String, EnvConfig> =
        serde_yaml::from_str(&contents).with_context(|| "Failed to parse config file")?;
    let env = configs.remove(&args.env).ok_or_else(|| {
        anyhow!(
            "No environment '{}' in config file '{}'",
            args.env,
            args.config.display()
        )
    })?;
    debug!("using database '{}'", env.database);

    let shared_state = Arc::new(SharedState::new(env).await?);
    let listen = &shared_state.config.listen;
    let addr: SocketAddr = format!("{}:{}", listen.host, listen.port).parse()?;

    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(shared_state)).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_app(pool: sqlx::Pool<sqlx::Sqlite>) -> Router {
    app(Arc::new(SharedState::test(pool)))
}
