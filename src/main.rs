//! HTTP server for the Meal Allowance Engine.
//!
//! Environment:
//! - `ALLOWANCE_CONFIG_DIR`: configuration directory (default `./config/magni`)
//! - `ALLOWANCE_BIND`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: tracing filter (default `info`)

use std::env;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use allowance_engine::api::{AppState, create_router};
use allowance_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/magni";
const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        env::var("ALLOWANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("ALLOWANCE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        organization = %config.metadata().organization,
        rules = config.rate_table().rules.len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", bind);
    axum::serve(listener, app).await?;

    Ok(())
}
