use anyhow::Context;
use fish_parque::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Path to a YAML config file; the environment is used when unset
const CONFIG_FILE_VAR: &str = "FISH_PARQUE_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fish_parque=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var(CONFIG_FILE_VAR) {
        Ok(path) => AppConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        Err(_) => AppConfig::from_env().context("loading configuration from environment")?,
    };

    tracing::info!(
        orders_file = %config.storage.orders_file.display(),
        static_dir = %config.server.static_dir.display(),
        notifications = config.notifications.is_enabled(),
        "Starting Fish Parque"
    );

    ServerBuilder::new().with_config(config).serve().await
}
