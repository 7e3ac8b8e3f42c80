//! Backend entry-point: loads settings, prepares persistence, and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use todo_backend::inbound::http::health::HealthState;
use todo_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use todo_backend::settings::AppSettings;

async fn apply_migrations(database_url: &str) -> color_eyre::Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database schema is up to date");
    Ok(())
}

async fn server_config(settings: &AppSettings) -> color_eyre::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr());

    let config = match settings.database_url() {
        Some(url) => {
            if settings.run_migrations {
                apply_migrations(url).await?;
            }
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()),
            )
            .await?;
            config.with_db_pool(pool)
        }
        None => config,
    };

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await?;
    Ok(())
}
