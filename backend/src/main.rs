//! Backend entry-point: loads settings, prepares storage and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::inbound::http::health::HealthState;
use blog_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use blog_backend::settings::ServerSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| eyre!("load server settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr);

    match settings.database_url() {
        Some(database_url) => {
            if settings.run_migrations() {
                run_pending_migrations(database_url)
                    .await
                    .wrap_err("apply database migrations")?;
            }
            let pool_config =
                PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
            info!(config = ?pool_config, "connecting to PostgreSQL");
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("BLOG_DATABASE_URL not set; data is kept in memory and lost on exit");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
