//! Backend entry-point: loads settings, prepares storage, and serves the
//! REST API with its health probes and OpenAPI docs.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_api::inbound::http::health::HealthState;
use recipe_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Connect to PostgreSQL when a URL is configured, applying migrations first
/// unless disabled.
async fn connect_storage(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url() else {
        return Ok(None);
    };

    if settings.run_migrations() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;
        info!(applied, "database schema is up to date");
    }

    let pool_config =
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool failed: {err}")))?;
    Ok(Some(pool))
}

/// Parse settings from `args` layered over environment and config files.
fn load_settings<I>(args: I) -> std::io::Result<AppSettings>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    AppSettings::load_from_iter(args)
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;

    let mut config =
        ServerConfig::new(settings.bind_addr()).with_bcrypt_cost(settings.bcrypt_cost());
    if let Some(pool) = connect_storage(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(bind_addr = %settings.bind_addr(), "recipe API listening");

    let result = server.await;
    health_state.mark_unhealthy();
    info!("recipe API stopped");
    result
}
