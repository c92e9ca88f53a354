//! Backend entry-point: loads settings, configures logging, recreates the
//! database and serves the REST endpoints.

mod server;

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::info;

use server::{ServerConfig, create_server};
use users_api::logging::init_logging;
use users_api::outbound::persistence::bootstrap::reset_database;
use users_api::outbound::persistence::{DieselUserStore, SqliteConnector};
use users_api::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = ServiceSettings::load().context("failed to load settings")?;
    let log_file = settings.log_file_location();
    let _logging = init_logging(log_file.as_deref()).context("failed to initialise logging")?;

    let database_path = settings.database_path();
    let connector =
        SqliteConnector::for_path(database_path).with_busy_timeout(settings.busy_timeout());
    reset_database(&connector, database_path)
        .await
        .with_context(|| format!("failed to prepare database {}", database_path.display()))?;
    info!(path = %database_path.display(), "database schema created");

    let store = DieselUserStore::new(Arc::new(connector));
    let config = ServerConfig::new(settings.bind_addr(), Arc::new(store))
        .with_max_body_bytes(settings.max_body_bytes());
    create_server(config)
        .context("failed to start HTTP server")?
        .await
        .context("HTTP server terminated abnormally")?;
    Ok(())
}
