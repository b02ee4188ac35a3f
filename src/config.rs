use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///tmp/test.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_USER_ID: i32 = 1;

/// Runtime configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// User that favorites are attributed to when a request names none
    pub default_user_id: i32,
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Make a database URL usable by the driver.
///
/// Heroku-style `postgres://` URLs are rewritten to `postgresql://`, and SQLite
/// URLs without an explicit `mode` are opened read-write-create so a fresh file
/// is created on first start.
pub fn normalize_database_url(database_url: &str) -> String {
    let url = match database_url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => database_url.to_string(),
    };

    let is_file_sqlite = url.starts_with("sqlite:") && !url.contains(":memory:");
    if is_file_sqlite && !url.contains("mode=") {
        let separator = if url.contains('?') { '&' } else { '?' };
        return format!("{}{}mode=rwc", url, separator);
    }
    url
}

/// Connect to the database and apply pending migrations.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection> {
    let url = normalize_database_url(database_url);
    info!("Connecting to database: {}", url);
    let db = Database::connect(&url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", url))?;

    debug!("Applying pending migrations");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    info!("Database schema is up to date");

    Ok(db)
}

/// Initialize application state from configuration
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let db = connect_and_migrate(&config.database_url).await?;
    Ok(AppState {
        db,
        default_user_id: config.default_user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_scheme_is_rewritten() {
        assert_eq!(
            normalize_database_url("postgres://u:p@db:5432/catalog"),
            "postgresql://u:p@db:5432/catalog"
        );
        assert_eq!(
            normalize_database_url("postgresql://u:p@db/catalog"),
            "postgresql://u:p@db/catalog"
        );
    }

    #[test]
    fn test_sqlite_file_gets_create_mode() {
        assert_eq!(
            normalize_database_url(DEFAULT_DATABASE_URL),
            "sqlite:///tmp/test.db?mode=rwc"
        );
        assert_eq!(
            normalize_database_url("sqlite://catalog.db?cache=shared"),
            "sqlite://catalog.db?cache=shared&mode=rwc"
        );
        assert_eq!(
            normalize_database_url("sqlite://catalog.db?mode=ro"),
            "sqlite://catalog.db?mode=ro"
        );
    }

    #[test]
    fn test_sqlite_memory_is_untouched() {
        assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: 8080,
            default_user_id: DEFAULT_USER_ID,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
