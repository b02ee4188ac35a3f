use anyhow::Result;
use tracing::{info, instrument, trace};

use crate::config::connect_and_migrate;

#[instrument]
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    connect_and_migrate(database_url).await?;

    info!("Database initialization completed successfully!");
    Ok(())
}
