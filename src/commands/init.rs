//! Init command implementation

use crate::config::Config;
use crate::db::Database;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

/// Write the configuration file and create the database
pub async fn cmd_init(config_path: &Path, force: bool) -> Result<Config> {
    let config = Config::load_or_default(config_path)?;

    if config.paths.config_file.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config.paths.config_file.display().to_string(),
        ));
    }

    config.save()?;
    Database::connect(&config.paths.db_file).await?;

    info!("Initialized sitecheck in {:?}", config.paths.base_dir);
    Ok(config)
}
