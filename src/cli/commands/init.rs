//! Config and database bootstrap commands

use std::path::Path;

use crate::config::Config;
use crate::db::Store;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let default_path = Config::default_config_path();
    let path = path.unwrap_or(&default_path);

    if Config::create_default_if_missing(path)? {
        println!("✓ Config file created at {}", path.display());
        println!("  Edit it and run `beehive serve`.");
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    // Connecting runs every pending migration.
    let store = Store::new(&config.general.database_path).await?;
    store.ping().await?;

    println!("✓ Database is up to date: {}", config.general.database_path);
    Ok(())
}
