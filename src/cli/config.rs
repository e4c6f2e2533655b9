//! Configuration CLI command handlers

use clap::ValueEnum;

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Config;
use crate::core::view::SortKey;
use crate::error::{ConciergeError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        ConfigKey::BaseUrl => {
            config.set_base_url(&value)?;
            config.save()?;
            println!("Base URL set to: {}", config.base_url);
        }
        ConfigKey::SortBy => {
            let sort_by = SortKey::from_str(&value, true).map_err(|_| {
                ConciergeError::InvalidInput(format!(
                    "Invalid sort key '{}'. Available keys: price, rating",
                    value
                ))
            })?;

            config.sort_by = sort_by;
            config.save()?;
            println!("Default sort set to: {}", sort_by.display_name());
        }
    }
    Ok(())
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;

    match key {
        ConfigKey::BaseUrl => {
            println!("Base URL: {}", config.base_url);
        }
        ConfigKey::SortBy => {
            println!("Default sort: {}", config.sort_by.display_name());
        }
    }
    Ok(())
}
