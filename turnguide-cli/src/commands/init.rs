//! Init command - create the configuration file with defaults.

use turnguide::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path()?;
    if path.exists() {
        println!("Configuration file already exists: {}", path.display());
        return Ok(());
    }

    ConfigFile::default().save()?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize guidance settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
