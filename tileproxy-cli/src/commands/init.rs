//! Init command - write a default configuration file.

use std::path::{Path, PathBuf};
use tileproxy::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn run(config_path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = config_path.unwrap_or_else(config_file_path);
    write_default_config(&path, force)?;

    println!("Wrote default configuration to {}", path.display());
    println!();
    println!("Edit the [upstream] section to point at your WMS endpoint.");
    Ok(())
}

/// Saves [`ConfigFile::default`] to `path`.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }
    ConfigFile::default().save_to(path)?;
    Ok(())
}
