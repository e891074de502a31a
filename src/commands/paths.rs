//! `gluasteal paths` - print the storage locations.

use std::path::Path;

use anyhow::Result;

pub fn execute(config: Option<&Path>) -> Result<()> {
    let locations = super::locations()?;
    let config_path = super::config_path(config, Some(&locations))
        .unwrap_or_else(|| locations.config_file());

    println!("work dir:     {}", locations.work_dir().display());
    println!("log file:     {}", locations.log_file().display());
    println!("server store: {}", locations.server_store().display());
    println!("config:       {}", config_path.display());
    Ok(())
}
