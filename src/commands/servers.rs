//! `gluasteal servers` - list servers with stored scripts.

use std::path::Path;

use anyhow::{Context, Result};
use gluasteal::store::ScriptStore;

pub fn execute(config: Option<&Path>) -> Result<()> {
    let locations = super::locations()?;
    let config = super::load_config(config, Some(&locations))?;
    let store = ScriptStore::at(&locations, config.sanitizer());

    let servers = store
        .servers()
        .with_context(|| format!("Failed to list {}", store.root().display()))?;

    if servers.is_empty() {
        println!("No stored scripts in {}", store.root().display());
    }
    for server in servers {
        println!("{server}");
    }
    Ok(())
}
