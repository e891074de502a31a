//! `gluasteal save` - store a script in the server store.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use gluasteal::store::ScriptStore;
use tracing::debug;

/// Read the script from `file` (or stdin) and save it for `server`.
///
/// Logging goes to the work directory's log file as well as stderr.
pub fn execute(
    config: Option<&Path>,
    server: &str,
    file: Option<&Path>,
    name: &str,
) -> Result<()> {
    let locations = super::locations()?;
    super::init_logging(Some(&locations.log_file()));

    let config = super::load_config(config, Some(&locations))?;
    let store = ScriptStore::at(&locations, config.sanitizer());

    let contents = match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        },
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        },
    };
    debug!(bytes = contents.len(), "Read script contents");

    let path = store
        .save(server, name, &contents)
        .with_context(|| format!("Failed to save script '{name}' for server '{server}'"))?;

    println!("{}", path.display());
    Ok(())
}
