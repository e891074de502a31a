//! `gluasteal sanitize` - print the sanitized path for each input.

use std::path::Path;

use anyhow::Result;
use gluasteal::security::ReservedTable;

/// Sanitize each input and print one path per line.
///
/// The config file is honored when the work directory can be found; a
/// missing home directory only costs the config, not the command.
pub fn execute(
    config: Option<&Path>,
    reserved: Option<ReservedTable>,
    inputs: &[String],
) -> Result<()> {
    let locations = super::locations().ok();
    let mut config = super::load_config(config, locations.as_ref())?;

    if let Some(reserved) = reserved {
        config.sanitize.reserved = reserved;
        config.validate()?;
    }

    let sanitizer = config.sanitizer();
    for input in inputs {
        println!("{}", sanitizer.sanitize(input).display());
    }
    Ok(())
}
