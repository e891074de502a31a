//! gluasteal command-line interface.

#![deny(unsafe_code)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gluasteal::security::ReservedTable;

#[derive(Parser, Debug)]
#[command(name = "gluasteal")]
#[command(about = "Store untrusted Lua scripts under safe paths", version)]
struct Cli {
    /// Config file (default: <work dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sanitized path for each input
    Sanitize {
        /// Reserved-name table, overriding the config file
        #[arg(long, value_enum)]
        reserved: Option<ReservedTable>,

        /// Untrusted script names
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Print the storage locations
    Paths,

    /// Save a script into the server store
    Save {
        /// Server the script came from (hostname or ip:port)
        #[arg(short, long)]
        server: String,

        /// Read contents from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Untrusted script name
        name: String,
    },

    /// List servers with stored scripts
    Servers,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sanitize { reserved, inputs } => {
            commands::init_logging(None);
            commands::sanitize::execute(cli.config.as_deref(), reserved, &inputs)
        },
        Command::Paths => {
            commands::init_logging(None);
            commands::paths::execute(cli.config.as_deref())
        },
        Command::Save { server, file, name } => {
            commands::save::execute(cli.config.as_deref(), &server, file.as_deref(), &name)
        },
        Command::Servers => {
            commands::init_logging(None);
            commands::servers::execute(cli.config.as_deref())
        },
    }
}
