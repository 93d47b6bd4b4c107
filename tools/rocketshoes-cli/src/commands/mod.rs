//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// List the cart contents.
    Show,

    /// Add one unit of a product, checking stock first.
    Add {
        /// Product ID.
        id: u64,
    },

    /// Remove a product entirely.
    Remove {
        /// Product ID.
        id: u64,
    },

    /// Set a product's amount, checking stock first.
    Update {
        /// Product ID.
        id: u64,

        /// Desired amount. Zero or less is ignored.
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Write a default configuration file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
