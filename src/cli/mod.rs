//! CLI module - Command-line interface for Beehive
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

pub use commands::{cmd_create_user, cmd_init, cmd_list_users, cmd_migrate, cmd_rotate_key};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Role;

/// Beehive - anime and manga catalog API
#[derive(Parser)]
#[command(name = "beehive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file, overriding the default search locations
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default when no command is given)
    #[command(alias = "daemon")]
    Serve,

    /// Create a default config file
    Init,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create an API user and print its key
    CreateUser {
        username: String,

        /// member, contributor or staff
        #[arg(long, default_value = "member", value_parser = parse_role)]
        role: Role,
    },

    /// Generate a new API key for an existing user
    RotateKey { username: String },

    /// List API users
    #[command(alias = "ls")]
    Users,
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_user_with_role() {
        let cli =
            Cli::try_parse_from(["beehive", "create-user", "mika", "--role", "staff"]).unwrap();
        match cli.command {
            Some(Commands::CreateUser { username, role }) => {
                assert_eq!(username, "mika");
                assert_eq!(role, Role::Staff);
            }
            _ => panic!("expected create-user"),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(
            Cli::try_parse_from(["beehive", "create-user", "mika", "--role", "admin"]).is_err()
        );
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["beehive", "migrate", "--config", "/tmp/b.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/b.toml")));
        assert!(matches!(cli.command, Some(Commands::Migrate)));
    }

    #[test]
    fn no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["beehive"]).unwrap();
        assert!(cli.command.is_none());
    }
}
