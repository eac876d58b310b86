//! CLI definition for the buildings command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Buildings - inspect clients, their custom field schemas and buildings.
///
/// Every invocation starts from a fresh in-memory registry loaded from a
/// YAML seed file, or from the built-in sample data when no seed is given.
#[derive(Parser, Debug)]
#[command(name = "buildings")]
#[command(version)]
#[command(about = "Inspect clients, custom field schemas and building listings")]
#[command(
    long_about = "Buildings loads clients and their buildings into an in-memory registry and \
    lets you list them, inspect stored custom field values, and check values or schemas \
    against a client's custom field definitions.\n\n\
    Environment variables:\n  \
    BUILDINGS_LISTING__DEFAULT_LIMIT  Page size when --limit is not given\n  \
    BUILDINGS_LISTING__MAX_LIMIT      Largest accepted page size\n  \
    RUST_LOG                          Log filter (overridden by --debug)"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// YAML seed file (defaults to the built-in sample clients)
    #[arg(long, global = true, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List clients with their declared custom field keys
    Clients {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List buildings with projected custom fields
    Buildings {
        /// Page number, starting at 1
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,
        /// Buildings per page
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one building with its stored custom field values
    Show {
        /// Building id
        id: u64,
    },

    /// Check custom field values against a client's schema
    Validate {
        /// Client whose schema applies
        #[arg(long, value_name = "ID")]
        client: u64,
        /// Values as a JSON object, e.g. '{"units": 12}'
        values: String,
    },

    /// Render custom field values through a client's schema
    Project {
        /// Client whose schema applies
        #[arg(long, value_name = "ID")]
        client: u64,
        /// Values as a JSON object, e.g. '{"units": 12}'
        values: String,
    },

    /// Check a YAML or JSON list of field specs
    CheckSchema {
        /// File containing the field specs
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_buildings_paging() {
        let cli = Cli::parse_from(["buildings", "buildings", "--page", "2", "--limit", "-1"]);
        match cli.command {
            Commands::Buildings { page, limit, json } => {
                assert_eq!(page, Some(2));
                assert_eq!(limit, Some(-1));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "buildings",
            "validate",
            "--client",
            "4",
            r#"{"units": 1}"#,
            "--seed",
            "seed.yaml",
            "--debug",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.seed, Some(PathBuf::from("seed.yaml")));
        assert!(matches!(cli.command, Commands::Validate { client: 4, .. }));
    }
}
