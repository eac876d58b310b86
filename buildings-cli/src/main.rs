//! Buildings CLI - inspect clients, custom field schemas and buildings.
//!
//! Commands:
//! - `buildings clients`: List clients and their custom field keys
//! - `buildings buildings [--page N] [--limit N]`: Paginated, projected listing
//! - `buildings show <id>`: One building with its stored values
//! - `buildings validate --client <id> <json>`: Check values against a schema
//! - `buildings project --client <id> <json>`: Render values through a schema
//! - `buildings check-schema <file>`: Check a list of field specs
//!
//! Environment variables:
//! - BUILDINGS_LISTING__DEFAULT_LIMIT: Default page size
//! - BUILDINGS_LISTING__MAX_LIMIT: Largest accepted page size
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error, or values rejected by `validate`

use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildings_cli::load::load_registry;
use buildings_cli::{buildings, clients, values};
use buildings_cli::{Cli, CliError, Commands};

/// Map a command result to an exit code, reporting errors on stderr.
fn handle_result(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let seed = cli.seed.as_deref();
    let config = cli.config.as_deref();
    // check-schema works on a file alone; everything else needs the registry
    let registry = move || load_registry(seed, config);

    match cli.command {
        Commands::CheckSchema { file } => values::run_check_schema(&file),
        Commands::Clients { json } => clients::run_clients(&registry().await?, json).await,
        Commands::Buildings { page, limit, json } => {
            buildings::run_buildings(&registry().await?, page, limit, json).await
        }
        Commands::Show { id } => buildings::run_show(&registry().await?, id).await,
        Commands::Validate {
            client,
            values: json,
        } => values::run_validate(&registry().await?, client, &json).await,
        Commands::Project {
            client,
            values: json,
        } => values::run_project(&registry().await?, client, &json).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("buildings=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = handle_result(run(cli).await);
    std::process::exit(exit_code);
}
