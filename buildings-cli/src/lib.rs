//! Library half of the `buildings` command-line tool.
//!
//! Each command lives in its own module and returns [`error::Result`]; the
//! binary maps errors to `Error: <message>` and exit code 1.

pub mod buildings;
pub mod cli;
pub mod clients;
pub mod error;
pub mod load;
pub mod table;
pub mod values;

pub use cli::{Cli, Commands};
pub use error::{CliError, Result};
