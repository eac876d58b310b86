//! `buildings validate`, `buildings project` and `buildings check-schema`.

use std::path::Path;

use buildings_fields::{FieldSpec, Schema, ValidationResult, ValueMap};
use buildings_registry::{ClientId, RegistryContext};

use crate::error::{CliError, Result};

/// Parse a JSON object of scalar values
pub fn parse_values(json: &str) -> Result<ValueMap> {
    serde_json::from_str(json).map_err(|e| CliError::Input(format!("values: {e}")))
}

/// Run the validate command. Prints `valid`, or each violation on its own
/// line followed by a [`CliError::Rejected`].
pub async fn run_validate(ctx: &RegistryContext, client: u64, values: &str) -> Result<()> {
    let values = parse_values(values)?;
    match ctx.validate_values(ClientId(client), &values).await? {
        ValidationResult::Valid => {
            println!("valid");
            Ok(())
        }
        ValidationResult::Invalid(violations) => {
            for violation in &violations {
                println!("{violation}");
            }
            Err(CliError::Rejected {
                count: violations.len(),
            })
        }
    }
}

/// Run the project command: the projection as a JSON object.
pub async fn run_project(ctx: &RegistryContext, client: u64, values: &str) -> Result<()> {
    let values = parse_values(values)?;
    let projection = ctx.project_values(ClientId(client), &values).await?;
    println!("{}", serde_json::to_string_pretty(&projection)?);
    Ok(())
}

/// Read a list of field specs from YAML or JSON and build a schema from it.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let specs: Vec<FieldSpec> = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(Schema::build(specs)?)
}

/// Run the check-schema command: one declared key per line.
pub fn run_check_schema(path: &Path) -> Result<()> {
    let schema = load_schema(path)?;
    for field in schema.fields() {
        println!("{}", field.key());
    }
    Ok(())
}
