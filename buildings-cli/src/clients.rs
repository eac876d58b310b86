//! `buildings clients` - list clients and their declared custom fields.

use buildings_registry::{Client, RegistryContext};

use crate::error::Result;
use crate::table::{cell_text, listing_table, NAME_WIDTH};

/// Run the clients command.
pub async fn run_clients(ctx: &RegistryContext, json: bool) -> Result<()> {
    let clients = ctx.list_clients().await;

    if json {
        let output = serde_json::json!({ "clients": clients });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if clients.is_empty() {
        println!("No clients.");
        return Ok(());
    }

    let mut table = listing_table(vec!["ID", "Name", "Custom fields"]);
    for client in &clients {
        table.add_row(vec![
            client.id.to_string(),
            cell_text(&client.name, NAME_WIDTH),
            describe_fields(client),
        ]);
    }

    println!("{table}");
    println!("\n{} client(s).", clients.len());
    Ok(())
}

/// `key (type)` for each declared field, in declaration order
fn describe_fields(client: &Client) -> String {
    client
        .schema
        .fields()
        .iter()
        .map(|field| format!("{} ({})", field.key(), field.kind()))
        .collect::<Vec<_>>()
        .join(", ")
}
