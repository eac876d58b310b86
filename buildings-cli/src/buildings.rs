//! `buildings buildings` and `buildings show` - paginated listing and detail.

use buildings_registry::{BuildingId, BuildingRow, PageRequest, RegistryContext};

use crate::error::Result;
use crate::table::{cell_text, listing_table, NAME_WIDTH};

/// Run the buildings listing command.
pub async fn run_buildings(
    ctx: &RegistryContext,
    page: Option<i64>,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let listing = ctx.list_buildings(PageRequest { page, limit }).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let meta = listing.meta;
    if listing.buildings.is_empty() {
        println!(
            "No buildings on page {} ({} total).",
            meta.page, meta.total_count
        );
        return Ok(());
    }

    let mut table = listing_table(vec![
        "ID",
        "Client",
        "Name",
        "Address",
        "City",
        "State",
        "Postal code",
        "Built",
        "Floors",
        "Custom fields",
    ]);
    for row in &listing.buildings {
        table.add_row(vec![
            row.id.clone(),
            cell_text(&row.client_name, NAME_WIDTH),
            cell_text(&row.name, NAME_WIDTH),
            row.address.clone(),
            row.city.clone(),
            row.state.clone(),
            row.postal_code.clone(),
            row.year_built.to_string(),
            row.floors.to_string(),
            describe_custom(row),
        ]);
    }

    println!("{table}");
    println!(
        "\nPage {} of {} ({} building(s), {} per page).",
        meta.page, meta.total_pages, meta.total_count, meta.limit
    );
    Ok(())
}

/// Run the show command: stored values, unprojected, as JSON.
pub async fn run_show(ctx: &RegistryContext, id: u64) -> Result<()> {
    let detail = ctx.get_building(BuildingId(id)).await?;
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

/// One `key: value` line per projected field; unsupplied values show as `-`
fn describe_custom(row: &BuildingRow) -> String {
    row.custom_fields
        .iter()
        .map(|(key, value)| format!("{key}: {}", cell_text(value, NAME_WIDTH)))
        .collect::<Vec<_>>()
        .join("\n")
}
