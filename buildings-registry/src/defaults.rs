//! Built-in sample data: five clients with two buildings each.

use buildings_fields::{FieldKind, FieldSpec, FieldValue, ValueMap};

use crate::building::BuildingAttributes;
use crate::seed::{SeedBuilding, SeedClient, SeedData};

const STREETS: [&str; 3] = ["Main St", "Broadway", "Market"];

const BUILDINGS_PER_CLIENT: usize = 2;

fn sample_clients() -> Vec<(&'static str, Vec<FieldSpec>)> {
    vec![
        (
            "Alpha Properties",
            vec![
                FieldSpec::number("num_bathrooms").with_label("Number of bathrooms"),
                FieldSpec::freeform("primary_color").with_label("Primary color"),
                FieldSpec::enumeration("walkway", ["Brick", "Concrete", "None"])
                    .with_label("Walkway type"),
            ],
        ),
        (
            "Brick & Beam",
            vec![
                FieldSpec::number("floor_area").with_label("Floor area (sqft)"),
                FieldSpec::enumeration("has_rooftop", ["None", "Partial", "Full"])
                    .with_label("Rooftop"),
            ],
        ),
        (
            "Concrete Co",
            vec![
                FieldSpec::number("purchase_price").with_label("Purchase price"),
                FieldSpec::freeform("architect_notes").with_label("Architect notes"),
            ],
        ),
        (
            "Downtown LLC",
            vec![
                FieldSpec::enumeration("has_parking", ["Street", "Lot", "Garage", "None"])
                    .with_label("Parking"),
                FieldSpec::number("units").with_label("Units"),
            ],
        ),
        (
            "Eco Habitats",
            vec![
                FieldSpec::enumeration("green_rating", ["A", "B", "C", "None"])
                    .with_label("Green rating"),
                FieldSpec::freeform("notes").with_label("Notes"),
            ],
        ),
    ]
}

/// Plausible value for one field of the `j`th building of the `i`th client
fn sample_value(spec: &FieldSpec, i: usize, j: usize) -> FieldValue {
    match &spec.type_ {
        FieldKind::Number => FieldValue::from(((1 + j) * (i + 1)) as f64 * 1.5),
        FieldKind::Freeform => FieldValue::from(format!("Sample text {} for {}", j + 1, spec.key)),
        FieldKind::Enum => spec
            .options
            .as_deref()
            .filter(|options| !options.is_empty())
            .map(|options| FieldValue::from(options[j % options.len()].as_str()))
            .unwrap_or_default(),
        FieldKind::Unsupported(_) => FieldValue::Null,
    }
}

fn sample_building(name: &str, specs: &[FieldSpec], i: usize, j: usize) -> SeedBuilding {
    let custom_field_values: ValueMap = specs
        .iter()
        .map(|spec| (spec.key.clone(), sample_value(spec, i, j)))
        .collect();

    SeedBuilding {
        attributes: BuildingAttributes::default()
            .with_name(format!("{name} Building {}", j + 1))
            .with_address(format!("{} {}", 100 + j, STREETS[(i + j) % STREETS.len()]))
            .with_city("Metropolis")
            .with_state("NY")
            .with_postal_code(format!("{:05}", 10000 + i * 10 + j))
            .with_year_built(1980 + j as i32)
            .with_floors(1 + j as i32),
        custom_field_values,
    }
}

/// The built-in sample registry contents
pub fn sample_seed() -> SeedData {
    let clients = sample_clients()
        .into_iter()
        .enumerate()
        .map(|(i, (name, custom_fields))| {
            let buildings = (0..BUILDINGS_PER_CLIENT)
                .map(|j| sample_building(name, &custom_fields, i, j))
                .collect();
            SeedClient {
                name: name.to_string(),
                custom_fields,
                buildings,
            }
        })
        .collect();
    SeedData { clients }
}
