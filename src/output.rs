//! Output serializers: the tabular CSV snapshot and the GeoJSON
//! FeatureCollection.

use anyhow::Result;
use serde_json::{Value, json};
use std::fs::File;
use tracing::debug;

use crate::aggregate::OutputRow;

/// Column naming for the two snapshot flavors. The weekly snapshot tags
/// the operator as `network:*`, the one-time import as `brand:*`; the
/// weekly flavor also carries `man_made` for individual charge points
/// while the import carries `motorcar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSchema {
    Weekly,
    Import,
}

const WEEKLY_COLUMNS: &[&str] = &[
    "addr:housenumber",
    "addr:street",
    "addr:city",
    "addr:state",
    "addr:postcode",
    "addr:country",
    "network:phone",
    "opening_hours",
    "network",
    "network:website",
    "Latitude",
    "Longitude",
    "check_date",
    "ref:afdc",
    "start_date",
    "socket:type1",
    "socket:type1:output",
    "socket:type1_combo",
    "socket:type1_combo:output",
    "socket:chademo",
    "socket:chademo:output",
    "socket:nacs",
    "socket:nacs:output",
    "man_made",
    "frequency",
    "access",
    "amenity",
];

const IMPORT_COLUMNS: &[&str] = &[
    "addr:housenumber",
    "addr:street",
    "addr:city",
    "addr:state",
    "addr:postcode",
    "addr:country",
    "brand",
    "brand:website",
    "brand:phone",
    "opening_hours",
    "motorcar",
    "access",
    "frequency",
    "Latitude",
    "Longitude",
    "ref:afdc",
    "start_date",
    "check_date",
    "socket:type1",
    "socket:type1:output",
    "socket:type1_combo",
    "socket:type1_combo:output",
    "socket:chademo",
    "socket:chademo:output",
    "socket:nacs",
    "socket:nacs:output",
    "amenity",
];

impl TagSchema {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TagSchema::Weekly => WEEKLY_COLUMNS,
            TagSchema::Import => IMPORT_COLUMNS,
        }
    }
}

fn value_for(row: &OutputRow, key: &str) -> String {
    match key {
        "addr:housenumber" => row.housenumber.clone(),
        "addr:street" => row.street.clone(),
        "addr:city" => row.city.clone(),
        "addr:state" => row.state.clone(),
        "addr:postcode" => row.postcode.clone(),
        "addr:country" => row.country.clone(),
        "network:phone" | "brand:phone" => row.phone.clone(),
        "opening_hours" => row.opening_hours.clone(),
        "network" | "brand" => row.network.clone(),
        "network:website" | "brand:website" => row.website.clone(),
        "Latitude" => row.latitude.to_string(),
        "Longitude" => row.longitude.to_string(),
        "check_date" => row.check_date.clone(),
        "ref:afdc" => row.ref_afdc.clone(),
        "start_date" => row.start_date.clone(),
        "socket:type1" => row.sockets[0].count.clone(),
        "socket:type1:output" => row.sockets[0].output.clone(),
        "socket:type1_combo" => row.sockets[1].count.clone(),
        "socket:type1_combo:output" => row.sockets[1].output.clone(),
        "socket:chademo" => row.sockets[2].count.clone(),
        "socket:chademo:output" => row.sockets[2].output.clone(),
        "socket:nacs" => row.sockets[3].count.clone(),
        "socket:nacs:output" => row.sockets[3].output.clone(),
        "man_made" => row.man_made.clone(),
        "frequency" => row.frequency.clone(),
        "access" => row.access.clone(),
        "motorcar" => row.motorcar.clone(),
        "amenity" => row.amenity.clone(),
        _ => String::new(),
    }
}

/// Writes the tabular snapshot with the schema's fixed column set. Absent
/// tags serialize as empty cells.
pub fn write_snapshot(path: &str, rows: &[OutputRow], schema: TagSchema) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV snapshot");

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(schema.columns())?;

    for row in rows {
        writer.write_record(schema.columns().iter().map(|col| value_for(row, col)))?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a GeoJSON FeatureCollection of Point features. Properties carry
/// every non-empty tag; the coordinate columns live in the geometry only.
pub fn write_geojson(path: &str, rows: &[OutputRow], schema: TagSchema) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing GeoJSON");

    let features: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut props = serde_json::Map::new();
            for col in schema.columns() {
                if *col == "Latitude" || *col == "Longitude" {
                    continue;
                }
                let value = value_for(row, col);
                if !value.is_empty() {
                    props.insert(col.to_string(), Value::String(value));
                }
            }
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [row.longitude, row.latitude],
                },
                "properties": props,
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_writer(File::create(path)?, &collection)?;
    Ok(())
}
