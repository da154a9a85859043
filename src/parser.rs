//! CSV deserialization for AFDC charging-unit rows.

use anyhow::Result;
use serde::Deserialize;
use std::io::Read;
use tracing::warn;

/// A single charging unit as it appears in the AFDC CSV export.
///
/// Field names mirror the dataset's column headers; columns we do not
/// consume are ignored. Connector counts and power outputs arrive as
/// floats with blanks for absent hardware.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUnit {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Street Address", default)]
    pub street_address: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "ZIP", default)]
    pub zip: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Station Phone", default)]
    pub station_phone: String,
    #[serde(rename = "Access Days Time", default)]
    pub access_days_time: String,
    #[serde(rename = "EV Network", default)]
    pub ev_network: String,
    #[serde(rename = "EV Network Web", default)]
    pub ev_network_web: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Open Date", default)]
    pub open_date: String,
    #[serde(rename = "Date Last Confirmed", default)]
    pub date_last_confirmed: String,

    #[serde(rename = "EV J1772 Connector Count")]
    pub j1772_count: Option<f64>,
    #[serde(rename = "EV J1772 Power Output (kW)")]
    pub j1772_power_kw: Option<f64>,
    #[serde(rename = "EV CCS Connector Count")]
    pub ccs_count: Option<f64>,
    #[serde(rename = "EV CCS Power Output (kW)")]
    pub ccs_power_kw: Option<f64>,
    #[serde(rename = "EV CHAdeMO Connector Count")]
    pub chademo_count: Option<f64>,
    #[serde(rename = "EV CHAdeMO Power Output (kW)")]
    pub chademo_power_kw: Option<f64>,
    #[serde(rename = "EV J3400 Connector Count")]
    pub j3400_count: Option<f64>,
    #[serde(rename = "EV J3400 Power Output (kW)")]
    pub j3400_power_kw: Option<f64>,
}

/// Reads charging units from CSV. Rows that fail to deserialize are
/// logged and skipped so one malformed row cannot sink a whole run.
pub fn parse_units<R: Read>(reader: R) -> Result<Vec<RawUnit>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut units = Vec::new();

    for result in rdr.deserialize() {
        match result {
            Ok(unit) => units.push(unit),
            Err(e) => warn!(error = %e, "Skipping unparseable CSV row"),
        }
    }

    Ok(units)
}
