//! The normalized station record produced by the normalization pass.

use chrono::{NaiveDate, NaiveDateTime};

use crate::normalize::address::{expand_address, title_street};
use crate::normalize::connector::SocketSet;
use crate::normalize::hours::normalize_hours;
use crate::normalize::network::network_name;
use crate::normalize::phone::format_phone;
use crate::normalize::postcode;
use crate::parser::RawUnit;

/// One charging unit with every field normalized into tag values.
///
/// String fields are empty when the source value was absent or could not
/// be normalized; serializers drop empty tags.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub housenumber: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub phone: String,
    pub opening_hours: String,
    pub network: String,
    pub website: String,
    pub latitude: f64,
    pub longitude: f64,
    /// AFDC station ID, kept as text for `ref:afdc`.
    pub ref_afdc: String,
    /// `Open Date` as given by the dataset.
    pub start_date: String,
    /// `Date Last Confirmed`, reduced to a plain date.
    pub check_date: String,
    pub sockets: SocketSet,
}

impl StationRecord {
    pub fn from_raw(raw: &RawUnit) -> Self {
        let (housenumber, street) = expand_address(&raw.street_address);

        Self {
            housenumber,
            street: title_street(&street),
            city: raw.city.trim().to_string(),
            state: raw.state.trim().to_string(),
            postcode: postcode(&raw.zip),
            country: raw.country.trim().to_string(),
            phone: format_phone(&raw.station_phone),
            opening_hours: normalize_hours(&raw.access_days_time),
            network: network_name(&raw.ev_network),
            website: raw.ev_network_web.trim().to_string(),
            latitude: round6(raw.latitude),
            longitude: round6(raw.longitude),
            ref_afdc: raw.id.to_string(),
            start_date: raw.open_date.trim().to_string(),
            check_date: confirm_date(&raw.date_last_confirmed),
            sockets: SocketSet::from_columns(
                (raw.j1772_count, raw.j1772_power_kw),
                (raw.ccs_count, raw.ccs_power_kw),
                (raw.chademo_count, raw.chademo_power_kw),
                (raw.j3400_count, raw.j3400_power_kw),
            ),
        }
    }

    /// `Open Date` parsed for the weekly window filter.
    pub fn open_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d").ok()
    }
}

/// The `frequency` tag derived from the socket mix: 60 Hz AC for J1772,
/// 0 (DC) for fast sockets, both when the station mixes them.
pub fn frequency(sockets: &SocketSet) -> &'static str {
    match (sockets.has_ac(), sockets.has_dc()) {
        (true, true) => "0;60",
        (true, false) => "60",
        (false, true) => "0",
        (false, false) => "",
    }
}

/// Rounds a coordinate to six decimal places.
pub fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Reduces `Date Last Confirmed` to `YYYY-MM-DD`, tolerating the date and
/// datetime shapes seen in AFDC exports. Unparseable input becomes empty.
fn confirm_date(raw: &str) -> String {
    let t = raw.trim();
    if t.is_empty() {
        return String::new();
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return d.to_string();
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") {
        return dt.date().to_string();
    }
    String::new()
}
