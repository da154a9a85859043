//! Grouping and merging of co-located charging units into stations.
//!
//! Two strategies are supported, one per CLI subcommand:
//! - weekly: units group on the full identity-tag tuple. A group confined
//!   to one coordinate collapses into a single station; a group spread
//!   over several coordinates also keeps its individual charge points.
//! - import: units group on (brand, rounded latitude, rounded longitude).
//!
//! Merge rules are shared: coordinates average, `ref:afdc` and the date
//! tags become sorted-unique `;`-joined unions, socket counts sum, and
//! socket outputs union.

use std::collections::{BTreeMap, BTreeSet};

use crate::normalize::connector::SocketSet;
use crate::station::{StationRecord, frequency, round6};

/// Count and output tag values for one socket type, already rendered as
/// strings so merged rows can hold `;`-joined unions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocketTags {
    pub count: String,
    pub output: String,
}

/// One row of the final snapshot, either an individual charge point or a
/// merged station. Empty strings mark absent tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRow {
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
    pub check_date: String,
    pub ref_afdc: String,
    pub start_date: String,
    /// In `SocketSet::slots` order: type1, type1_combo, chademo, nacs.
    pub sockets: [SocketTags; 4],
    pub man_made: String,
    pub frequency: String,
    pub access: String,
    pub motorcar: String,
    pub amenity: String,
}

/// The identity-tag tuple used as the weekly group key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct IdentityKey {
    housenumber: String,
    street: String,
    city: String,
    state: String,
    postcode: String,
    country: String,
    phone: String,
    opening_hours: String,
    network: String,
    website: String,
}

fn identity_key(rec: &StationRecord) -> IdentityKey {
    IdentityKey {
        housenumber: rec.housenumber.clone(),
        street: rec.street.clone(),
        city: rec.city.clone(),
        state: rec.state.clone(),
        postcode: rec.postcode.clone(),
        country: rec.country.clone(),
        phone: rec.phone.clone(),
        opening_hours: rec.opening_hours.clone(),
        network: rec.network.clone(),
        website: rec.website.clone(),
    }
}

/// Coordinates compared as their rendered 6-decimal form, sidestepping
/// float equality.
fn coord_key(rec: &StationRecord) -> (String, String) {
    (rec.latitude.to_string(), rec.longitude.to_string())
}

/// Weekly snapshot rows: individual charge points for multi-coordinate
/// groups, then one merged station per group in sorted key order.
pub fn weekly_rows(records: &[StationRecord]) -> Vec<OutputRow> {
    let mut groups: BTreeMap<IdentityKey, Vec<&StationRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(identity_key(rec)).or_default().push(rec);
    }

    let mut rows = Vec::new();

    // Individual points in input order, only where the group spans more
    // than one location.
    for rec in records {
        let members = &groups[&identity_key(rec)];
        let coords: BTreeSet<(String, String)> = members.iter().map(|m| coord_key(m)).collect();
        if coords.len() > 1 {
            rows.push(point_row(rec));
        }
    }

    for (key, members) in &groups {
        rows.push(weekly_station_row(key, members));
    }

    rows
}

/// One-time import rows: a merged station per (brand, lat, lon) group in
/// sorted key order.
pub fn import_rows(records: &[StationRecord]) -> Vec<OutputRow> {
    let mut groups: BTreeMap<(String, String, String), Vec<&StationRecord>> = BTreeMap::new();
    for rec in records {
        let (lat, lon) = coord_key(rec);
        groups
            .entry((rec.network.clone(), lat, lon))
            .or_default()
            .push(rec);
    }

    groups
        .values()
        .map(|members| import_station_row(members))
        .collect()
}

fn point_row(rec: &StationRecord) -> OutputRow {
    OutputRow {
        housenumber: rec.housenumber.clone(),
        street: rec.street.clone(),
        city: rec.city.clone(),
        state: rec.state.clone(),
        postcode: rec.postcode.clone(),
        country: rec.country.clone(),
        phone: rec.phone.clone(),
        opening_hours: rec.opening_hours.clone(),
        network: rec.network.clone(),
        website: rec.website.clone(),
        latitude: rec.latitude,
        longitude: rec.longitude,
        check_date: rec.check_date.clone(),
        ref_afdc: rec.ref_afdc.clone(),
        start_date: rec.start_date.clone(),
        sockets: socket_tags(&rec.sockets),
        man_made: "charge_point".to_string(),
        frequency: frequency(&rec.sockets).to_string(),
        access: "yes".to_string(),
        ..Default::default()
    }
}

fn weekly_station_row(key: &IdentityKey, members: &[&StationRecord]) -> OutputRow {
    OutputRow {
        housenumber: key.housenumber.clone(),
        street: key.street.clone(),
        city: key.city.clone(),
        state: key.state.clone(),
        postcode: key.postcode.clone(),
        country: key.country.clone(),
        phone: key.phone.clone(),
        opening_hours: key.opening_hours.clone(),
        network: key.network.clone(),
        website: key.website.clone(),
        amenity: "charging_station".to_string(),
        ..merged_core(members)
    }
}

fn import_station_row(members: &[&StationRecord]) -> OutputRow {
    let first_nonempty = |get: fn(&StationRecord) -> &str| -> String {
        members
            .iter()
            .map(|m| get(m))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
            .to_string()
    };

    OutputRow {
        housenumber: first_nonempty(|r| r.housenumber.as_str()),
        street: first_nonempty(|r| r.street.as_str()),
        city: first_nonempty(|r| r.city.as_str()),
        state: first_nonempty(|r| r.state.as_str()),
        postcode: first_nonempty(|r| r.postcode.as_str()),
        country: first_nonempty(|r| r.country.as_str()),
        phone: first_nonempty(|r| r.phone.as_str()),
        opening_hours: first_nonempty(|r| r.opening_hours.as_str()),
        network: first_nonempty(|r| r.network.as_str()),
        website: first_nonempty(|r| r.website.as_str()),
        amenity: "charging_station".to_string(),
        motorcar: "designated".to_string(),
        access: "yes".to_string(),
        ..merged_core(members)
    }
}

/// Shared merge of coordinates, reference/date unions, sockets, and the
/// derived frequency.
fn merged_core(members: &[&StationRecord]) -> OutputRow {
    let lat = round6(members.iter().map(|m| m.latitude).sum::<f64>() / members.len() as f64);
    let lon = round6(members.iter().map(|m| m.longitude).sum::<f64>() / members.len() as f64);

    let merged_presence = merged_socket_presence(members);

    OutputRow {
        latitude: lat,
        longitude: lon,
        ref_afdc: join_unique(members.iter().map(|m| m.ref_afdc.as_str())),
        start_date: join_unique(members.iter().map(|m| m.start_date.as_str())),
        check_date: join_unique(members.iter().map(|m| m.check_date.as_str())),
        sockets: merged_socket_tags(members),
        frequency: frequency(&merged_presence).to_string(),
        ..Default::default()
    }
}

fn socket_tags(set: &SocketSet) -> [SocketTags; 4] {
    set.slots().map(|(_, slot)| match slot {
        Some(socket) => SocketTags {
            count: socket.count.to_string(),
            output: socket.output_kw.map(|kw| kw.to_string()).unwrap_or_default(),
        },
        None => SocketTags::default(),
    })
}

fn merged_socket_tags(members: &[&StationRecord]) -> [SocketTags; 4] {
    let mut tags: [SocketTags; 4] = Default::default();

    for (i, tag) in tags.iter_mut().enumerate() {
        let mut count_sum = 0u32;
        let mut outputs = BTreeSet::new();

        for member in members {
            if let (_, Some(socket)) = member.sockets.slots()[i] {
                count_sum += socket.count;
                if let Some(kw) = socket.output_kw {
                    outputs.insert(kw.to_string());
                }
            }
        }

        if count_sum > 0 {
            tag.count = count_sum.to_string();
        }
        tag.output = outputs.into_iter().collect::<Vec<_>>().join(";");
    }

    tags
}

/// A [`SocketSet`] carrying only presence, for the merged frequency rule.
fn merged_socket_presence(members: &[&StationRecord]) -> SocketSet {
    let mut set = SocketSet::default();
    for member in members {
        let s = &member.sockets;
        set.type1 = set.type1.or(s.type1);
        set.type1_combo = set.type1_combo.or(s.type1_combo);
        set.chademo = set.chademo.or(s.chademo);
        set.nacs = set.nacs.or(s.nacs);
    }
    set
}

/// Sorted-unique `;`-join, dropping empty values.
fn join_unique<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let set: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    set.into_iter().collect::<Vec<_>>().join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::connector::Socket;

    fn record(id: &str, street: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord {
            housenumber: "100".to_string(),
            street: street.to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            postcode: "80202".to_string(),
            country: "US".to_string(),
            phone: "+1 303-555-0100".to_string(),
            opening_hours: "24/7".to_string(),
            network: "EVgo".to_string(),
            website: "https://www.evgo.com/".to_string(),
            latitude: lat,
            longitude: lon,
            ref_afdc: id.to_string(),
            start_date: "2024-11-05".to_string(),
            check_date: "2024-11-20".to_string(),
            sockets: SocketSet {
                type1_combo: Some(Socket { count: 2, output_kw: Some(350) }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_join_unique_sorts_and_dedupes() {
        let joined = join_unique(["b", "a", "b", ""].into_iter());
        assert_eq!(joined, "a;b");
        assert_eq!(join_unique(["", ""].into_iter()), "");
    }

    #[test]
    fn test_weekly_single_location_collapses() {
        let records = vec![
            record("1", "Main Street", 39.7, -104.9),
            record("2", "Main Street", 39.7, -104.9),
        ];
        let rows = weekly_rows(&records);

        // No individual points, one merged station.
        assert_eq!(rows.len(), 1);
        let station = &rows[0];
        assert_eq!(station.amenity, "charging_station");
        assert_eq!(station.ref_afdc, "1;2");
        assert_eq!(station.sockets[1].count, "4");
        assert_eq!(station.sockets[1].output, "350");
        assert_eq!(station.frequency, "0");
        assert!(station.man_made.is_empty());
    }

    #[test]
    fn test_weekly_multi_location_keeps_points() {
        let records = vec![
            record("1", "Main Street", 39.7, -104.9),
            record("2", "Main Street", 39.8, -104.9),
        ];
        let rows = weekly_rows(&records);

        // Two individual points plus the merged station.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].man_made, "charge_point");
        assert_eq!(rows[0].access, "yes");
        assert_eq!(rows[0].ref_afdc, "1");
        assert_eq!(rows[1].ref_afdc, "2");

        let station = &rows[2];
        assert_eq!(station.amenity, "charging_station");
        assert_eq!(station.latitude, 39.75);
        assert_eq!(station.longitude, -104.9);
    }

    #[test]
    fn test_weekly_groups_split_on_identity() {
        let records = vec![
            record("1", "Main Street", 39.7, -104.9),
            record("2", "Oak Street", 39.7, -104.9),
        ];
        let rows = weekly_rows(&records);

        // Two single-location groups, two stations, no points.
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.amenity == "charging_station"));
    }

    #[test]
    fn test_import_groups_by_brand_and_location() {
        let mut a = record("1", "Main Street", 39.7, -104.9);
        let b = record("2", "Main Street", 39.7, -104.9);
        let other = record("3", "Main Street", 39.8, -104.9);
        a.housenumber = String::new(); // first non-empty should fall through to b's

        let rows = import_rows(&[a, b, other]);
        assert_eq!(rows.len(), 2);

        let merged = rows.iter().find(|r| r.ref_afdc == "1;2").unwrap();
        assert_eq!(merged.housenumber, "100");
        assert_eq!(merged.motorcar, "designated");
        assert_eq!(merged.access, "yes");
        assert_eq!(merged.sockets[1].count, "4");
    }

    #[test]
    fn test_merged_outputs_union_lexicographically() {
        let mut a = record("1", "Main Street", 39.7, -104.9);
        let mut b = record("2", "Main Street", 39.7, -104.9);
        a.sockets.type1_combo = Some(Socket { count: 1, output_kw: Some(50) });
        b.sockets.type1_combo = Some(Socket { count: 1, output_kw: Some(350) });

        let rows = weekly_rows(&[a, b]);
        assert_eq!(rows[0].sockets[1].count, "2");
        // String sort, matching the source pipeline's behavior.
        assert_eq!(rows[0].sockets[1].output, "350;50");
    }

    #[test]
    fn test_merged_frequency_spans_members() {
        let mut a = record("1", "Main Street", 39.7, -104.9);
        a.sockets = SocketSet {
            type1: Some(Socket { count: 2, output_kw: Some(7) }),
            ..Default::default()
        };
        let b = record("2", "Main Street", 39.7, -104.9);

        let rows = weekly_rows(&[a, b]);
        assert_eq!(rows[0].frequency, "0;60");
    }
}
