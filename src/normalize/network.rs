//! Charging network brand-name mapping.

use super::title_word;

/// AFDC `EV Network` values with a known canonical brand name.
const NETWORK_MAP: &[(&str, &str)] = &[
    ("eVgo Network", "EVgo"),
    ("SHELL_RECHARGE", "Shell Recharge"),
    ("ChargePoint Network", "ChargePoint"),
    ("IONNA", "IONNA"),
    ("ABM", "ABM"),
    ("FCN", "Francis Energy"),
    ("Blink Network", "Blink"),
    ("RED_E", "Red E"),
    ("CHARGELAB", "ChargeLab"),
    ("RIVIAN_ADVENTURE", "Rivian Adventure"),
    ("RIVIAN_WAYPOINTS", "Rivian Waypoints"),
    ("ELECTRIC_ERA", "Electric Era"),
    ("BP_PULSE", "bp pulse"),
    ("7CHARGE", "7Charge"),
    ("APPLEGREEN", "Applegreen"),
    ("CIRCLE_K", "Circle K Charge"),
    ("ENVIROSPARK", "EnviroSpark"),
    ("FORD_CHARGE", "Blue Oval"),
    ("FPLEV", "FPL EVolution"),
    ("KWIK_CHARGE", "Kwik Charge"),
];

/// Maps an AFDC network identifier to its display brand name.
///
/// Unknown identifiers fall back to replacing underscores with spaces and
/// title-casing each word, which reads well for the SCREAMING_SNAKE names
/// the dataset uses for newer networks.
pub fn network_name(raw: &str) -> String {
    let t = raw.trim();
    if t.is_empty() {
        return String::new();
    }
    if let Some((_, mapped)) = NETWORK_MAP.iter().find(|(key, _)| *key == t) {
        return mapped.to_string();
    }
    t.replace('_', " ")
        .split_whitespace()
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}
