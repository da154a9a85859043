//! Street address splitting, abbreviation expansion, and title-casing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::title_word;

static HOUSE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<num>\d+)\s+(?P<street>.+)$").unwrap());

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<num>\d+)(?P<suffix>ST|ND|RD|TH)$").unwrap());

/// Abbreviation table applied on word boundaries, case-sensitive.
const EXPANSIONS: &[(&str, &str)] = &[
    ("St", "Street"),
    ("Ave", "Avenue"),
    ("Rd", "Road"),
    ("RD", "Road"),
    ("Blvd", "Boulevard"),
    ("Dr", "Drive"),
    ("Ln", "Lane"),
    ("Hwy", "Highway"),
    ("Pkwy", "Parkway"),
    ("Pl", "Place"),
    ("Ct", "Court"),
    ("Fwy", "Freeway"),
    ("Sq", "Square"),
    ("Circ", "Circle"),
    ("Rt", "Route"),
    ("Tpke", "Turnpike"),
    ("N", "North"),
    ("S", "South"),
    ("E", "East"),
    ("W", "West"),
    ("NE", "Northeast"),
    ("SE", "Southeast"),
    ("SW", "Southwest"),
    ("NW", "Northwest"),
];

static EXPANSION_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    EXPANSIONS
        .iter()
        .map(|(pat, repl)| (Regex::new(&format!(r"\b{pat}\b")).unwrap(), *repl))
        .collect()
});

const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

// "U.S." would otherwise lose its S to the compass expansion.
const US_PLACEHOLDER: &str = "__US__";

/// Splits a raw street address into `(housenumber, street)` and expands
/// street abbreviations.
///
/// Only the text before the first comma is considered. When no leading
/// house number is present the number comes back empty and the whole
/// fragment is treated as the street.
pub fn expand_address(raw: &str) -> (String, String) {
    let addr = raw.split(',').next().unwrap_or("").trim();
    match HOUSE_NUMBER.captures(addr) {
        Some(caps) => (caps["num"].to_string(), expand_street(&caps["street"])),
        None => (String::new(), expand_street(addr)),
    }
}

fn expand_street(street: &str) -> String {
    let mut s = street.replace("U.S.", US_PLACEHOLDER);
    for (re, repl) in EXPANSION_RES.iter() {
        s = re.replace_all(&s, *repl).into_owned();
    }
    s.replace(US_PLACEHOLDER, "US")
}

/// Title-cases a street name while keeping `US` and state codes upper-case
/// and ordinal suffixes lower-case (`42ND` becomes `42nd`). Periods are
/// removed outright.
pub fn title_street(street: &str) -> String {
    let cleaned = street.replace('.', "");
    cleaned
        .split_whitespace()
        .map(|part| {
            let up = part.to_uppercase();
            if let Some(caps) = ORDINAL.captures(&up) {
                format!("{}{}", &caps["num"], caps["suffix"].to_lowercase())
            } else if up == "US" || STATE_CODES.contains(&up.as_str()) {
                up
            } else {
                title_word(part)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_basic_abbreviations() {
        assert_eq!(
            expand_address("123 Main St"),
            ("123".to_string(), "Main Street".to_string())
        );
        assert_eq!(
            expand_address("400 W Colfax Ave"),
            ("400".to_string(), "West Colfax Avenue".to_string())
        );
    }

    #[test]
    fn test_expand_drops_suite_after_comma() {
        assert_eq!(
            expand_address("2020 N Academy Blvd, Suite 100"),
            ("2020".to_string(), "North Academy Boulevard".to_string())
        );
    }

    #[test]
    fn test_expand_preserves_us_route() {
        let (num, street) = expand_address("1700 U.S. Hwy 1");
        assert_eq!(num, "1700");
        assert_eq!(street, "US Highway 1");
    }

    #[test]
    fn test_expand_without_house_number() {
        let (num, street) = expand_address("Main St at 5th");
        assert_eq!(num, "");
        assert_eq!(street, "Main Street at 5th");
    }

    #[test]
    fn test_expand_does_not_touch_ordinals() {
        // The "st" in "1st" has no word boundary before it.
        assert_eq!(
            expand_address("800 N 1st Ave"),
            ("800".to_string(), "North 1st Avenue".to_string())
        );
    }

    #[test]
    fn test_title_street_basic() {
        assert_eq!(title_street("MAIN STREET"), "Main Street");
        assert_eq!(title_street("east colfax avenue"), "East Colfax Avenue");
    }

    #[test]
    fn test_title_street_ordinals_and_codes() {
        assert_eq!(title_street("EAST 42ND STREET"), "East 42nd Street");
        assert_eq!(title_street("US Highway 1"), "US Highway 1");
        assert_eq!(title_street("CA Highway 99"), "CA Highway 99");
        assert_eq!(title_street("3rd Avenue"), "3rd Avenue");
    }

    #[test]
    fn test_title_street_strips_periods() {
        assert_eq!(title_street("St. Charles Place"), "St Charles Place");
    }
}
