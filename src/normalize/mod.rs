//! Field normalization into the OSM-style tagging schema.
//!
//! Each submodule owns one family of rules: street address expansion and
//! title-casing, phone formatting, opening-hours cleanup, network brand
//! mapping, and connector/socket tagging.

pub mod address;
pub mod connector;
pub mod hours;
pub mod network;
pub mod phone;

/// Title-cases a single word: first character upper, the rest lower.
pub(crate) fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Left-pads a ZIP code to five digits. Blank input stays blank.
pub fn postcode(zip: &str) -> String {
    let t = zip.trim();
    if t.is_empty() {
        String::new()
    } else {
        format!("{t:0>5}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_word() {
        assert_eq!(title_word("MAIN"), "Main");
        assert_eq!(title_word("main"), "Main");
        assert_eq!(title_word(""), "");
    }

    #[test]
    fn test_postcode_padding() {
        assert_eq!(postcode("501"), "00501");
        assert_eq!(postcode("80202"), "80202");
        assert_eq!(postcode(""), "");
        assert_eq!(postcode("  "), "");
    }
}
