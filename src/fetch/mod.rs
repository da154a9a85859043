//! HTTP retrieval of the AFDC charging-unit CSV.
//!
//! The NREL developer API serves the dataset as a single CSV download.
//! Transport goes through the [`HttpClient`] trait so tests can stub it,
//! with [`UrlParam`](auth::UrlParam) layering the `api_key` parameter on top.

mod basic;
pub mod auth;
pub mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;

/// Default endpoint for public DC-fast EV charging units.
pub const API_URL: &str =
    "https://developer.nrel.gov/api/alt-fuel-stations/v1/ev-charging-units.csv";

/// Fixed query parameters for the snapshot download. The `api_key`
/// parameter is appended separately by the auth layer.
pub const QUERY_PARAMS: &[(&str, &str)] = &[
    ("access", "public"),
    ("download", "true"),
    ("fuel_type", "ELEC"),
    ("ev_charging_level", "dc_fast"),
    ("status", "E"),
    ("country", "US"),
    ("utf8_bom", "true"),
    ("limit", "all"),
];

/// Fetches the charging-unit CSV from `url` with the standard query
/// parameters applied, returning the response body as text.
pub async fn fetch_csv<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let mut url: reqwest::Url = url.parse()?;
    url.query_pairs_mut().extend_pairs(QUERY_PARAMS);

    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_cover_snapshot_filters() {
        let keys: Vec<&str> = QUERY_PARAMS.iter().map(|(k, _)| *k).collect();
        for key in ["access", "fuel_type", "ev_charging_level", "status", "country"] {
            assert!(keys.contains(&key), "missing query param {key}");
        }
        // The key is injected by the auth layer, never baked into the URL.
        assert!(!keys.contains(&"api_key"));
    }

    #[test]
    fn test_api_url_parses() {
        let url: reqwest::Url = API_URL.parse().unwrap();
        assert_eq!(url.scheme(), "https");
    }
}
