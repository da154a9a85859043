//! Opening-hours cleanup.

use tracing::warn;

/// Normalizes the AFDC `Access Days Time` text into an `opening_hours`
/// value.
///
/// Blank values and any variant of "24 hours daily" become `24/7`. Other
/// text is passed through unchanged and logged, so an operator can review
/// the snapshot before upload.
pub fn normalize_hours(raw: &str) -> String {
    let t = raw.trim();
    if t.is_empty() || t.to_lowercase().contains("24 hours daily") {
        return "24/7".to_string();
    }
    warn!(hours = t, "Opening hours left unnormalized");
    t.to_string()
}
