//! Weekly snapshot window.

use anyhow::{Result, bail};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Returns the previous Sunday-through-Saturday date range, inclusive.
///
/// The weekly snapshot covers complete weeks only, so this refuses to run
/// on any day other than Sunday. Operators re-running a past week pass
/// that week's Sunday explicitly.
pub fn week_range(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    if today.weekday() != Weekday::Sun {
        bail!(
            "weekly snapshot must run on a Sunday, got {} ({})",
            today,
            today.weekday()
        );
    }
    Ok((today - Duration::days(7), today - Duration::days(1)))
}
