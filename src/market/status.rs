use chrono::{DateTime, Utc};

use super::timezone::format_est_time;

/// The "Last updated" line shown under each view.
///
/// `label` is the timeframe tag of the view (`1D`, `1W`). A refresh error is
/// reported in full only when there is no earlier data to fall back on.
pub fn last_updated_line(last: Option<DateTime<Utc>>, label: &str, error: Option<&str>) -> String {
    match (last, error) {
        (None, None) => format!("Last updated: -- ({})", label),
        (None, Some(error)) => format!("Last updated: -- ({}) – error: {}", label, error),
        (Some(at), Some(_)) => format!(
            "Last updated: {} ({}) – last refresh failed",
            format_est_time(at),
            label
        ),
        (Some(at), None) => format!("Last updated: {} ({})", format_est_time(at), label),
    }
}
