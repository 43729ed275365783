//! Time formatting helpers.

use std::time::Duration;

/// Format an elapsed duration to a short human-readable string.
///
/// Verification round trips are usually sub-second, so milliseconds are kept
/// below one minute.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let secs = elapsed.as_secs();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{:03}s", secs, millis % 1_000)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
