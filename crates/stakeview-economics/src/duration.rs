//! # Duration Formatting
//!
//! Converts a count of seconds into a compact human-readable duration, or a
//! fixed "ready" sentinel once the count reaches zero.

/// Sentinel shown once a lock has expired
pub const READY_TO_WITHDRAW: &str = "Ready to withdraw";

/// Seconds → compact duration string
pub struct DurationFormatter;

impl DurationFormatter {
    /// Format a remaining-seconds count.
    ///
    /// Zero and negative inputs both yield the ready sentinel; a negative
    /// duration is never surfaced. Positive counts decompose into
    /// days/hours/minutes/seconds with zero-valued components omitted,
    /// e.g. `90` → `"1m 30s"`.
    pub fn format(seconds: i64) -> String {
        if seconds <= 0 {
            return READY_TO_WITHDRAW.to_string();
        }

        let total = seconds as u64;
        let days = total / 86_400;
        let hours = (total % 86_400) / 3_600;
        let minutes = (total % 3_600) / 60;
        let seconds = total % 60;

        let mut parts = Vec::with_capacity(4);
        if days > 0 {
            parts.push(format!("{days}d"));
        }
        if hours > 0 {
            parts.push(format!("{hours}h"));
        }
        if minutes > 0 {
            parts.push(format!("{minutes}m"));
        }
        if seconds > 0 {
            parts.push(format!("{seconds}s"));
        }

        parts.join(" ")
    }
}
