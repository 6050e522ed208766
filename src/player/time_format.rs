// SPDX-License-Identifier: MPL-2.0
//! Clock-style time labels for the controls.

/// Formats seconds as `MM:SS`, or `H:MM:SS` once an hour is reached.
///
/// Minutes and seconds are zero-padded to two digits; hours are not.
/// Fractions are truncated and negative input counts as zero. Callers are
/// expected to filter out non-finite values first (see [`display_time`]).
#[must_use]
pub fn format_duration(total_secs: f64) -> String {
    let total = total_secs.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if hours == 0 {
        format!("{:02}:{:02}", minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Label for a time that may be NaN or infinite; those render as `00:00`.
#[must_use]
pub fn display_time(secs: f64) -> String {
    if secs.is_finite() {
        format_duration(secs)
    } else {
        "00:00".to_string()
    }
}
