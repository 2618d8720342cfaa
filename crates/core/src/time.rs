//! Formatting of whole-second durations for the timer and result screens.

/// Formats seconds as a zero-padded `MM:SS` clock.
///
/// Minutes are not wrapped into hours: 6000 seconds is `"100:00"`.
#[must_use]
pub fn clock_string(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}

/// Formats seconds as a phrase such as `"2 minutes 5 seconds"`.
///
/// Zero components are left out, except that a zero duration reads
/// `"0 seconds"`.
#[must_use]
pub fn phrase(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;

    if minutes == 0 {
        unit(remainder, "second")
    } else if remainder == 0 {
        unit(minutes, "minute")
    } else {
        format!("{} {}", unit(minutes, "minute"), unit(remainder, "second"))
    }
}

fn unit(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
