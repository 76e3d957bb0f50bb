//! Party duration as `[D ]HH:MM[:SS]` text.
//!
//! Durations are stored as whole seconds and exchanged as text. The text
//! form optionally starts with a day count followed by a space, the way the
//! frontend has always sent multi-day events.

/// Parse a duration into whole seconds.
pub fn parse_duration(text: &str) -> Result<i32, String> {
    let invalid = || format!("Enter a valid duration, e.g. 02:30:00 (got '{text}')");
    let text = text.trim();

    let (days, clock) = match text.split_once(' ') {
        Some((days, clock)) => (days.parse::<i64>().map_err(|_| invalid())?, clock.trim()),
        None => (0, text),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let (h, m, s) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    let hours: i64 = h.parse().map_err(|_| invalid())?;
    let minutes: i64 = m.parse().map_err(|_| invalid())?;
    let seconds: i64 = s.parse().map_err(|_| invalid())?;

    if days < 0 || hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(invalid());
    }

    let total = days
        .checked_mul(86_400)
        .zip(hours.checked_mul(3_600))
        .and_then(|(d, h)| d.checked_add(h))
        .and_then(|t| t.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)?;
    i32::try_from(total).map_err(|_| invalid())
}

/// Format whole seconds as `HH:MM:SS`, prefixed with `D ` past one day.
pub fn format_duration(total_secs: i32) -> String {
    let total = total_secs.max(0);
    let days = total / 86_400;
    let rem = total % 86_400;
    let clock = format!("{:02}:{:02}:{:02}", rem / 3_600, (rem % 3_600) / 60, rem % 60);
    if days > 0 {
        format!("{days} {clock}")
    } else {
        clock
    }
}
