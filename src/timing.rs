//! Elapsed time and split values.
//!
//! SpeedCoach writes durations as `HH:MM:SS.t`, `MM:SS.t` or plain seconds.
//! Seconds at or above sixty are rejected, which is how an unrepaired minute
//! rollover shows up.

use chrono::TimeDelta;

/// Parse an elapsed time or split value
pub fn parse_elapsed(value: &str) -> Option<TimeDelta> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let parts: Vec<&str> = value.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [seconds] => (0, 0, *seconds),
        [minutes, seconds] => (0, parse_whole(minutes)?, *seconds),
        [hours, minutes, seconds] => {
            let minutes = parse_whole(minutes)?;
            if minutes >= 60 {
                return None;
            }
            (parse_whole(hours)?, minutes, *seconds)
        }
        _ => return None,
    };

    let seconds = parse_seconds(seconds)?;
    if parts.len() > 1 && seconds >= 60_000 {
        return None;
    }

    let total_ms = (hours * 3600 + minutes * 60) * 1000 + seconds;
    TimeDelta::try_milliseconds(total_ms)
}

fn parse_whole(part: &str) -> Option<i64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Seconds with an optional fraction, in milliseconds
fn parse_seconds(part: &str) -> Option<i64> {
    let (whole, fraction) = part.split_once('.').unwrap_or((part, ""));
    let whole = parse_whole(whole)?;

    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let millis = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));

    whole.checked_mul(1000)?.checked_add(millis)
}
