//! Human-readable signed durations.
//!
//! A duration literal is an optional sign followed by one or more
//! `<decimal><unit>` groups, e.g. `300ms`, `-1.5h`, `2h45m`. Valid units are
//! `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. A bare `0` is accepted.
//! The total must fit in a signed 64-bit count of nanoseconds.
//!
//! [`format`] produces the canonical rendering (`1h30m0s`, `500ms`, `0s`),
//! which [`parse`] accepts back.

use chrono::TimeDelta;
use thiserror::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN`, the largest value a negative literal may reach.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Reasons a duration literal is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{text}'")]
    UnknownUnit { unit: String, text: String },

    #[error("duration '{0}' overflows 64-bit nanoseconds")]
    Overflow(String),
}

fn unit_scale(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration literal.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use objmeta::duration;
///
/// assert_eq!(duration::parse("1h30m").unwrap(), TimeDelta::minutes(90));
/// assert_eq!(duration::parse("-1.5s").unwrap(), TimeDelta::milliseconds(-1500));
/// assert!(duration::parse("10").is_err());
/// ```
pub fn parse(text: &str) -> Result<TimeDelta, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(text.to_string());
    let overflow = || ParseDurationError::Overflow(text.to_string());

    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = leading_int(rest).ok_or_else(overflow)?;
        let has_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction = 0u64;
        let mut scale = 1.0f64;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (f, s, after_fraction) = leading_fraction(after_dot);
            has_fraction = after_fraction.len() != after_dot.len();
            fraction = f;
            scale = s;
            rest = after_fraction;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit(text.to_string()));
        }
        let (unit, after_unit) = rest.split_at(unit_len);
        rest = after_unit;

        let unit_nanos = unit_scale(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            text: text.to_string(),
        })?;

        let mut value = whole.checked_mul(unit_nanos).ok_or_else(overflow)?;
        if fraction > 0 {
            // Sub-nanosecond remainders are truncated.
            let extra = (fraction as f64 * (unit_nanos as f64 / scale)) as u64;
            value = value.checked_add(extra).ok_or_else(overflow)?;
        }
        total = total.checked_add(value).ok_or_else(overflow)?;
        if total > MAX_MAGNITUDE {
            return Err(overflow());
        }
    }

    let nanos = if negative {
        0i64.checked_sub_unsigned(total).ok_or_else(overflow)?
    } else {
        i64::try_from(total).map_err(|_| overflow())?
    };
    Ok(TimeDelta::nanoseconds(nanos))
}

/// Consume leading ASCII digits. `None` on overflow.
fn leading_int(text: &str) -> Option<(u64, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let mut value: u64 = 0;
    for digit in text[..end].bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))?;
    }
    Some((value, &text[end..]))
}

/// Consume leading fraction digits, returning `(digits, 10^n, rest)`.
/// Digits past u64 precision are dropped without error.
fn leading_fraction(text: &str) -> (u64, f64, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let mut value: u64 = 0;
    let mut scale = 1.0f64;
    let mut saturated = false;
    for digit in text[..end].bytes() {
        if saturated {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            },
            None => saturated = true,
        }
    }
    (value, scale, &text[end..])
}

/// Render a duration in its canonical form.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use objmeta::duration;
///
/// assert_eq!(duration::format(TimeDelta::minutes(90)), "1h30m0s");
/// assert_eq!(duration::format(TimeDelta::milliseconds(500)), "500ms");
/// assert_eq!(duration::format(TimeDelta::zero()), "0s");
/// ```
pub fn format(delta: TimeDelta) -> String {
    let total = i128::from(delta.num_seconds()) * i128::from(SECOND)
        + i128::from(delta.subsec_nanos());
    let negative = total < 0;
    let magnitude = total.unsigned_abs();

    let body = if magnitude == 0 {
        "0s".to_string()
    } else if magnitude < u128::from(MICROSECOND) {
        format!("{magnitude}ns")
    } else if magnitude < u128::from(MILLISECOND) {
        format!("{}µs", decimal(magnitude, 3))
    } else if magnitude < u128::from(SECOND) {
        format!("{}ms", decimal(magnitude, 6))
    } else {
        let seconds = decimal(magnitude % u128::from(MINUTE), 9);
        let minutes = magnitude / u128::from(MINUTE);
        if minutes == 0 {
            format!("{seconds}s")
        } else if minutes < 60 {
            format!("{minutes}m{seconds}s")
        } else {
            format!("{}h{}m{seconds}s", minutes / 60, minutes % 60)
        }
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// `value / 10^places` with trailing fractional zeros trimmed.
fn decimal(value: u128, places: u32) -> String {
    let divisor = 10u128.pow(places);
    let whole = value / divisor;
    let fraction = value % divisor;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:0width$}", width = places as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
