//! Duration Strings
//!
//! Parses signed durations such as `"300ms"`, `"1h30m"`, `"-1.5s"` used by the
//! configuration and by the `ttl` field of set requests.

use chrono::Duration;
use thiserror::Error;

/// Reasons a duration string can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} out of range")]
    Overflow(String),
}

const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<i128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SECOND,
        "m" => 60 * NANOS_PER_SECOND,
        "h" => 3_600 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

/// Parses a sequence of decimal numbers each followed by a unit
/// (`ns`, `us`, `ms`, `s`, `m`, `h`), with an optional leading sign.
///
/// `"0"` is accepted without a unit.
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(input.to_string());

    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(invalid());
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        total += scale_number(number, scale).ok_or_else(invalid)?;
        if total > i64::MAX as i128 {
            return Err(ParseDurationError::Overflow(input.to_string()));
        }
        rest = tail;
    }

    let nanos = if negative { -total } else { total };
    Ok(Duration::nanoseconds(nanos as i64))
}

/// Multiplies a decimal literal such as `"1.25"` by `scale` nanoseconds,
/// truncating sub-nanosecond digits.
fn scale_number(number: &str, scale: i128) -> Option<i128> {
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };
    if fraction.contains('.') {
        return None;
    }

    let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(scale)?;

    let mut divisor: i128 = 1;
    let mut fraction_value: i128 = 0;
    for digit in fraction.bytes().take(18) {
        fraction_value = fraction_value * 10 + i128::from(digit - b'0');
        divisor *= 10;
    }
    nanos = nanos.checked_add(fraction_value * scale / divisor)?;
    Some(nanos)
}
