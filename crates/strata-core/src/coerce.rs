//! Best-effort conversion of configuration values
//!
//! Every function here is total: an absent value, or one that cannot be
//! read as the target type, yields that type's zero value.

use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::time::Duration;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(scalar @ (Value::Bool(_) | Value::Int(_) | Value::Float(_))) => scalar.to_string(),
        _ => String::new(),
    }
}

pub fn to_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Int(i)) => *i != 0,
        Some(Value::Float(f)) => *f != 0.0,
        Some(Value::String(s)) => parse_bool(s.trim()).unwrap_or(false),
        _ => false,
    }
}

pub fn to_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Int(i)) => *i,
        Some(Value::Float(f)) if f.is_finite() => f.trunc() as i64,
        Some(Value::Bool(b)) => i64::from(*b),
        Some(Value::String(s)) => parse_int(s.trim()).unwrap_or(0),
        _ => 0,
    }
}

pub fn to_i32(value: Option<&Value>) -> i32 {
    i32::try_from(to_i64(value)).unwrap_or(0)
}

pub fn to_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Float(f)) => *f,
        Some(Value::Int(i)) => *i as f64,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Integers and floats are Unix seconds; strings are tried against the
/// common timestamp layouts.
pub fn to_time(value: Option<&Value>) -> DateTime<Utc> {
    let parsed = match value {
        Some(Value::String(s)) => parse_time(s.trim()),
        Some(Value::Int(secs)) => DateTime::from_timestamp(*secs, 0),
        Some(Value::Float(f)) if f.is_finite() => {
            let nanos = (f.fract().abs() * 1e9) as u32;
            DateTime::from_timestamp(f.trunc() as i64, nanos)
        }
        _ => None,
    };
    parsed.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Integers are nanoseconds; strings use unit notation such as `1h30m`.
/// Negative durations collapse to zero.
pub fn to_duration(value: Option<&Value>) -> Duration {
    match value {
        Some(Value::Int(nanos)) => u64::try_from(*nanos)
            .map(Duration::from_nanos)
            .unwrap_or(Duration::ZERO),
        Some(Value::Float(f)) if f.is_finite() && *f > 0.0 => Duration::from_nanos(*f as u64),
        Some(Value::String(s)) => {
            let s = s.trim();
            let parsed = if s.chars().any(char::is_alphabetic) {
                parse_duration(s)
            } else {
                parse_duration(&format!("{s}ns"))
            };
            parsed.unwrap_or(Duration::ZERO)
        }
        _ => Duration::ZERO,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_int(s: &str) -> Option<i64> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let radix_digits = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| unsigned.strip_prefix(prefix).map(|d| (d, *radix)));

    let Some((digits, radix)) = radix_digits else {
        return s.parse().ok();
    };
    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    if negative { magnitude.checked_neg() } else { Some(magnitude) }
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}

/// Parse a duration written as a sequence of decimal numbers with units,
/// e.g. `300ms`, `1.5h` or `2h45m`.
fn parse_duration(input: &str) -> Option<Duration> {
    let mut s = input.strip_prefix('+').unwrap_or(input);
    if s.starts_with('-') || s.is_empty() {
        return None;
    }
    if s == "0" {
        return Some(Duration::ZERO);
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total: u128 = 0;

    while !s.is_empty() {
        let number_end = s.find(|c: char| !is_number(c)).unwrap_or(s.len());
        let (number, rest) = s.split_at(number_end);
        let unit_end = rest.find(is_number).unwrap_or(rest.len());
        let (unit, rest) = rest.split_at(unit_end);
        s = rest;

        let multiplier = unit_nanos(unit)?;
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let fraction: f64 = if fraction.is_empty() {
            0.0
        } else {
            format!("0.{fraction}").parse().ok()?
        };

        total = total
            .checked_add(whole.checked_mul(multiplier)?)?
            .checked_add((fraction * multiplier as f64) as u128)?;
    }

    u64::try_from(total).ok().map(Duration::from_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from("abc"), "abc")]
    #[case(Value::Bool(true), "true")]
    #[case(Value::Int(-42), "-42")]
    #[case(Value::Float(3.0), "3")]
    #[case(Value::Float(12.34), "12.34")]
    #[case(Value::Null, "")]
    #[case(Value::from(vec![1, 2]), "")]
    fn test_to_string(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(to_string(Some(&value)), expected);
    }

    #[rstest]
    #[case(Value::Bool(true), true)]
    #[case(Value::Int(2), true)]
    #[case(Value::Int(0), false)]
    #[case(Value::Float(0.5), true)]
    #[case(Value::from("T"), true)]
    #[case(Value::from(" true "), true)]
    #[case(Value::from("False"), false)]
    #[case(Value::from("yes"), false)]
    #[case(Value::Null, false)]
    fn test_to_bool(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(to_bool(Some(&value)), expected);
    }

    #[rstest]
    #[case(Value::Int(987), 987)]
    #[case(Value::Float(3.9), 3)]
    #[case(Value::Float(-3.9), -3)]
    #[case(Value::Float(f64::NAN), 0)]
    #[case(Value::Bool(true), 1)]
    #[case(Value::from("2"), 2)]
    #[case(Value::from(" -17 "), -17)]
    #[case(Value::from("0x1F"), 31)]
    #[case(Value::from("-0b101"), -5)]
    #[case(Value::from("0o17"), 15)]
    #[case(Value::from("3.5"), 0)]
    #[case(Value::from("abc"), 0)]
    fn test_to_i64(#[case] value: Value, #[case] expected: i64) {
        assert_eq!(to_i64(Some(&value)), expected);
    }

    #[test]
    fn test_to_i32_out_of_range_is_zero() {
        assert_eq!(to_i32(Some(&Value::Int(i64::from(i32::MAX) + 1))), 0);
        assert_eq!(to_i32(Some(&Value::Int(-5))), -5);
    }

    #[rstest]
    #[case(Value::Float(12.34), 12.34)]
    #[case(Value::Int(3), 3.0)]
    #[case(Value::Bool(true), 1.0)]
    #[case(Value::from("2.5"), 2.5)]
    #[case(Value::from("nope"), 0.0)]
    fn test_to_f64(#[case] value: Value, #[case] expected: f64) {
        assert_eq!(to_f64(Some(&value)), expected);
    }

    #[test]
    fn test_absent_values_are_zero() {
        assert_eq!(to_string(None), "");
        assert!(!to_bool(None));
        assert_eq!(to_i32(None), 0);
        assert_eq!(to_i64(None), 0);
        assert_eq!(to_f64(None), 0.0);
        assert_eq!(to_time(None), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(to_duration(None), Duration::ZERO);
    }

    #[rstest]
    #[case("2024-03-01T12:30:00Z", 1_709_296_200)]
    #[case("2024-03-01T14:30:00+02:00", 1_709_296_200)]
    #[case("2024-03-01 12:30:00", 1_709_296_200)]
    #[case("2024-03-01", 1_709_251_200)]
    #[case("Fri, 01 Mar 2024 12:30:00 +0000", 1_709_296_200)]
    fn test_to_time_strings(#[case] input: &str, #[case] unix: i64) {
        assert_eq!(to_time(Some(&Value::from(input))).timestamp(), unix);
    }

    #[test]
    fn test_to_time_numbers_and_garbage() {
        assert_eq!(to_time(Some(&Value::Int(60))).timestamp(), 60);
        assert_eq!(
            to_time(Some(&Value::from("yesterday"))),
            DateTime::<Utc>::UNIX_EPOCH
        );
    }

    #[rstest]
    #[case(Value::from("300ms"), Duration::from_millis(300))]
    #[case(Value::from("1h30m"), Duration::from_secs(5_400))]
    #[case(Value::from("1.5s"), Duration::from_millis(1_500))]
    #[case(Value::from("2us"), Duration::from_micros(2))]
    #[case(Value::from("µs"), Duration::ZERO)]
    #[case(Value::from("1500"), Duration::from_nanos(1_500))]
    #[case(Value::from("-5s"), Duration::ZERO)]
    #[case(Value::from("10 parsecs"), Duration::ZERO)]
    #[case(Value::Int(2_000), Duration::from_nanos(2_000))]
    #[case(Value::Int(-1), Duration::ZERO)]
    #[case(Value::Bool(true), Duration::ZERO)]
    fn test_to_duration(#[case] value: Value, #[case] expected: Duration) {
        assert_eq!(to_duration(Some(&value)), expected);
    }
}
