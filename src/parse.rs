// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scalar parsers converting untyped values into typed options.
//!
//! Every parser is total: it returns `None` when the value cannot be
//! interpreted and never panics. Numeric strings are read with
//! leading-prefix semantics, so `"42abc"` yields `42` and `"2.5kg"` yields
//! `2.5`, while strings without a numeric prefix are rejected.

use std::{
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;

static HEX_PREFIX: LazyLock<Option<Regex,>,> =
    LazyLock::new(|| Regex::new(r"^([+-]?)0[xX]([0-9a-fA-F]*)",).ok(),);
static DECIMAL_PREFIX: LazyLock<Option<Regex,>,> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+",).ok(),);
static FLOAT_PREFIX: LazyLock<Option<Regex,>,> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)(?:(Infinity)|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)",).ok()
},);
static YEAR_MONTH: LazyLock<Option<Regex,>,> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})(?:-([0-9]{2}))?$",).ok(),);

/// Minute-precision date-time layouts carrying an offset or `Z`.
const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];
/// Date-time layouts without an offset, interpreted in local time.
const LOCAL_LAYOUTS: [&str; 4] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Lower bound of the `i64` range expressed as `f64`.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// Exclusive upper bound of the `i64` range expressed as `f64`.
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// Returns the string when the value already is one.
pub fn parse_string(value: &Value,) -> Option<String,>
{
    value.as_str().map(str::to_owned,)
}

/// Parses an integer from an integral number or a numeric string prefix.
///
/// Numbers with a fractional part are rejected rather than truncated, while
/// strings follow prefix semantics: `"3.7"` yields `3`, `"0x1f"` yields `31`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tplgen::parse_non_nan_integer;
///
/// assert_eq!(parse_non_nan_integer(&json!("42abc")), Some(42));
/// assert_eq!(parse_non_nan_integer(&json!(3.7)), None);
/// ```
pub fn parse_non_nan_integer(value: &Value,) -> Option<i64,>
{
    match value {
        Value::Number(number,) => {
            if let Some(integer,) = number.as_i64() {
                return Some(integer,);
            }
            let float = number.as_f64()?;
            let integral = float.is_finite() && float.fract() == 0.0;
            if integral && (I64_MIN_F64..I64_END_F64).contains(&float,) {
                Some(float as i64,)
            } else {
                None
            }
        }
        Value::String(raw,) => integer_prefix(raw.trim_start(),),
        _ => None,
    }
}

fn integer_prefix(input: &str,) -> Option<i64,>
{
    if let Some(captures,) = HEX_PREFIX.as_ref()?.captures(input,) {
        let digits = captures.get(2,)?.as_str();
        if digits.is_empty() {
            return None;
        }
        let magnitude = i64::from_str_radix(digits, 16,).ok()?;
        return if &captures[1] == "-" { magnitude.checked_neg() } else { Some(magnitude,) };
    }

    let matched = DECIMAL_PREFIX.as_ref()?.find(input,)?;
    matched.as_str().parse().ok()
}

/// Parses a float from a number or a numeric string prefix.
///
/// `"Infinity"` is accepted the same way a numeric prefix is; callers that
/// require finite values must clamp the result.
pub fn parse_non_nan_float(value: &Value,) -> Option<f64,>
{
    match value {
        Value::Number(number,) => number.as_f64().filter(|float| !float.is_nan(),),
        Value::String(raw,) => float_prefix(raw.trim_start(),),
        _ => None,
    }
}

fn float_prefix(input: &str,) -> Option<f64,>
{
    let captures = FLOAT_PREFIX.as_ref()?.captures(input,)?;
    if captures.get(2,).is_some() {
        return Some(if &captures[1] == "-" { f64::NEG_INFINITY } else { f64::INFINITY },);
    }
    captures.get(0,)?.as_str().parse().ok()
}

/// Parses a date-time string.
///
/// Accepted representations are RFC 3339, RFC 2822, ISO date-times with an
/// offset written to the minute (`2024-01-01T10:30Z`), ISO date-times without
/// an offset (read as local time) and ISO dates `YYYY-MM-DD`, `YYYY-MM` or
/// `YYYY` (read as UTC midnight).
pub fn parse_date(value: &Value,) -> Option<DateTime<Utc,>,>
{
    let raw = value.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed,) = DateTime::parse_from_rfc3339(raw,) {
        return Some(parsed.with_timezone(&Utc,),);
    }
    if let Ok(parsed,) = DateTime::parse_from_rfc2822(raw,) {
        return Some(parsed.with_timezone(&Utc,),);
    }
    if let Ok(date,) = NaiveDate::parse_from_str(raw, "%Y-%m-%d",) {
        return Some(date.and_hms_opt(0, 0, 0,)?.and_utc(),);
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(parsed,) = DateTime::parse_from_str(raw, layout,) {
            return Some(parsed.with_timezone(&Utc,),);
        }
    }
    for layout in LOCAL_LAYOUTS {
        if let Ok(naive,) = NaiveDateTime::parse_from_str(raw, layout,) {
            return Local.from_local_datetime(&naive,).earliest().map(|local| local.with_timezone(&Utc,),);
        }
    }

    let captures = YEAR_MONTH.as_ref()?.captures(raw,)?;
    let year = captures[1].parse().ok()?;
    let month = captures.get(2,).map_or(Some(1,), |month| month.as_str().parse().ok(),)?;
    Some(NaiveDate::from_ymd_opt(year, month, 1,)?.and_hms_opt(0, 0, 0,)?.and_utc(),)
}

/// Resolves a string path against `base_path`.
///
/// Absolute paths are returned unchanged. Relative paths are joined onto the
/// base (itself made absolute against the current directory when needed) and
/// `.` and `..` components are collapsed without touching the filesystem.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
///
/// use serde_json::json;
/// use tplgen::parse_and_resolve_file_path;
///
/// let resolved = parse_and_resolve_file_path(&json!("../t/a.json"), Path::new("/cfg/sub"));
/// assert_eq!(resolved, Some(PathBuf::from("/cfg/t/a.json")));
/// ```
pub fn parse_and_resolve_file_path(value: &Value, base_path: &Path,) -> Option<PathBuf,>
{
    let raw = Path::new(value.as_str()?,);
    if raw.is_absolute() {
        return Some(raw.to_path_buf(),);
    }

    let joined = if base_path.is_absolute() {
        base_path.join(raw,)
    } else {
        std::env::current_dir().ok()?.join(base_path,).join(raw,)
    };
    Some(collapse(&joined,),)
}

fn collapse(path: &Path,) -> PathBuf
{
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_,) | Component::RootDir => resolved.push(component.as_os_str(),),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part,) => resolved.push(part,),
        }
    }
    resolved
}
