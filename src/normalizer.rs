//! Transformation logic that converts a raw configuration document into
//! normalized program options.
//!
//! The pipeline is all-or-nothing: optional fields (`from`, `to`, `count`,
//! `debug`) are defaulted when missing or invalid, while a missing output
//! descriptor or an empty effective template list rejects the whole
//! document. Every decision that deviates from the input is recorded as a
//! [`Diagnostic`](crate::Diagnostic).

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    diagnostics::Diagnostics,
    error::Error,
    guard,
    output::{OutputOptions, normalize_output_options},
    parse::{parse_date, parse_non_nan_integer},
    template::{TemplateOptions, normalize_template_options},
    weight::normalize_weight,
};

/// Length of the default `from`..`to` window ending at the current time.
const DEFAULT_WINDOW_HOURS: i64 = 24;
/// Record count used when `count` is missing or invalid.
const DEFAULT_COUNT: i64 = 0;

/// Fully normalized configuration driving the generator.
#[derive(Debug, Serialize, Clone, PartialEq,)]
pub struct ProgramOptions
{
    /// Enables verbose generator behaviour.
    pub debug:     bool,
    /// Start of the generated time range.
    pub from:      DateTime<Utc,>,
    /// End of the generated time range.
    pub to:        DateTime<Utc,>,
    /// Number of records to generate.
    pub count:     i64,
    /// Output descriptor.
    pub out:       OutputOptions,
    /// Non-empty list of templates to pick from.
    pub templates: Vec<TemplateOptions,>,
}

/// Successful normalization result.
#[derive(Debug, Clone, PartialEq,)]
pub struct Normalized
{
    /// Normalized options.
    pub options:     ProgramOptions,
    /// Warnings and dropped-entry errors collected along the way.
    pub diagnostics: Diagnostics,
}

impl Normalized
{
    /// Rejects the result when any diagnostic was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] carrying the diagnostics when the
    /// collection is not empty.
    pub fn into_strict(self,) -> Result<ProgramOptions, Error,>
    {
        if self.diagnostics.is_empty() {
            Ok(self.options,)
        } else {
            Err(Error::from(self.diagnostics,),)
        }
    }
}

/// Normalizes a raw document using the current time and the default weight
/// scale.
///
/// # Errors
///
/// Returns [`Error::Rejected`] when the document is not an object, has no
/// usable `out` descriptor, or yields no valid template.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use serde_json::json;
/// use tplgen::normalize_program_options;
///
/// let raw = json!({ "out": "/tmp/out.txt", "templates": [{ "path": "./t.json" }] });
/// let normalized = normalize_program_options(&raw, Path::new("/cfg")).unwrap();
/// assert_eq!(normalized.options.templates[0].path, Path::new("/cfg/t.json"));
/// assert_eq!(normalized.options.count, 0);
/// ```
pub fn normalize_program_options(raw: &Value, base_path: &Path,) -> Result<Normalized, Error,>
{
    normalize_program_options_with(raw, base_path, Utc::now(), normalize_weight,)
}

/// Normalizes a raw document with an explicit clock and weight scale.
///
/// `now` anchors the default time window, which never starts before
/// `DateTime::<Utc>::MIN_UTC`, and `normalize_weight` maps every template
/// weight onto the selection scale.
///
/// # Errors
///
/// See [`normalize_program_options`].
pub fn normalize_program_options_with<W,>(
    raw: &Value,
    base_path: &Path,
    now: DateTime<Utc,>,
    normalize_weight: W,
) -> Result<Normalized, Error,>
where
    W: Fn(f64,) -> f64,
{
    let mut diagnostics = Diagnostics::default();

    if !guard::is_non_null_object(raw,) {
        diagnostics.error("(root)", format!("expected an object at the top level, got {raw}"),);
        return Err(Error::from(diagnostics,),);
    }

    let (from, to,) = normalize_time_range(raw, now, &mut diagnostics,);
    let count = normalize_count(&raw["count"], &mut diagnostics,);

    let Some(out,) = normalize_output_options(&raw["out"], base_path, &mut diagnostics,) else {
        diagnostics.error("out", format!("output options are required, got {}", raw["out"]),);
        return Err(Error::from(diagnostics,),);
    };

    let debug = normalize_debug(&raw["debug"], &mut diagnostics,);

    let templates =
        normalize_template_options(&raw["templates"], base_path, normalize_weight, &mut diagnostics,);
    if templates.is_empty() {
        diagnostics.error("templates", "no effective template specified",);
        return Err(Error::from(diagnostics,),);
    }

    debug!(
        "normalized program options with {} template(s) into {}",
        templates.len(),
        out.path.display()
    );

    Ok(Normalized {
        options: ProgramOptions {
            debug,
            from,
            to,
            count,
            out,
            templates,
        },
        diagnostics,
    },)
}

/// Parses `from` and `to`, replacing both with the default window unless
/// both are valid.
fn normalize_time_range(
    raw: &Value,
    now: DateTime<Utc,>,
    diagnostics: &mut Diagnostics,
) -> (DateTime<Utc,>, DateTime<Utc,>,)
{
    let from = parse_date(&raw["from"],);
    let to = parse_date(&raw["to"],);

    if let (Some(from,), Some(to,),) = (from, to,) {
        return (from, to,);
    }

    for (field, parsed,) in [("from", from,), ("to", to,),] {
        if parsed.is_none() && !raw[field].is_null() {
            diagnostics.warn(field, format!("invalid date {}", raw[field]),);
        }
    }
    if from.is_some() || to.is_some() {
        let failed = if from.is_none() { "from" } else { "to" };
        diagnostics.warn(
            failed,
            "from and to must both be valid dates, using the last 24 hours instead",
        );
    }

    let start = now
        .checked_sub_signed(Duration::hours(DEFAULT_WINDOW_HOURS,),)
        .unwrap_or(DateTime::<Utc,>::MIN_UTC,);
    (start, now,)
}

fn normalize_count(raw: &Value, diagnostics: &mut Diagnostics,) -> i64
{
    parse_non_nan_integer(raw,).unwrap_or_else(|| {
        if !raw.is_null() {
            diagnostics.warn("count", format!("invalid count {raw}, using {DEFAULT_COUNT}"),);
        }
        DEFAULT_COUNT
    },)
}

/// Only the literal `true` enables debug mode.
fn normalize_debug(raw: &Value, diagnostics: &mut Diagnostics,) -> bool
{
    match raw {
        Value::Bool(flag,) => *flag,
        Value::Null => false,
        other => {
            diagnostics.warn("debug", format!("expected a boolean, got {other}"),);
            false
        }
    }
}
