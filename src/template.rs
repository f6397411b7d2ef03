//! Template descriptors and the normalizer for the `templates` list.
//!
//! Entries are validated one at a time. Invalid entries are dropped and
//! reported while the remaining entries are kept, so a single typo does not
//! discard an otherwise usable configuration. Whether an empty result is
//! fatal is decided by the program-options normalizer.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    diagnostics::Diagnostics,
    guard::{self, UnknownMember},
    parse::{parse_and_resolve_file_path, parse_non_nan_float},
    weight::DEFAULT_WEIGHT,
};

/// Extension that selects [`TemplateMode::Json`] during inference.
const JSON_EXTENSION: &str = "json";

/// How the generator interprets a template file.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
#[serde(rename_all = "snake_case")]
pub enum TemplateMode
{
    /// The template is a JSON document.
    Json,
    /// The template is plain text.
    Text,
}

impl TemplateMode
{
    /// Every supported template mode.
    pub const ALL: [Self; 2] = [Self::Json, Self::Text];

    pub const fn as_str(self,) -> &'static str
    {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for TemplateMode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

impl FromStr for TemplateMode
{
    type Err = UnknownMember;

    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == value,).ok_or_else(|| {
            UnknownMember {
                set: "template mode", value: value.to_owned(),
            }
        },)
    }
}

/// Normalized template descriptor.
#[derive(Debug, Serialize, Clone, PartialEq,)]
pub struct TemplateOptions
{
    /// Parsing mode of the template file.
    pub mode:   TemplateMode,
    /// Absolute path of the template file.
    pub path:   PathBuf,
    /// Selection weight after normalization.
    pub weight: f64,
}

/// Infers the template mode from the file extension.
///
/// Only an exact, lowercase `.json` extension selects [`TemplateMode::Json`].
///
/// # Examples
///
/// ```
/// use tplgen::{TemplateMode, determine_template_mode_by_file};
///
/// assert_eq!(determine_template_mode_by_file("/a/b/c.json"), TemplateMode::Json);
/// assert_eq!(determine_template_mode_by_file("/a/b/c.JSON"), TemplateMode::Text);
/// ```
pub fn determine_template_mode_by_file<P,>(path: P,) -> TemplateMode
where
    P: AsRef<Path,>,
{
    match path.as_ref().extension() {
        Some(extension,) if extension == JSON_EXTENSION => TemplateMode::Json,
        _ => TemplateMode::Text,
    }
}

/// Converts the raw `templates` value into a list of descriptors.
///
/// A value that is not an array is treated as absent and yields an empty
/// list. Entries that are not objects or lack a usable `path` are dropped
/// with an error diagnostic. Weights default to [`DEFAULT_WEIGHT`] and are
/// passed through `normalize_weight`.
pub fn normalize_template_options<W,>(
    raw: &Value,
    base_path: &Path,
    normalize_weight: W,
    diagnostics: &mut Diagnostics,
) -> Vec<TemplateOptions,>
where
    W: Fn(f64,) -> f64,
{
    let Some(entries,) = raw.as_array() else {
        if !raw.is_null() {
            diagnostics.warn("templates", format!("expected a list of templates, got {raw}"),);
        }
        return Vec::new();
    };

    let templates: Vec<TemplateOptions,> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry,)| {
            normalize_entry(index, entry, base_path, &normalize_weight, diagnostics,)
        },)
        .collect();

    debug!("kept {} of {} template entries", templates.len(), entries.len());
    templates
}

fn normalize_entry<W,>(
    index: usize,
    entry: &Value,
    base_path: &Path,
    normalize_weight: &W,
    diagnostics: &mut Diagnostics,
) -> Option<TemplateOptions,>
where
    W: Fn(f64,) -> f64,
{
    let field = format!("templates[{index}]");
    if !guard::is_non_null_object(entry,) {
        diagnostics.error(field, format!("dropping template that is not an object: {entry}"),);
        return None;
    }

    let Some(path,) = parse_and_resolve_file_path(&entry["path"], base_path,) else {
        diagnostics.error(
            format!("{field}.path"),
            format!("dropping template with invalid path {}", entry["path"]),
        );
        return None;
    };

    let mode = match guard::member::<TemplateMode,>(&entry["mode"],) {
        Some(mode,) => mode,
        None => {
            let inferred = determine_template_mode_by_file(&path,);
            if !entry["mode"].is_null() {
                diagnostics.warn(
                    format!("{field}.mode"),
                    format!("invalid mode {}, inferred {inferred} from the file name", entry["mode"]),
                );
            }
            inferred
        }
    };

    let weight = parse_non_nan_float(&entry["weight"],).unwrap_or_else(|| {
        if !entry["weight"].is_null() {
            diagnostics.warn(
                format!("{field}.weight"),
                format!("invalid weight {}, using {DEFAULT_WEIGHT}", entry["weight"]),
            );
        }
        DEFAULT_WEIGHT
    },);

    Some(TemplateOptions {
        mode,
        path,
        weight: normalize_weight(weight,),
    },)
}
