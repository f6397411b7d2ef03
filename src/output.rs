//! Output descriptor accepted either as a bare path or as a full object.

use std::{fmt, path::{Path, PathBuf}, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    diagnostics::Diagnostics,
    guard::{self, UnknownMember},
    parse::{parse_and_resolve_file_path, parse_string},
};

/// Destination kinds supported by the generator.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
#[serde(rename_all = "snake_case")]
pub enum OutputType
{
    /// Write every generated record into a single file.
    File,
    /// Write generated records as separate files inside a directory.
    Directory,
}

impl OutputType
{
    /// Every supported output type.
    pub const ALL: [Self; 2] = [Self::File, Self::Directory];

    pub const fn as_str(self,) -> &'static str
    {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for OutputType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

impl FromStr for OutputType
{
    type Err = UnknownMember;

    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == value,).ok_or_else(|| {
            UnknownMember {
                set: "output type", value: value.to_owned(),
            }
        },)
    }
}

/// Normalized output descriptor.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct OutputOptions
{
    /// Destination kind.
    #[serde(rename = "type")]
    pub output_type: OutputType,
    /// Destination path. Absolute unless a relative shorthand was supplied.
    pub path:        PathBuf,
    /// Optional size hint passed through to the generator untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size:        Option<String,>,
}

/// Converts the raw `out` value into an [`OutputOptions`] descriptor.
///
/// A string is shorthand for `{ type: "file", path: <string> }` and the path
/// is kept verbatim, without resolving it against `base_path`. The object
/// form requires a known `type` and a string `path`, which is resolved
/// against `base_path`.
///
/// Returns `None` when the value is neither a string nor an object, or when
/// the object form is invalid; the latter case records an error diagnostic.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use serde_json::json;
/// use tplgen::{Diagnostics, OutputType, normalize_output_options};
///
/// let mut diagnostics = Diagnostics::default();
/// let raw = json!({ "type": "directory", "path": "out" });
/// let options = normalize_output_options(&raw, Path::new("/cfg"), &mut diagnostics).unwrap();
/// assert_eq!(options.output_type, OutputType::Directory);
/// assert_eq!(options.path, Path::new("/cfg/out"));
/// ```
pub fn normalize_output_options(
    raw: &Value,
    base_path: &Path,
    diagnostics: &mut Diagnostics,
) -> Option<OutputOptions,>
{
    if let Some(shorthand,) = raw.as_str() {
        return Some(OutputOptions {
            output_type: OutputType::File,
            path:        PathBuf::from(shorthand,),
            size:        None,
        },);
    }
    if !guard::is_non_null_object(raw,) {
        return None;
    }

    let type_value = &raw["type"];
    let Some(output_type,) = guard::member::<OutputType,>(type_value,) else {
        diagnostics.error("out.type", format!("invalid output type {type_value}"),);
        return None;
    };

    let Some(path,) = parse_and_resolve_file_path(&raw["path"], base_path,) else {
        diagnostics.error("out.path", format!("invalid output path {}", raw["path"]),);
        return None;
    };

    let size = parse_string(&raw["size"],);
    if size.is_none() && !raw["size"].is_null() {
        diagnostics.warn("out.size", format!("ignoring non-string size {}", raw["size"]),);
    }

    Some(OutputOptions {
        output_type,
        path,
        size,
    },)
}

#[cfg(test)]
mod tests
{
    use std::path::{Path, PathBuf};

    use serde_json::json;

    use super::{OutputOptions, OutputType, normalize_output_options};
    use crate::diagnostics::Diagnostics;

    fn normalize(raw: serde_json::Value,) -> (Option<OutputOptions,>, Diagnostics,)
    {
        let mut diagnostics = Diagnostics::default();
        let options = normalize_output_options(&raw, Path::new("/cfg",), &mut diagnostics,);
        (options, diagnostics,)
    }

    #[test]
    fn shorthand_keeps_path_verbatim()
    {
        let (options, diagnostics,) = normalize(json!("relative/out.txt"),);
        let options = options.expect("expected shorthand to normalize",);

        assert_eq!(options.output_type, OutputType::File);
        assert_eq!(options.path, PathBuf::from("relative/out.txt"));
        assert_eq!(options.size, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn object_form_resolves_path_and_keeps_size()
    {
        let (options, diagnostics,) =
            normalize(json!({ "type": "file", "path": "./out/data.log", "size": "10MB" }),);
        let options = options.expect("expected object form to normalize",);

        assert_eq!(options.output_type, OutputType::File);
        assert_eq!(options.path, PathBuf::from("/cfg/out/data.log"));
        assert_eq!(options.size.as_deref(), Some("10MB"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn rejects_non_object_values_silently()
    {
        for raw in [json!(null), json!(42), json!(["file"]), json!(true)] {
            let (options, diagnostics,) = normalize(raw,);
            assert!(options.is_none());
            assert!(diagnostics.is_empty());
        }
    }

    #[test]
    fn rejects_unknown_type()
    {
        let (options, diagnostics,) = normalize(json!({ "type": "socket", "path": "/o" }),);

        assert!(options.is_none());
        assert!(diagnostics.has_errors());
        let entry = diagnostics.iter().next().expect("expected diagnostic",);
        assert_eq!(entry.field, "out.type");
        assert!(entry.message.contains("\"socket\""));
    }

    #[test]
    fn rejects_missing_type()
    {
        let (options, diagnostics,) = normalize(json!({ "path": "/o" }),);
        assert!(options.is_none());
        assert!(diagnostics.mentions("out.type"));
    }

    #[test]
    fn rejects_missing_or_non_string_path()
    {
        let (options, diagnostics,) = normalize(json!({ "type": "file" }),);
        assert!(options.is_none());
        assert!(diagnostics.mentions("out.path"));

        let (options, diagnostics,) = normalize(json!({ "type": "file", "path": 7 }),);
        assert!(options.is_none());
        assert!(diagnostics.mentions("out.path"));
    }

    #[test]
    fn drops_non_string_size_with_warning()
    {
        let (options, diagnostics,) = normalize(json!({ "type": "file", "path": "/o", "size": 1024 }),);
        let options = options.expect("expected output options",);

        assert_eq!(options.size, None);
        assert!(diagnostics.has_warnings());
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn serializes_with_type_key()
    {
        let options = OutputOptions {
            output_type: OutputType::Directory,
            path:        PathBuf::from("/o",),
            size:        None,
        };

        let json = serde_json::to_value(&options,).expect("serialization failed",);
        assert_eq!(json, json!({ "type": "directory", "path": "/o" }));
    }

    #[test]
    fn output_type_parses_names()
    {
        assert_eq!("file".parse::<OutputType,>(), Ok(OutputType::File));
        let error = "pipe".parse::<OutputType,>().unwrap_err();
        assert_eq!(error.to_string(), "unknown output type \"pipe\"");
    }
}
