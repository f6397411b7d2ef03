//! Loading of configuration documents from disk.
//!
//! Documents are decoded into an untyped [`serde_json::Value`] first and then
//! handed to the normalizer, so JSON and YAML files share one validation path.
//! Relative paths inside a document are resolved against the directory that
//! contains it.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::{
    error::Error,
    file::try_read_file,
    normalizer::{Normalized, normalize_program_options},
};

/// Encoding of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum ConfigFormat
{
    /// Strict JSON.
    Json,
    /// YAML, which also accepts JSON documents.
    Yaml,
}

impl ConfigFormat
{
    /// Picks the format from the file extension.
    ///
    /// `.json` selects [`ConfigFormat::Json`]; every other extension falls
    /// back to [`ConfigFormat::Yaml`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use tplgen::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path(Path::new("options.json")), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path(Path::new("options.yml")), ConfigFormat::Yaml);
    /// ```
    pub fn from_path(path: &Path,) -> Self
    {
        match path.extension() {
            Some(extension,) if extension == "json" => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Decodes document contents into an untyped value.
///
/// # Errors
///
/// Returns [`Error::Json`] or [`Error::Parse`] when the contents are not a
/// valid document of the requested format.
pub fn parse_document(contents: &str, format: ConfigFormat,) -> Result<Value, Error,>
{
    match format {
        ConfigFormat::Json => serde_json::from_str(contents,).map_err(|source| Error::Json {
            source,
        },),
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(contents,)?,),
    }
}

/// Reads, decodes and normalizes the configuration file at `path`.
///
/// # Errors
///
/// Returns [`Error::Access`] or [`Error::Read`] when the file cannot be read,
/// a decoding error when it is malformed, and [`Error::Rejected`] when the
/// document cannot be normalized.
pub async fn load_program_options(path: &Path,) -> Result<Normalized, Error,>
{
    let contents = try_read_file(path,).await?;
    let document = parse_document(&contents, ConfigFormat::from_path(path,),)?;
    let base_path = base_directory(path,);

    debug!("normalizing {} relative to {}", path.display(), base_path.display());
    normalize_program_options(&document, &base_path,)
}

/// Directory used to resolve relative paths found in the document at `path`.
fn base_directory(path: &Path,) -> PathBuf
{
    let parent = path.parent().unwrap_or_else(|| Path::new("",),);
    if parent.is_absolute() {
        return parent.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| parent.to_path_buf(), |cwd| cwd.join(parent,),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::Path};

    use serde_json::json;
    use tempfile::tempdir;

    use super::{ConfigFormat, base_directory, load_program_options, parse_document};
    use crate::{error::Error, output::OutputType, template::TemplateMode};

    #[test]
    fn format_follows_extension()
    {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Yaml);
    }

    #[test]
    fn parses_yaml_documents()
    {
        let yaml = r#"
out: /tmp/out.txt
count: "10"
templates:
  - path: ./t.json
    weight: 2
"#;
        let value = parse_document(yaml, ConfigFormat::Yaml,).expect("expected YAML to decode",);
        assert_eq!(value["out"], json!("/tmp/out.txt"));
        assert_eq!(value["templates"][0]["weight"], json!(2));
    }

    #[test]
    fn parses_json_documents()
    {
        let value = parse_document(r#"{"out": "/o", "debug": true}"#, ConfigFormat::Json,)
            .expect("expected JSON to decode",);
        assert_eq!(value["debug"], json!(true));
    }

    #[test]
    fn reports_decode_errors_per_format()
    {
        let error = parse_document("{not json", ConfigFormat::Json,).unwrap_err();
        assert!(matches!(error, Error::Json { .. }));

        let error = parse_document("out: [unclosed", ConfigFormat::Yaml,).unwrap_err();
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn base_directory_is_absolute()
    {
        assert_eq!(base_directory(Path::new("/cfg/options.yaml")), Path::new("/cfg"));
        assert!(base_directory(Path::new("options.yaml")).is_absolute());
    }

    #[tokio::test]
    async fn loads_and_resolves_against_config_directory()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config_path = dir.path().join("options.yaml",);
        let yaml = r#"
debug: true
from: "2024-01-01"
to: "2024-01-02"
count: 25
out:
  type: directory
  path: generated
  size: 1MB
templates:
  - path: templates/record.json
  - path: templates/line.txt
    weight: "0.5"
"#;
        fs::write(&config_path, yaml,).expect("failed to write config",);

        let normalized = load_program_options(&config_path,).await.expect("expected load success",);
        let options = normalized.options;

        assert!(options.debug);
        assert_eq!(options.count, 25);
        assert_eq!(options.out.output_type, OutputType::Directory);
        assert_eq!(options.out.path, dir.path().join("generated"));
        assert_eq!(options.out.size.as_deref(), Some("1MB"));
        assert_eq!(options.templates.len(), 2);
        assert_eq!(options.templates[0].mode, TemplateMode::Json);
        assert_eq!(options.templates[0].path, dir.path().join("templates/record.json"));
        assert_eq!(options.templates[1].mode, TemplateMode::Text);
        assert_eq!(options.templates[1].weight, 0.5);
        assert!(normalized.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn loads_json_documents()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config_path = dir.path().join("options.json",);
        fs::write(&config_path, r#"{"out": "/o", "templates": [{"path": "a.txt"}]}"#,)
            .expect("failed to write config",);

        let normalized = load_program_options(&config_path,).await.expect("expected load success",);
        assert_eq!(normalized.options.templates[0].path, dir.path().join("a.txt"));
    }

    #[tokio::test]
    async fn rejected_documents_surface_diagnostics()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config_path = dir.path().join("options.yaml",);
        fs::write(&config_path, "templates: []\n",).expect("failed to write config",);

        let error = load_program_options(&config_path,).await.expect_err("expected rejection",);
        assert!(error.diagnostics().is_some_and(|diagnostics| diagnostics.mentions("out")));
    }

    #[tokio::test]
    async fn missing_files_are_access_errors()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let error = load_program_options(&dir.path().join("absent.yaml",),)
            .await
            .expect_err("expected access error",);
        assert!(matches!(error, Error::Access { .. }));
    }
}
