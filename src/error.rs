#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the tplgen crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;

/// Unified error type returned by the file accessor, the document loader, the
/// normalizer and the CLI.
///
/// Only I/O and decoding problems surface as dedicated variants. Field-level
/// validation problems are collected as [`Diagnostics`] and reported through
/// [`Error::Rejected`] when they prevent a configuration from being built.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The file could not be opened for reading.
    #[error("cannot access {path:?}: {source}")]
    Access {
        /// Location of the file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The file was opened but its content could not be read as UTF-8 text.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// Location of the file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps JSON decoding errors.
    #[error("failed to parse configuration: {source}")]
    Json {
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// Wraps serialization errors when writing normalized output.
    #[error("failed to serialize program options: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// The configuration could not be normalized.
    #[error("configuration rejected:\n{diagnostics}")]
    Rejected {
        /// Every diagnostic collected before the pipeline gave up.
        diagnostics: Diagnostics
    }
}

impl Error {
    /// Returns the collected diagnostics when the error is a rejection.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Rejected {
                diagnostics
            } => Some(diagnostics),
            _ => None
        }
    }

    /// Formats the error for diagnostics without the variant name.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<Diagnostics> for Error {
    fn from(diagnostics: Diagnostics) -> Self {
        Self::Rejected {
            diagnostics
        }
    }
}

/// Creates an [`Error::Access`] variant capturing the failing path and source.
pub fn access_error(path: &Path, source: std::io::Error) -> Error {
    Error::Access {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Read`] variant capturing the failing path and source.
pub fn read_error(path: &Path, source: std::io::Error) -> Error {
    Error::Read {
        path: path.to_path_buf(),
        source
    }
}
