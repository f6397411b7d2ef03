// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured validation messages collected while normalizing a document.
//!
//! Every entry is mirrored to the `tracing` channel when it is recorded, so
//! command-line users see one line per problem on stderr while library callers
//! receive the same information as data.

use std::fmt;

use serde::Serialize;
use tracing::{error, warn};

/// Severity attached to a [`Diagnostic`].
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
#[serde(rename_all = "snake_case")]
pub enum Severity
{
    /// The field was defaulted or dropped; normalization continued.
    Warning,
    /// The field blocked normalization or removed an entry entirely.
    Error,
}

impl Severity
{
    /// Lowercase label used when rendering diagnostics.
    pub const fn as_str(self,) -> &'static str
    {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single validation message naming the offending field.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct Diagnostic
{
    /// Severity of the problem.
    pub severity: Severity,
    /// Dotted location of the field, e.g. `templates[2].path`.
    pub field:    String,
    /// Human readable description including the offending value.
    pub message:  String,
}

impl fmt::Display for Diagnostic
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}: {}: {}", self.severity.as_str(), self.field, self.message)
    }
}

/// Ordered collection of [`Diagnostic`] entries.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq,)]
#[serde(transparent)]
pub struct Diagnostics
{
    entries: Vec<Diagnostic,>,
}

impl Diagnostics
{
    /// Records a warning and logs it.
    pub fn warn<F, M,>(&mut self, field: F, message: M,)
    where
        F: Into<String,>,
        M: Into<String,>,
    {
        let field = field.into();
        let message = message.into();
        warn!(field = %field, "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Warning, field, message,
        },);
    }

    /// Records an error and logs it.
    pub fn error<F, M,>(&mut self, field: F, message: M,)
    where
        F: Into<String,>,
        M: Into<String,>,
    {
        let field = field.into();
        let message = message.into();
        error!(field = %field, "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Error, field, message,
        },);
    }

    pub fn has_errors(&self,) -> bool
    {
        self.entries.iter().any(|entry| entry.severity == Severity::Error,)
    }

    pub fn has_warnings(&self,) -> bool
    {
        self.entries.iter().any(|entry| entry.severity == Severity::Warning,)
    }

    pub fn len(&self,) -> usize
    {
        self.entries.len()
    }

    pub fn is_empty(&self,) -> bool
    {
        self.entries.is_empty()
    }

    pub fn iter(&self,) -> std::slice::Iter<'_, Diagnostic,>
    {
        self.entries.iter()
    }

    /// Returns `true` when any entry refers to `field`.
    pub fn mentions(&self, field: &str,) -> bool
    {
        self.entries.iter().any(|entry| entry.field == field,)
    }
}

impl<'a,> IntoIterator for &'a Diagnostics
{
    type IntoIter = std::slice::Iter<'a, Diagnostic,>;
    type Item = &'a Diagnostic;

    fn into_iter(self,) -> Self::IntoIter
    {
        self.entries.iter()
    }
}

impl fmt::Display for Diagnostics
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        for (index, entry,) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok((),)
    }
}
