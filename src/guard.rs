// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Predicates classifying untyped configuration values.
//!
//! Closed sets such as [`TemplateMode`] and [`OutputType`] are decoded through
//! [`member`], which either yields the enum variant or rejects the value. The
//! boolean guards are thin wrappers kept for callers that only need to
//! classify a value.

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{output::OutputType, template::TemplateMode};

/// Error returned when a string does not name a member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct UnknownMember
{
    /// Name of the closed set, e.g. `template mode`.
    pub set:   &'static str,
    /// Rejected input.
    pub value: String,
}

impl fmt::Display for UnknownMember
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "unknown {} {:?}", self.set, self.value)
    }
}

impl std::error::Error for UnknownMember {}

/// Returns `true` when the value is a string.
pub fn is_string(value: &Value,) -> bool
{
    value.is_string()
}

/// Returns `true` when the value is a map. `null` and arrays are rejected.
pub fn is_non_null_object(value: &Value,) -> bool
{
    value.is_object()
}

/// Decodes a closed-set member from a string value.
///
/// Matching is exact and case-sensitive; non-string values are rejected.
pub fn member<T,>(value: &Value,) -> Option<T,>
where
    T: FromStr,
{
    value.as_str().and_then(|raw| raw.parse().ok(),)
}

pub fn is_template_mode(value: &Value,) -> bool
{
    member::<TemplateMode,>(value,).is_some()
}

pub fn is_output_type(value: &Value,) -> bool
{
    member::<OutputType,>(value,).is_some()
}
