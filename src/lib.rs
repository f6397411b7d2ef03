//! Normalization of template generator program options.
//!
//! The library turns loosely-typed configuration documents (JSON or YAML)
//! into a strongly-shaped [`ProgramOptions`] value. Optional fields are
//! defaulted, relative paths are resolved against the configuration
//! directory, invalid template entries are dropped, and every deviation from
//! the input is reported as a [`Diagnostic`]. A document without a usable
//! output descriptor or without a single valid template is rejected as a
//! whole.

mod config;
mod diagnostics;
mod error;
mod file;
mod guard;
pub mod logging;
mod normalizer;
mod output;
mod parse;
mod template;
mod weight;

pub use config::{ConfigFormat, load_program_options, parse_document};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, access_error, read_error};
pub use file::try_read_file;
pub use guard::{UnknownMember, is_non_null_object, is_output_type, is_string, is_template_mode, member};
pub use normalizer::{Normalized, ProgramOptions, normalize_program_options, normalize_program_options_with};
pub use output::{OutputOptions, OutputType, normalize_output_options};
pub use parse::{
    parse_and_resolve_file_path, parse_date, parse_non_nan_float, parse_non_nan_integer,
    parse_string,
};
pub use template::{
    TemplateMode, TemplateOptions, determine_template_mode_by_file, normalize_template_options,
};
pub use weight::{DEFAULT_WEIGHT, MAX_WEIGHT, normalize_weight};
