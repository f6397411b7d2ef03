// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Log subscriber setup for the command-line binary.
//!
//! Diagnostics are written to stderr, one line per event, so stdout stays
//! reserved for the normalized document.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flag.
pub const LOG_ENV: &str = "TPLGEN_LOG";

/// Maps a `-v` count to a tracing directive.
pub const fn verbosity_to_directive(verbosity: u8,) -> &'static str
{
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// [`LOG_ENV`] takes precedence over `verbosity` when set. Repeated calls
/// are ignored.
pub fn init_logging(verbosity: u8,)
{
    let filter = EnvFilter::try_from_env(LOG_ENV,)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity,),),);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter,)
        .with_target(verbosity >= 2,)
        .with_writer(std::io::stderr,)
        .try_init();
}

#[cfg(test)]
mod tests
{
    use super::{init_logging, verbosity_to_directive};

    #[test]
    fn verbosity_levels_map_to_directives()
    {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(u8::MAX), "trace");
    }

    #[test]
    fn init_logging_is_repeatable()
    {
        init_logging(0,);
        init_logging(3,);
    }
}
