//! Tracing setup for the `zennotes` binary.
//!
//! Log lines go to stderr so stdout stays clean for command output such as
//! `export --stdout`. They carry note ids and counts, never titles or bodies.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty the binary is, picked with `-q`, `-v` and `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Informational messages such as load and import counts.
    #[default]
    Normal,
    /// Every store mutation and persistence write.
    Verbose,
    /// Everything, including search filtering.
    Trace,
}

impl Verbosity {
    /// Filter directive applied when `RUST_LOG` is not set.
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "zennotes=error",
            Self::Normal => "zennotes=info",
            Self::Verbose => "zennotes=debug",
            Self::Trace => "zennotes=trace",
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, replaces the directive derived from `verbosity`.
/// Calling this again after a subscriber is installed does nothing.
///
/// ```no_run
/// use zennotes::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Route warnings from library code through the test harness writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_per_verbosity() {
        assert_eq!(Verbosity::Quiet.directive(), "zennotes=error");
        assert_eq!(Verbosity::Normal.directive(), "zennotes=info");
        assert_eq!(Verbosity::Verbose.directive(), "zennotes=debug");
        assert_eq!(Verbosity::Trace.directive(), "zennotes=trace");
    }

    #[test]
    fn test_directives_parse() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(EnvFilter::try_new(verbosity.directive()).is_ok());
        }
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init_test_logging();
        init_logging(Verbosity::Trace);
        init_logging(Verbosity::Quiet);
    }
}
