//! Logging setup
//!
//! Installs a `tracing` subscriber for the binary. `RUST_LOG` takes
//! precedence over the verbosity chosen on the command line.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above, including per-request traces.
    Verbose,
}

impl Verbosity {
    /// Pick a verbosity from the `--quiet` / `--verbose` flags
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
        }
    }

    fn default_filter(&self) -> String {
        let level = self.to_level();
        format!("aero_dashboard={level},tower_http={level}")
    }
}

/// Initialize the logging system.
///
/// Logs go to stderr so `--summary` output on stdout stays clean.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    // Ignore the error if a subscriber is already installed
    let _ = subscriber.try_init();
}
