//! Logging configuration for chessdesk.
//!
//! Diagnostics go to stderr through tracing, keeping stdout for the dialog
//! text the user reads.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target every chessdesk log line is filed under.
const LOG_TARGET: &str = "chessdesk";

/// How much diagnostic detail reaches stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// `-q`: only failures such as an unwritable record file.
    Quiet,
    /// No flag: failures plus records that were not saved or logins that
    /// could not be checked.
    #[default]
    Normal,
    /// `-v`: also saved records, sign-ins and rejected forms.
    Verbose,
    /// `-vv`: also every record file access and screen change.
    Debug,
    /// `-vvv` and beyond.
    Trace,
}

impl Verbosity {
    /// Most detailed tracing level shown at this verbosity.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("{LOG_TARGET}={}", self.to_level_filter())
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` replaces the verbosity-derived filter when it is set. Calling
/// this more than once keeps the first subscriber.
///
/// # Examples
///
/// ```no_run
/// use chessdesk::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}
