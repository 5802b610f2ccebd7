//! Per-run logging setup.
//!
//! Each command builds its own subscriber and installs it for the current thread only. The
//! returned [`LogSession`] keeps it installed; dropping the session restores whatever was there
//! before.

use std::path::Path;

use tracing::subscriber::DefaultGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use super::*;

/// Keeps a run's subscriber installed while alive.
#[must_use = "logging stops when the session is dropped"]
pub struct LogSession {
  /// Guard restoring the previous default subscriber
  _default: DefaultGuard,
}

/// Maps the `-v` count to a level for this project's crates.
///
/// - 0: info (default)
/// - 1: debug
/// - 2+: trace
pub fn level(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "info",
    1 => "debug",
    _ => "trace",
  }
}

/// Installs a subscriber logging to stderr and, when `log_file` is given, to that file.
///
/// Dependencies only log warnings and errors. The environment is not consulted.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<LogSession> {
  let level = level(verbosity);
  let filter = EnvFilter::new(format!("warn,dailypaper={level},dailypaperd={level}"));

  let file_layer = match log_file {
    Some(path) => {
      let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
      };
      std::fs::create_dir_all(dir)?;
      let file_name = path
        .file_name()
        .ok_or_else(|| DailyPaperdError::Logging(format!("{} is not a file", path.display())))?;
      let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| DailyPaperdError::Logging(e.to_string()))?;
      Some(fmt::layer().with_writer(appender).with_ansi(false).with_target(false))
    },
    None => None,
  };

  let subscriber = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(file_layer);

  Ok(LogSession { _default: tracing::subscriber::set_default(subscriber) })
}
