use super::*;

pub mod daily;
pub mod pull;
pub mod summarize;

pub use daily::daily;
pub use pull::{pull, PullOptions};
pub use summarize::{summarize, SummarizeOptions};

/// Available commands for the CLI
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
  /// Download the listed papers for every date in a range
  Pull(PullOptions),

  /// Write markdown summaries for downloaded papers within a date range
  Summarize(SummarizeOptions),

  /// Pull and summarize yesterday's and today's papers into ./papers and ./summaries
  Daily,
}

impl Commands {
  /// The log file this command writes to, if any.
  pub fn log_file(&self) -> Option<PathBuf> {
    match self {
      Commands::Pull(options) => options.log_file.clone(),
      Commands::Summarize(options) => options.log_file.clone(),
      Commands::Daily => Some(PathBuf::from(daily::LOG_FILE)),
    }
  }
}
