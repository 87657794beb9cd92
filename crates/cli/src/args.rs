use clap::Parser;
use std::path::PathBuf;

/// Report the state of every call in a batch of Cromwell workflows running on HTCondor.
#[derive(Parser, Debug)]
#[command(name = "jobcheck", version)]
#[command(about = "Per-call status reports for Cromwell workflows on HTCondor", long_about = None)]
pub struct Args {
  /// Fields to print for each call (e.g. id status rc days sep)
  #[arg(long, num_args = 1.., required = true)]
  pub query: Vec<String>,

  /// Batch submission files (or glob patterns) listing the jobs under `multipleInputs`
  #[arg(long, num_args = 1.., required = true)]
  pub jobs: Vec<String>,

  /// Print the number of calls per scheduler status after the report
  #[arg(long)]
  pub status_count: bool,

  /// Only report calls the scheduler lists as Completed
  #[arg(long)]
  pub only_finished: bool,

  /// YAML config file (defaults to $JOBCHECK_CONFIG)
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Log debug output to stderr
  #[arg(short, long)]
  pub verbose: bool,
}

impl Args {
  pub fn config_path(&self) -> Option<PathBuf> {
    self
      .config
      .clone()
      .or_else(|| std::env::var_os("JOBCHECK_CONFIG").map(PathBuf::from))
  }
}
