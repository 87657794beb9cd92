mod args;
mod command;
mod host;
mod sources;

use anyhow::Context;
use args::Args;
use clap::Parser;
use jobcheck::{Config, Inventory, JobConfigs, Report, StatusSummary};
use sources::{HttpMetadataSource, ShellStatusSource};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
  dotenv::dotenv().ok();

  let args = Args::parse();

  if let Err(err) = run(args).await {
    log::error!("{:#}", err);
    eprintln!("Error: {:#}", err);
    std::process::exit(1);
  }
}

async fn run(args: Args) -> anyhow::Result<()> {
  let config = match args.config_path() {
    Some(path) => Config::from_file(&path)?,
    None => Config::default(),
  };

  let level = if args.verbose {
    log::LevelFilter::Debug
  } else {
    config.log_level()?
  };
  jobcheck_logger::init_logger_with_filter(level);

  // Reject unknown keys before touching the cluster
  let report = Report::new(&args.query)?.only_finished(args.only_finished);

  host::check_host(&config).await?;

  let paths = expand_job_paths(&args.jobs)?;
  let job_configs = JobConfigs::load(&paths).context("Failed to load job configs")?;

  let inventory = Inventory::builder()
    .config(&config)
    .status_source(ShellStatusSource::new(&config)?)
    .metadata_source(HttpMetadataSource::new(&config)?)
    .build()?;

  let calls = inventory.collect(&job_configs.job_ids()).await?;
  log::debug!("Reporting on {} calls", calls.len());

  let table = report.run(&calls)?;
  if !table.is_empty() {
    println!("{}", table);
  }

  if args.status_count {
    println!("{}", StatusSummary::from_calls(&calls));
  }

  Ok(())
}

/// Expands glob patterns; a pattern without matches is kept as a literal path.
fn expand_job_paths(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
  let mut paths = Vec::new();

  for pattern in patterns {
    let matches = glob::glob(pattern)
      .with_context(|| format!("Invalid job config pattern `{}`", pattern))?
      .collect::<Result<Vec<_>, _>>()?;

    if matches.is_empty() {
      paths.push(PathBuf::from(pattern));
    } else {
      paths.extend(matches);
    }
  }

  Ok(paths)
}
