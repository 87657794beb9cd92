use crate::{Error, ExecutionPathResolver, JobIdRule, Result, StatusCodes};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr, time::Duration};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
  /// Shell command printing the queue in `KEY = VALUE` form
  pub command: String,
  pub timeout: String,
}

impl Default for SchedulerConfig {
  fn default() -> Self {
    SchedulerConfig {
      command: "condor_q -long".to_string(),
      timeout: "60s".to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MetadataConfig {
  /// Base url; `/{job id}/metadata` is appended per job
  pub url: String,
  pub timeout: String,
}

impl Default for MetadataConfig {
  fn default() -> Self {
    MetadataConfig {
      url: "http://localhost:8000/api/workflows/v1".to_string(),
      timeout: "30s".to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
  #[serde(rename = "execution-root")]
  pub execution_root: PathBuf,
  #[serde(rename = "status-codes")]
  pub status_codes: StatusCodes,
  #[serde(rename = "job-id-rule")]
  pub job_id_rule: JobIdRule,
  /// When set, refuse to run on hosts whose name does not start with this prefix
  #[serde(rename = "required-host-prefix")]
  pub required_host_prefix: Option<String>,
  pub scheduler: SchedulerConfig,
  pub metadata: MetadataConfig,
  #[serde(rename = "log-level")]
  pub log_level: String,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      execution_root: PathBuf::from("/cluster_share/cromwell-executions"),
      status_codes: StatusCodes::default(),
      job_id_rule: JobIdRule::default(),
      required_host_prefix: None,
      scheduler: SchedulerConfig::default(),
      metadata: MetadataConfig::default(),
      log_level: "warn".to_string(),
    }
  }
}

impl Config {
  pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let content = std::fs::read_to_string(&path).map_err(|err| {
      Error::config_error(format!(
        "Failed to read config file {}: {}",
        path.display(),
        err
      ))
    })?;

    Self::try_from(content.as_str())
  }

  pub fn resolver(&self) -> ExecutionPathResolver {
    ExecutionPathResolver::new(self.execution_root.clone())
  }

  pub fn scheduler_timeout(&self) -> Result<Duration> {
    parse_timeout("scheduler.timeout", &self.scheduler.timeout)
  }

  pub fn metadata_timeout(&self) -> Result<Duration> {
    parse_timeout("metadata.timeout", &self.metadata.timeout)
  }

  pub fn log_level(&self) -> Result<log::LevelFilter> {
    log::LevelFilter::from_str(&self.log_level)
      .map_err(|_| Error::config_error(format!("Invalid log level `{}`", self.log_level)))
  }

  fn validate(config: &Config) -> Result<()> {
    if config.status_codes.is_empty() {
      return Err(Error::config_error("status-codes must not be empty"));
    }

    if config.job_id_rule.delimiter.is_empty() {
      return Err(Error::config_error("job-id-rule.delimiter must not be empty"));
    }

    if config.scheduler.command.trim().is_empty() {
      return Err(Error::config_error("scheduler.command must not be empty"));
    }

    if config.metadata.url.trim().is_empty() {
      return Err(Error::config_error("metadata.url must not be empty"));
    }

    config.scheduler_timeout()?;
    config.metadata_timeout()?;
    config.log_level()?;

    Ok(())
  }
}

fn parse_timeout(name: &str, value: &str) -> Result<Duration> {
  humantime::parse_duration(value).map_err(|err| {
    log::error!("Invalid {} `{}`: {}", name, value, err);
    Error::config_error(format!(
      "Invalid {}. The format should like `30s` or `2m`.",
      name
    ))
  })
}

impl TryFrom<&str> for Config {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self> {
    let config = if value.trim().is_empty() {
      Config::default()
    } else {
      serde_yaml::from_str(value)
        .map_err(|e| Error::config_error(format!("Failed to parse config: {}", e)))?
    };

    Self::validate(&config)?;

    Ok(config)
  }
}
