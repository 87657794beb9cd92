use crate::command::Command;
use jobcheck::{Config, Error, MetadataSource, Result, StatusSource, WorkflowMetadata};
use std::time::Duration;

/// Queries the scheduler by running a shell command, `condor_q -long` by default.
pub struct ShellStatusSource {
  command: String,
  timeout: Duration,
}

impl ShellStatusSource {
  pub fn new(config: &Config) -> Result<Self> {
    Ok(ShellStatusSource {
      command: config.scheduler.command.clone(),
      timeout: config.scheduler_timeout()?,
    })
  }
}

#[jobcheck::async_trait]
impl StatusSource for ShellStatusSource {
  async fn query(&self) -> Result<String> {
    log::debug!("Querying scheduler with `{}`", self.command);

    Command::new(self.command.clone())
      .timeout(self.timeout)
      .exec()
      .await
  }
}

/// Fetches `{url}/{job id}/metadata` from the workflow engine.
pub struct HttpMetadataSource {
  url: String,
  client: reqwest::Client,
}

impl HttpMetadataSource {
  pub fn new(config: &Config) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.metadata_timeout()?)
      .build()
      .map_err(|err| Error::environment_error(format!("Failed to create HTTP client: {}", err)))?;

    Ok(HttpMetadataSource {
      url: config.metadata.url.trim_end_matches('/').to_string(),
      client,
    })
  }

  pub fn metadata_url(&self, job_id: &str) -> String {
    format!("{}/{}/metadata", self.url, job_id)
  }
}

#[jobcheck::async_trait]
impl MetadataSource for HttpMetadataSource {
  async fn metadata(&self, job_id: &str) -> Result<WorkflowMetadata> {
    let url = self.metadata_url(job_id);
    log::trace!("Fetching workflow metadata from {}", url);

    let response = self
      .client
      .get(&url)
      .send()
      .await
      .and_then(|response| response.error_for_status())
      .map_err(|err| {
        Error::environment_error(format!("Failed to fetch metadata of {}: {}", job_id, err))
      })?;

    let body = response.text().await.map_err(|err| {
      Error::environment_error(format!("Failed to read metadata of {}: {}", job_id, err))
    })?;

    WorkflowMetadata::try_from(body.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_metadata_url() {
    let config = Config::try_from("metadata:\n  url: http://cromwell:8000/api/workflows/v1/\n")
      .unwrap();
    let source = HttpMetadataSource::new(&config).unwrap();

    assert_eq!(
      source.metadata_url("0f1e2d3c"),
      "http://cromwell:8000/api/workflows/v1/0f1e2d3c/metadata"
    );
  }

  #[jobcheck_test::test]
  async fn test_shell_status_source() {
    let config = Config::try_from("scheduler:\n  command: printf 'ClusterId = 1\\nJobStatus = 2\\n'\n")
      .unwrap();
    let source = ShellStatusSource::new(&config).unwrap();

    assert_eq!(source.query().await.unwrap(), "ClusterId = 1\nJobStatus = 2");
  }

  #[jobcheck_test::test]
  async fn test_unreachable_metadata() {
    let config = Config::try_from("metadata:\n  url: http://127.0.0.1:9/api\n  timeout: 2s\n")
      .unwrap();
    let source = HttpMetadataSource::new(&config).unwrap();

    let res = source.metadata("job").await;

    assert!(matches!(res, Err(Error::EnvironmentError(_))));
  }

  #[jobcheck_test::test(condor)]
  async fn test_condor_queue() {
    let source = ShellStatusSource::new(&Config::default()).unwrap();

    let text = source.query().await.unwrap();
    let sections =
      jobcheck::parse_status_text(&text, &Config::default().status_codes).unwrap();

    for section in sections {
      assert!(section.job_status().is_some());
    }
  }
}
