use crate::{
  status_parser::{index_by_job, parse_status_text},
  Call, Config, Error, ExecutionPathResolver, JobIdRule, MetadataSource, Result, StatusCodes,
  StatusSection, StatusSource,
};
use std::collections::HashMap;

/// Builds the calls of a batch from the scheduler queue and the workflow engine.
pub struct Inventory {
  resolver: ExecutionPathResolver,
  status_codes: StatusCodes,
  job_id_rule: JobIdRule,
  status_source: Box<dyn StatusSource>,
  metadata_source: Box<dyn MetadataSource>,
}

impl Inventory {
  pub fn builder() -> InventoryBuilder {
    InventoryBuilder::new()
  }

  /// Scheduler sections keyed by workflow job id.
  pub async fn scheduler_status(&self) -> Result<HashMap<String, StatusSection>> {
    let text = self.status_source.query().await?;
    let sections = parse_status_text(&text, &self.status_codes)?;

    Ok(index_by_job(sections, &self.job_id_rule))
  }

  /// One call per (job, call) pair, in job order and then call-name order.
  pub async fn collect<S: AsRef<str>>(&self, job_ids: &[S]) -> Result<Vec<Call>> {
    let status = self.scheduler_status().await?;
    log::debug!("Scheduler reports {} workflow jobs", status.len());

    let mut calls = Vec::new();
    for job_id in job_ids {
      let job_id = job_id.as_ref();
      let metadata = self.metadata_source.metadata(job_id).await?;
      let scheduler_info = status.get(job_id);

      if scheduler_info.is_none() {
        log::debug!("Job {} is not in the scheduler queue", job_id);
      }

      let before = calls.len();
      for call_name in metadata.call_names() {
        let directory = self.resolver.call_directory(&metadata, job_id, call_name);
        log::trace!("Call {} of job {} lives in {:?}", call_name, job_id, directory);

        calls.push(Call::new(
          job_id,
          call_name.as_str(),
          scheduler_info.cloned(),
          directory,
        ));
      }

      if calls.len() == before {
        log::warn!("Workflow metadata of job {} has no calls yet", job_id);
      }
    }

    Ok(calls)
  }
}

pub struct InventoryBuilder {
  resolver: Option<ExecutionPathResolver>,
  status_codes: StatusCodes,
  job_id_rule: JobIdRule,
  status_source: Option<Box<dyn StatusSource>>,
  metadata_source: Option<Box<dyn MetadataSource>>,
}

impl InventoryBuilder {
  pub fn new() -> Self {
    InventoryBuilder {
      resolver: None,
      status_codes: StatusCodes::default(),
      job_id_rule: JobIdRule::default(),
      status_source: None,
      metadata_source: None,
    }
  }

  /// Takes the execution root, status codes and job id rule from `config`.
  pub fn config(mut self, config: &Config) -> Self {
    self.resolver = Some(config.resolver());
    self.status_codes = config.status_codes.clone();
    self.job_id_rule = config.job_id_rule.clone();
    self
  }

  pub fn resolver(mut self, resolver: ExecutionPathResolver) -> Self {
    self.resolver = Some(resolver);
    self
  }

  pub fn status_source(mut self, source: impl StatusSource + 'static) -> Self {
    self.status_source = Some(Box::new(source));
    self
  }

  pub fn metadata_source(mut self, source: impl MetadataSource + 'static) -> Self {
    self.metadata_source = Some(Box::new(source));
    self
  }

  pub fn build(self) -> Result<Inventory> {
    let resolver = self
      .resolver
      .unwrap_or_else(|| Config::default().resolver());
    let status_source = self
      .status_source
      .ok_or_else(|| Error::config_error("Inventory requires a status source"))?;
    let metadata_source = self
      .metadata_source
      .ok_or_else(|| Error::config_error("Inventory requires a metadata source"))?;

    Ok(Inventory {
      resolver,
      status_codes: self.status_codes,
      job_id_rule: self.job_id_rule,
      status_source,
      metadata_source,
    })
  }
}

impl Default for InventoryBuilder {
  fn default() -> Self {
    Self::new()
  }
}
