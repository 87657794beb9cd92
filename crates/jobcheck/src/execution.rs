use crate::WorkflowMetadata;
use std::path::PathBuf;

/// Maps workflow metadata onto the shared filesystem layout
/// `{execution_root}/{workflow_name}/{job_id}/call-{call_name}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPathResolver {
  pub execution_root: PathBuf,
}

impl ExecutionPathResolver {
  pub fn new(execution_root: impl Into<PathBuf>) -> Self {
    ExecutionPathResolver {
      execution_root: execution_root.into(),
    }
  }

  pub fn job_directory(&self, metadata: &WorkflowMetadata, job_id: &str) -> PathBuf {
    self
      .execution_root
      .join(&metadata.workflow_name)
      .join(job_id)
  }

  pub fn call_directory(
    &self,
    metadata: &WorkflowMetadata,
    job_id: &str,
    call_name: &str,
  ) -> PathBuf {
    let call_dir = format!("call-{}", WorkflowMetadata::short_call_name(call_name));

    self.job_directory(metadata, job_id).join(call_dir)
  }
}
