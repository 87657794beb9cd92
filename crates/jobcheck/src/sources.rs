use crate::{Result, WorkflowMetadata};

/// Produces the scheduler's raw `KEY = VALUE` queue dump.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
  async fn query(&self) -> Result<String>;
}

/// Looks up workflow engine metadata for one job.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
  async fn metadata(&self, job_id: &str) -> Result<WorkflowMetadata>;
}
