use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The parts of the workflow engine's per-job metadata document that jobcheck reads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WorkflowMetadata {
  #[serde(rename = "workflowName")]
  pub workflow_name: String,
  #[serde(default)]
  pub calls: BTreeMap<String, serde_json::Value>,
}

impl WorkflowMetadata {
  pub fn call_names(&self) -> impl Iterator<Item = &String> {
    self.calls.keys()
  }

  /// `Sanger_Workflow.run_pipeline` -> `run_pipeline`
  pub fn short_call_name(call_name: &str) -> &str {
    call_name.rsplit('.').next().unwrap_or(call_name)
  }
}

impl TryFrom<&str> for WorkflowMetadata {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self> {
    serde_json::from_str(value)
      .map_err(|e| Error::format_error(format!("Failed to parse workflow metadata: {}", e)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse() {
    let json = r#"{
      "id": "0f1e2d3c",
      "workflowName": "Sanger_Workflow",
      "status": "Running",
      "calls": {
        "Sanger_Workflow.run_pipeline": [{ "executionStatus": "Running" }],
        "Sanger_Workflow.prepare": []
      }
    }"#;

    let metadata = WorkflowMetadata::try_from(json).unwrap();

    assert_eq!(metadata.workflow_name, "Sanger_Workflow");
    let names: Vec<&String> = metadata.call_names().collect();
    assert_eq!(
      names,
      vec!["Sanger_Workflow.prepare", "Sanger_Workflow.run_pipeline"]
    );
  }

  #[test]
  fn test_missing_calls() {
    let metadata = WorkflowMetadata::try_from(r#"{ "workflowName": "wf" }"#).unwrap();

    assert_eq!(metadata.call_names().count(), 0);
  }

  #[test]
  fn test_missing_workflow_name() {
    let res = WorkflowMetadata::try_from(r#"{ "calls": {} }"#);

    assert!(matches!(res, Err(Error::FormatError(_))));
  }

  #[test]
  fn test_short_call_name() {
    assert_eq!(
      WorkflowMetadata::short_call_name("Sanger_Workflow.run_pipeline"),
      "run_pipeline"
    );
    assert_eq!(WorkflowMetadata::short_call_name("plain"), "plain");
  }
}
