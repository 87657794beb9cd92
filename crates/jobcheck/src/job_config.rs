use crate::{Error, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

#[derive(Deserialize)]
struct BatchFile {
  #[serde(rename = "multipleInputs")]
  multiple_inputs: BTreeMap<String, serde_json::Value>,
}

/// Jobs of the current batch, merged from one or more submission files.
///
/// Each file maps workflow job ids to their input configuration under `multipleInputs`.
/// Later files override earlier ones for the same job id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobConfigs {
  inputs: BTreeMap<String, serde_json::Value>,
}

impl JobConfigs {
  pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
    let mut configs = JobConfigs::default();

    for path in paths {
      let path = path.as_ref();
      let content = std::fs::read_to_string(path).map_err(|err| Error::from_read(err, path))?;
      configs.merge_str(&content).map_err(|err| {
        Error::format_error(format!("Invalid job config {}: {}", path.display(), err))
      })?;
    }

    log::debug!("Loaded {} jobs", configs.len());

    Ok(configs)
  }

  fn merge_str(&mut self, content: &str) -> std::result::Result<(), serde_json::Error> {
    let batch: BatchFile = serde_json::from_str(content)?;
    self.inputs.extend(batch.multiple_inputs);
    Ok(())
  }

  pub fn job_ids(&self) -> Vec<String> {
    self.inputs.keys().cloned().collect()
  }

  pub fn len(&self) -> usize {
    self.inputs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inputs.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{io::Write, path::PathBuf};

  fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
  }

  #[test]
  fn test_merge_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(
      dir.path(),
      "batch-1.json",
      r#"{ "multipleInputs": { "job-b": "/configs/b.json", "job-a": "/configs/a.json" } }"#,
    );
    let second = write_file(
      dir.path(),
      "batch-2.json",
      r#"{ "multipleInputs": { "job-c": "/configs/c.json", "job-a": "/configs/a2.json" } }"#,
    );

    let configs = JobConfigs::load(&[first, second]).unwrap();

    assert_eq!(configs.job_ids(), vec!["job-a", "job-b", "job-c"]);
    assert_eq!(configs.len(), 3);
    assert!(!configs.is_empty());
  }

  #[test]
  fn test_missing_multiple_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "batch.json", r#"{ "inputs": {} }"#);

    let res = JobConfigs::load(&[path]);

    assert!(matches!(res, Err(Error::FormatError(_))));
  }

  #[test]
  fn test_missing_file() {
    let res = JobConfigs::load(&["/nonexistent/batch.json"]);

    assert_eq!(
      res.unwrap_err(),
      Error::artifact_not_found("/nonexistent/batch.json")
    );
  }
}
