use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const UNKNOWN_STATUS: &str = "Unknown";
pub const COMPLETED_STATUS: &str = "Completed";

/// Translates the numeric `JobStatus` codes reported by the scheduler into names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct StatusCodes(HashMap<String, String>);

impl StatusCodes {
  pub fn new(codes: HashMap<String, String>) -> Self {
    StatusCodes(codes)
  }

  pub fn name(&self, code: &str) -> Result<&str> {
    self
      .0
      .get(code)
      .map(|name| name.as_str())
      .ok_or_else(|| Error::unknown_status_code(code))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl Default for StatusCodes {
  fn default() -> Self {
    let codes = [
      ("0", "Unexpanded"),
      ("1", "Idle"),
      ("2", "Running"),
      ("3", "Removed"),
      ("4", "Completed"),
      ("5", "Held"),
      ("6", "Submission_err"),
    ];

    StatusCodes(
      codes
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect(),
    )
  }
}

/// One job block of the scheduler's `key = value` dump.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StatusSection {
  fields: BTreeMap<String, String>,
}

impl StatusSection {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.fields.insert(key.into(), value.into());
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.fields.get(key).map(|v| v.as_str())
  }

  /// Command line the scheduler launched, used to recover the workflow job id.
  pub fn cmd(&self) -> Option<&str> {
    self.get("Cmd")
  }

  /// Status name, already translated through the status code table.
  pub fn job_status(&self) -> Option<&str> {
    self.get("JobStatus")
  }

  pub fn fields(&self) -> impl Iterator<Item = (&String, &String)> {
    self.fields.iter()
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StatusSection {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut section = StatusSection::new();
    for (key, value) in iter {
      section.insert(key, value);
    }
    section
  }
}

/// Where the workflow job id sits inside a section's `Cmd` value.
///
/// The default matches the cluster layout
/// `/cluster_share/cromwell-executions/<workflow>/<job id>/call-<name>/execution/script`,
/// i.e. the 5th `/`-delimited component.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct JobIdRule {
  pub delimiter: String,
  pub segment: usize,
}

impl Default for JobIdRule {
  fn default() -> Self {
    JobIdRule {
      delimiter: "/".to_string(),
      segment: 4,
    }
  }
}

impl JobIdRule {
  pub fn extract<'a>(&self, cmd: &'a str) -> Option<&'a str> {
    cmd
      .split(self.delimiter.as_str())
      .nth(self.segment)
      .filter(|id| !id.is_empty())
  }
}
