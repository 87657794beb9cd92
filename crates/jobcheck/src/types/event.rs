use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const EXECUTE_EVENT: &str = "ExecuteEvent";
pub const JOB_TERMINATED_EVENT: &str = "JobTerminatedEvent";

/// Format of `EventTime` attributes.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EventValue {
  Integer(i64),
  Real(f64),
  Boolean(bool),
  String(String),
}

impl EventValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      EventValue::String(s) => Some(s),
      _ => None,
    }
  }
}

impl std::fmt::Display for EventValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EventValue::Integer(i) => write!(f, "{}", i),
      EventValue::Real(r) => write!(f, "{}", r),
      EventValue::Boolean(b) => write!(f, "{}", b),
      EventValue::String(s) => write!(f, "{}", s),
    }
  }
}

impl From<&str> for EventValue {
  fn from(s: &str) -> Self {
    EventValue::String(s.to_string())
  }
}

impl From<i64> for EventValue {
  fn from(i: i64) -> Self {
    EventValue::Integer(i)
  }
}

impl From<f64> for EventValue {
  fn from(r: f64) -> Self {
    EventValue::Real(r)
  }
}

impl From<bool> for EventValue {
  fn from(b: bool) -> Self {
    EventValue::Boolean(b)
  }
}

/// One lifecycle event of a scheduler job log.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct EventRecord {
  pub attributes: HashMap<String, EventValue>,
}

impl EventRecord {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: impl Into<String>, value: EventValue) {
    self.attributes.insert(name.into(), value);
  }

  pub fn get(&self, name: &str) -> Option<&EventValue> {
    self.attributes.get(name)
  }

  /// The `MyType` discriminator, e.g. `ExecuteEvent`.
  pub fn my_type(&self) -> Option<&str> {
    self.get("MyType").and_then(|v| v.as_str())
  }

  pub fn event_time(&self) -> Option<&str> {
    self.get("EventTime").and_then(|v| v.as_str())
  }
}
