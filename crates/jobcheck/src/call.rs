use crate::{
  event_log::parse_event_log, utils, CallDuration, Error, EventRecord, Result, StatusSection,
  WorkflowMetadata, COMPLETED_STATUS, EVENT_TIME_FORMAT, EXECUTE_EVENT, JOB_TERMINATED_EVENT,
  UNKNOWN_STATUS,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
  fs,
  path::{Path, PathBuf},
};

const RC_FILE: &str = "rc";
const STDOUT_FILE: &str = "stdout";
const STDERR_FILE: &str = "stderr";
/// Rendering of the `rc` modification time.
pub const RC_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";
const SHORT_ID_LEN: usize = 8;

/// One workflow call, as seen by the scheduler, the workflow engine and the filesystem.
///
/// A call holds no derived state. Every accessor goes back to its source, so asking twice
/// reads the artifact twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
  job_id: String,
  name: String,
  scheduler_info: Option<StatusSection>,
  execution_directory: PathBuf,
}

impl Call {
  pub fn new(
    job_id: impl Into<String>,
    name: impl Into<String>,
    scheduler_info: Option<StatusSection>,
    execution_directory: impl Into<PathBuf>,
  ) -> Self {
    Call {
      job_id: job_id.into(),
      name: name.into(),
      scheduler_info,
      execution_directory: execution_directory.into(),
    }
  }

  pub fn job_id(&self) -> &str {
    &self.job_id
  }

  /// Fully qualified call name as reported by the workflow engine.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn short_name(&self) -> &str {
    WorkflowMetadata::short_call_name(&self.name)
  }

  pub fn short_id(&self) -> String {
    self.job_id.chars().take(SHORT_ID_LEN).collect()
  }

  pub fn identifier(&self) -> String {
    format!("{}:{}", self.short_id(), self.short_name())
  }

  pub fn status(&self) -> &str {
    self
      .scheduler_info
      .as_ref()
      .and_then(|info| info.job_status())
      .unwrap_or(UNKNOWN_STATUS)
  }

  pub fn is_completed(&self) -> bool {
    self.status() == COMPLETED_STATUS
  }

  pub fn path(&self) -> &Path {
    &self.execution_directory
  }

  pub fn artifact(&self, file_name: &str) -> PathBuf {
    self.execution_directory.join(file_name)
  }

  /// Exit code from the `rc` artifact. `None` means the call has not finished.
  pub fn return_code(&self) -> Result<Option<i32>> {
    let rc_path = self.artifact(RC_FILE);

    let content = match fs::read_to_string(&rc_path) {
      Ok(content) => content,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(err) => return Err(Error::io_error(err)),
    };

    let rc = content.trim().parse::<i32>().map_err(|err| {
      Error::format_error(format!(
        "Invalid return code in {}: {:?} ({})",
        rc_path.display(),
        content.trim(),
        err
      ))
    })?;

    Ok(Some(rc))
  }

  /// Modification time of the `rc` artifact in UTC.
  pub fn return_code_timestamp(&self) -> Result<Option<String>> {
    let rc_path = self.artifact(RC_FILE);

    let modified = match fs::metadata(&rc_path) {
      Ok(metadata) => metadata.modified()?,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(err) => return Err(Error::io_error(err)),
    };

    let modified: DateTime<Utc> = modified.into();

    Ok(Some(modified.format(RC_TIME_FORMAT).to_string()))
  }

  pub fn failed(&self) -> Result<bool> {
    Ok(matches!(self.return_code()?, Some(rc) if rc != 0))
  }

  pub fn read_artifact(&self, file_name: &str) -> Result<String> {
    let path = self.artifact(file_name);

    fs::read_to_string(&path).map_err(|err| Error::from_read(err, &path))
  }

  pub fn stdout(&self) -> Result<String> {
    self.read_artifact(STDOUT_FILE)
  }

  pub fn stderr(&self) -> Result<String> {
    self.read_artifact(STDERR_FILE)
  }

  pub fn stdout_tail(&self) -> Result<String> {
    Ok(utils::tail(&self.stdout()?, utils::DEFAULT_TAIL_LINES))
  }

  pub fn stderr_tail(&self) -> Result<String> {
    Ok(utils::tail(&self.stderr()?, utils::DEFAULT_TAIL_LINES))
  }

  pub fn log_file_name(&self) -> String {
    format!("{}.log", self.short_name())
  }

  pub fn events(&self) -> Result<Vec<EventRecord>> {
    let content = self.read_artifact(&self.log_file_name())?;

    parse_event_log(&content)
  }

  pub fn duration(&self) -> Result<CallDuration> {
    self.duration_at(chrono::Local::now().naive_local())
  }

  /// Like [`Call::duration`], measuring running calls against `now`.
  pub fn duration_at(&self, now: NaiveDateTime) -> Result<CallDuration> {
    match self.events() {
      Ok(events) => duration_from_events(&events, now),
      Err(err) if err.is_not_found() => {
        log::debug!("No event log for {}", self.identifier());
        Ok(CallDuration::NoEventLog)
      }
      Err(err) => Err(err),
    }
  }

  pub fn elapsed_days(&self) -> Result<String> {
    Ok(self.duration()?.days())
  }

  /// `ClusterId.ProcId` of the scheduler job, empty when the job is not queued.
  pub fn scheduler_id(&self) -> String {
    let info = match &self.scheduler_info {
      Some(info) => info,
      None => return String::new(),
    };

    match (info.get("ClusterId"), info.get("ProcId")) {
      (Some(cluster), Some(proc_id)) => format!("{}.{}", cluster, proc_id),
      (Some(cluster), None) => cluster.to_string(),
      _ => String::new(),
    }
  }

  /// Every scheduler field as `key = value` lines.
  pub fn scheduler_meta(&self) -> String {
    self
      .scheduler_info
      .iter()
      .flat_map(|info| info.fields())
      .map(|(key, value)| format!("{} = {}", key, value))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

/// Derives the execution time from an unordered event list.
///
/// Only the last `ExecuteEvent` and the last `JobTerminatedEvent` count; submission time
/// is queue time and is ignored.
pub fn duration_from_events(events: &[EventRecord], now: NaiveDateTime) -> Result<CallDuration> {
  let mut execute = None;
  let mut terminated = None;

  for event in events {
    match event.my_type() {
      Some(EXECUTE_EVENT) => execute = Some(event),
      Some(JOB_TERMINATED_EVENT) => terminated = Some(event),
      _ => {}
    }
  }

  let execute = match execute {
    Some(execute) => event_time(execute)?,
    None => return Ok(CallDuration::NotStarted),
  };

  match terminated {
    Some(terminated) => Ok(CallDuration::Finished(event_time(terminated)? - execute)),
    None => Ok(CallDuration::Running(now - execute)),
  }
}

fn event_time(event: &EventRecord) -> Result<NaiveDateTime> {
  let my_type = event.my_type().unwrap_or_default();
  let time = event
    .event_time()
    .ok_or_else(|| Error::format_error(format!("{} has no EventTime", my_type)))?;

  NaiveDateTime::parse_from_str(time, EVENT_TIME_FORMAT).map_err(|err| {
    Error::format_error(format!(
      "Invalid EventTime {:?} in {}: {}",
      time, my_type, err
    ))
  })
}
