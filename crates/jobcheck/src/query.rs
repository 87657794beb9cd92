use crate::{Call, Error, Result};
use std::str::FromStr;

/// Cells at least this wide are left out of column alignment.
pub const MAX_ALIGNED_WIDTH: usize = 40;

const SEPARATOR_WIDTH: usize = 80;

/// A field that can be requested from a call with `--query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey {
  /// Short job id
  Id,
  /// Short job id plus call name
  Identifier,
  JobId,
  Name,
  Status,
  ReturnCode,
  ReturnCodeTime,
  Path,
  Stdout,
  Stderr,
  StdoutTail,
  StderrTail,
  Time,
  Days,
  SchedulerId,
  SchedulerMeta,
  /// A line of `=` on its own line
  Separator,
  Newline,
}

impl FromStr for QueryKey {
  type Err = Error;

  fn from_str(key: &str) -> Result<Self> {
    let key = match key {
      "id" => QueryKey::Id,
      "full_id" | "identifier" => QueryKey::Identifier,
      "job_id" => QueryKey::JobId,
      "name" => QueryKey::Name,
      "status" => QueryKey::Status,
      "rc" => QueryKey::ReturnCode,
      "rc_time" => QueryKey::ReturnCodeTime,
      "path" => QueryKey::Path,
      "stdout" => QueryKey::Stdout,
      "stderr" => QueryKey::Stderr,
      "stdout_tail" => QueryKey::StdoutTail,
      "stderr_tail" => QueryKey::StderrTail,
      "time" => QueryKey::Time,
      "days" => QueryKey::Days,
      "condor_id" | "scheduler_id" => QueryKey::SchedulerId,
      "condor_meta" | "scheduler_meta" => QueryKey::SchedulerMeta,
      "sep" => QueryKey::Separator,
      "nl" => QueryKey::Newline,
      _ => return Err(Error::unknown_query_key(key)),
    };

    Ok(key)
  }
}

impl QueryKey {
  /// Renders this field of `call` as display text.
  pub fn resolve(&self, call: &Call) -> Result<String> {
    let value = match self {
      QueryKey::Id => call.short_id(),
      QueryKey::Identifier => call.identifier(),
      QueryKey::JobId => call.job_id().to_string(),
      QueryKey::Name => call.name().to_string(),
      QueryKey::Status => call.status().to_string(),
      QueryKey::ReturnCode => call
        .return_code()?
        .map(|rc| rc.to_string())
        .unwrap_or_default(),
      QueryKey::ReturnCodeTime => call.return_code_timestamp()?.unwrap_or_default(),
      QueryKey::Path => call.path().display().to_string(),
      QueryKey::Stdout => call.stdout()?,
      QueryKey::Stderr => call.stderr()?,
      QueryKey::StdoutTail => call.stdout_tail()?,
      QueryKey::StderrTail => call.stderr_tail()?,
      QueryKey::Time => call.duration()?.to_string(),
      QueryKey::Days => call.elapsed_days()?,
      QueryKey::SchedulerId => call.scheduler_id(),
      QueryKey::SchedulerMeta => call.scheduler_meta(),
      QueryKey::Separator => format!("\n{}", "=".repeat(SEPARATOR_WIDTH)),
      QueryKey::Newline => "\n".to_string(),
    };

    Ok(value)
  }
}

/// Parses every key up front so a typo fails before any artifact is read.
pub fn parse_query_keys<S: AsRef<str>>(keys: &[S]) -> Result<Vec<QueryKey>> {
  keys.iter().map(|key| key.as_ref().parse()).collect()
}

pub struct Report {
  keys: Vec<QueryKey>,
  only_finished: bool,
}

impl Report {
  pub fn new<S: AsRef<str>>(keys: &[S]) -> Result<Self> {
    Ok(Report {
      keys: parse_query_keys(keys)?,
      only_finished: false,
    })
  }

  /// Skip calls the scheduler does not report as `Completed`.
  pub fn only_finished(mut self, only_finished: bool) -> Self {
    self.only_finished = only_finished;
    self
  }

  /// Builds the whole table; any failing cell aborts the report.
  pub fn run(&self, calls: &[Call]) -> Result<ReportTable> {
    let mut rows = Vec::new();

    for call in calls {
      if self.only_finished && !call.is_completed() {
        log::trace!("Skipping unfinished call {}", call.identifier());
        continue;
      }

      let row = self
        .keys
        .iter()
        .map(|key| key.resolve(call))
        .collect::<Result<Vec<_>>>()?;

      rows.push(row);
    }

    Ok(ReportTable::new(rows))
  }
}

/// Runs `keys` against `calls` with the default report options.
pub fn run_query<S: AsRef<str>>(keys: &[S], calls: &[Call]) -> Result<ReportTable> {
  Report::new(keys)?.run(calls)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportTable {
  rows: Vec<Vec<String>>,
  widths: Vec<usize>,
}

impl ReportTable {
  pub fn new(rows: Vec<Vec<String>>) -> Self {
    let columns = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0; columns];

    for row in &rows {
      for (i, cell) in row.iter().enumerate() {
        let width = cell.chars().count();
        if width < MAX_ALIGNED_WIDTH && width > widths[i] {
          widths[i] = width;
        }
      }
    }

    ReportTable { rows, widths }
  }

  pub fn rows(&self) -> &[Vec<String>] {
    &self.rows
  }

  pub fn widths(&self) -> &[usize] {
    &self.widths
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

impl std::fmt::Display for ReportTable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let lines = self
      .rows
      .iter()
      .map(|row| {
        row
          .iter()
          .enumerate()
          .map(|(i, cell)| format!("{:<width$}", cell, width = self.widths[i]))
          .collect::<Vec<_>>()
          .join(" ")
      })
      .collect::<Vec<_>>();

    write!(f, "{}", lines.join("\n"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::StatusSection;

  fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
  }

  fn call(job_id: &str, status: Option<&str>) -> Call {
    let info = status.map(|status| {
      vec![("JobStatus", status), ("ClusterId", "77"), ("ProcId", "0")]
        .into_iter()
        .collect::<StatusSection>()
    });

    Call::new(job_id, "wf.task", info, "/nonexistent/jobcheck")
  }

  #[test]
  fn test_table_alignment() {
    let table = ReportTable::new(vec![
      row(&["id1", "Completed"]),
      row(&["id-longer", "Running"]),
    ]);

    assert_eq!(table.widths(), &[9, 9]);
    assert_eq!(table.to_string(), "id1       Completed\nid-longer Running  ");
  }

  #[test]
  fn test_wide_cells_not_aligned() {
    let wide = "x".repeat(45);
    let table = ReportTable::new(vec![row(&[wide.as_str(), "a"]), row(&["short", "bb"])]);

    assert_eq!(table.widths(), &[5, 2]);
    assert_eq!(table.to_string(), format!("{} a \nshort bb", wide));
  }

  #[test]
  fn test_empty_table() {
    let table = ReportTable::new(vec![]);

    assert!(table.is_empty());
    assert_eq!(table.to_string(), "");
  }

  #[test]
  fn test_parse_keys() {
    let keys = parse_query_keys(&["id", "full_id", "condor_meta", "scheduler_id", "nl"]).unwrap();

    assert_eq!(
      keys,
      vec![
        QueryKey::Id,
        QueryKey::Identifier,
        QueryKey::SchedulerMeta,
        QueryKey::SchedulerId,
        QueryKey::Newline,
      ]
    );
  }

  #[test]
  fn test_keys_are_case_sensitive() {
    assert_eq!(
      "Status".parse::<QueryKey>().unwrap_err(),
      Error::unknown_query_key("Status")
    );
  }

  #[test]
  fn test_unknown_key() {
    let calls = vec![call("job-aaaaaaaa", Some("Running"))];

    let res = run_query(&["id", "bogus"], &calls);

    assert_eq!(res.unwrap_err(), Error::unknown_query_key("bogus"));
  }

  #[test]
  fn test_query_rows() {
    let calls = vec![
      call("0f1e2d3c-0000", Some("Running")),
      call("a1b2c3d4-0000", None),
    ];

    let table = run_query(&["id", "status", "condor_id", "rc"], &calls).unwrap();

    assert_eq!(
      table.rows(),
      &[
        row(&["0f1e2d3c", "Running", "77.0", ""]),
        row(&["a1b2c3d4", "Unknown", "", ""]),
      ]
    );
  }

  #[test]
  fn test_pseudo_fields() {
    let calls = vec![call("0f1e2d3c-0000", Some("Idle"))];

    let table = run_query(&["sep", "nl", "id"], &calls).unwrap();
    let separator = format!("\n{}", "=".repeat(80));

    assert_eq!(table.rows()[0], row(&[separator.as_str(), "\n", "0f1e2d3c"]));
  }

  #[test]
  fn test_missing_stdout_aborts_report() {
    let calls = vec![call("0f1e2d3c-0000", Some("Completed"))];

    let res = run_query(&["id", "stdout"], &calls);

    assert!(res.unwrap_err().is_not_found());
  }

  #[test]
  fn test_only_finished() {
    let calls = vec![
      call("aaaaaaaa-1", Some("Running")),
      call("bbbbbbbb-2", Some("Completed")),
      call("cccccccc-3", None),
    ];

    let table = Report::new(&["id"])
      .unwrap()
      .only_finished(true)
      .run(&calls)
      .unwrap();

    assert_eq!(table.rows(), &[row(&["bbbbbbbb"])]);
  }

  #[test]
  fn test_time_without_event_log() {
    let calls = vec![call("aaaaaaaa-1", Some("Idle"))];

    let table = run_query(&["time", "days"], &calls).unwrap();

    assert_eq!(table.rows(), &[row(&["No event log", "No event log"])]);
  }
}
