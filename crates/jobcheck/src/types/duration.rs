use chrono::Duration;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Execution time of a call, derived from its event log.
#[derive(Debug, Clone, PartialEq)]
pub enum CallDuration {
  /// No `ExecuteEvent` yet: the job is still queued or never dispatched.
  NotStarted,
  /// Executing; time elapsed since the last `ExecuteEvent`.
  Running(Duration),
  /// Time between the last `ExecuteEvent` and the last `JobTerminatedEvent`.
  Finished(Duration),
  /// The event log artifact does not exist.
  NoEventLog,
}

impl CallDuration {
  pub fn elapsed(&self) -> Option<Duration> {
    match self {
      CallDuration::Running(elapsed) | CallDuration::Finished(elapsed) => Some(*elapsed),
      CallDuration::NotStarted | CallDuration::NoEventLog => None,
    }
  }

  pub fn is_running(&self) -> bool {
    matches!(self, CallDuration::Running(_))
  }

  /// Fractional days with one decimal for a finished call, otherwise the display text.
  pub fn days(&self) -> String {
    match self {
      CallDuration::Finished(elapsed) => {
        format!("{:.1} days", elapsed.num_seconds() as f64 / SECONDS_PER_DAY)
      }
      _ => self.to_string(),
    }
  }
}

impl std::fmt::Display for CallDuration {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CallDuration::NotStarted => write!(f, "Not started"),
      CallDuration::NoEventLog => write!(f, "No event log"),
      CallDuration::Running(elapsed) => write!(f, "Still running ({})", format_elapsed(elapsed)),
      CallDuration::Finished(elapsed) => write!(f, "{}", format_elapsed(elapsed)),
    }
  }
}

/// Renders `1 day, 2:03:04` / `0:05:00` style durations.
pub fn format_elapsed(elapsed: &Duration) -> String {
  let sign = if *elapsed < Duration::zero() { "-" } else { "" };
  let total = elapsed.num_seconds().abs();

  let days = total / 86_400;
  let hours = (total % 86_400) / 3_600;
  let minutes = (total % 3_600) / 60;
  let seconds = total % 60;

  let clock = format!("{}:{:02}:{:02}", hours, minutes, seconds);
  match days {
    0 => format!("{}{}", sign, clock),
    1 => format!("{}1 day, {}", sign, clock),
    _ => format!("{}{} days, {}", sign, days, clock),
  }
}
