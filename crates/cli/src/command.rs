use jobcheck::{Error, Result};
use std::time::Duration;
use tokio::process::Command as Cmd;

/// A shell command whose output is captured in one go.
pub struct Command {
  line: String,
  command: Cmd,
  timeout: Option<Duration>,
}

impl Command {
  pub fn new(cmd: impl Into<String>) -> Self {
    let line: String = cmd.into();
    let mut command = Cmd::new("sh");

    command.arg("-c").arg(&line).kill_on_drop(true);

    Command {
      line,
      command,
      timeout: None,
    }
  }

  /// Kill the command and fail when it runs longer than `timeout`.
  pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
    self.timeout = Some(timeout);

    self
  }

  /// Runs the command and returns its trimmed stdout.
  pub async fn exec(&mut self) -> Result<String> {
    let output = self.command.output();

    let output = match self.timeout {
      Some(timeout) => tokio::time::timeout(timeout, output).await.map_err(|_| {
        Error::environment_error(format!(
          "`{}` did not finish within {}",
          self.line,
          humantime::format_duration(timeout)
        ))
      })?,
      None => output.await,
    };

    let output = output.map_err(|err| {
      Error::environment_error(format!("Failed to spawn `{}`: {}", self.line, err))
    })?;

    if output.status.success() {
      let stdout = String::from_utf8(output.stdout).map_err(|err| {
        Error::environment_error(format!("Failed to parse stdout of `{}`: {}", self.line, err))
      })?;
      return Ok(stdout.trim().to_string());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    log::error!("`{}` exited with {}", self.line, output.status);

    Err(Error::environment_error(format!(
      "`{}` failed: {}",
      self.line,
      stderr.trim()
    )))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[jobcheck_test::test]
  async fn test_exec() {
    let stdout = Command::new("echo '  Hello World  '").exec().await.unwrap();

    assert_eq!(stdout, "Hello World");
  }

  #[jobcheck_test::test]
  async fn test_failure() {
    let res = Command::new("echo broken >&2; exit 3").exec().await;

    assert_eq!(
      res.unwrap_err(),
      Error::environment_error("`echo broken >&2; exit 3` failed: broken")
    );
  }

  #[jobcheck_test::test]
  async fn test_timeout() {
    let res = Command::new("sleep 5")
      .timeout(Duration::from_millis(100))
      .exec()
      .await;

    assert_eq!(
      res.unwrap_err(),
      Error::environment_error("`sleep 5` did not finish within 100ms")
    );
  }
}
