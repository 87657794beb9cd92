use crate::command::Command;
use jobcheck::{Config, Error, Result};

/// Refuses to run away from the submit host when `required-host-prefix` is configured.
pub async fn check_host(config: &Config) -> Result<()> {
  let prefix = match &config.required_host_prefix {
    Some(prefix) => prefix,
    None => return Ok(()),
  };

  let hostname = Command::new("hostname").exec().await?;
  ensure_host(&hostname, prefix)
}

fn ensure_host(hostname: &str, prefix: &str) -> Result<()> {
  if hostname.starts_with(prefix) {
    return Ok(());
  }

  Err(Error::environment_error(format!(
    "This command needs to be run on {} (current host: {})",
    prefix, hostname
  )))
}
