use colored::Colorize;
use log::{Level, LevelFilter};
use std::sync::OnceLock;

/// Writes colored log lines to stderr, keeping stdout free for reports.
#[derive(Clone)]
pub struct Logger;

impl log::Log for Logger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &log::Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let time = chrono::Local::now()
      .format("%Y-%m-%d %H:%M:%S")
      .to_string()
      .magenta();

    let level = match record.level() {
      Level::Error => "ERROR".red(),
      Level::Warn => "WARN".yellow(),
      Level::Info => "INFO".green(),
      Level::Debug => "DEBUG".green(),
      Level::Trace => "TRACE".green(),
    };

    let prefix = match (record.file(), record.line()) {
      (Some(file), Some(line)) => format!("{}:{} ", file, line).cyan(),
      _ => String::new().black(),
    };

    eprintln!("{}{} {} {}", prefix, time, level, record.args());
  }

  fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger() {
  init_logger_with_filter(LevelFilter::Warn);
}

pub fn init_logger_with_level(level: Level) {
  init_logger_with_filter(level.to_level_filter());
}

/// Installs the logger once; later calls only adjust the maximum level.
pub fn init_logger_with_filter(level: LevelFilter) {
  if LOGGER.get().is_none() {
    let logger = LOGGER.get_or_init(|| Logger);

    if log::set_logger(logger).is_err() {
      return;
    }
  }

  log::set_max_level(level);
}
