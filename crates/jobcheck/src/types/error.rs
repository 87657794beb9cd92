use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("Failed to parse config: {0}")]
  ConfigError(String),

  #[error("Malformed input: {0}")]
  FormatError(String),

  #[error("Unknown scheduler status code: {0}")]
  UnknownStatusCode(String),

  #[error("Unknown attribute type encountered while parsing event log: {0}")]
  UnknownAttributeType(String),

  #[error("Unknown query key: {0}")]
  UnknownQueryKey(String),

  #[error("Artifact not found: {}", .0.display())]
  ArtifactNotFound(PathBuf),

  #[error("Environment error: {0}")]
  EnvironmentError(String),

  #[error("IO error: {0}")]
  IOError(#[from] std::io::Error),
}

impl Error {
  pub fn config_error<T: ToString>(message: T) -> Self {
    Self::ConfigError(message.to_string())
  }

  pub fn format_error<T: ToString>(message: T) -> Self {
    Self::FormatError(message.to_string())
  }

  pub fn unknown_status_code<T: ToString>(code: T) -> Self {
    Self::UnknownStatusCode(code.to_string())
  }

  pub fn unknown_attribute_type<T: ToString>(tag: T) -> Self {
    Self::UnknownAttributeType(tag.to_string())
  }

  pub fn unknown_query_key<T: ToString>(key: T) -> Self {
    Self::UnknownQueryKey(key.to_string())
  }

  pub fn artifact_not_found(path: impl AsRef<Path>) -> Self {
    Self::ArtifactNotFound(path.as_ref().to_path_buf())
  }

  pub fn environment_error<T: ToString>(message: T) -> Self {
    Self::EnvironmentError(message.to_string())
  }

  pub fn io_error(source: std::io::Error) -> Self {
    Self::IOError(source)
  }

  /// Maps a failed read of `path`, turning a missing file into `ArtifactNotFound`.
  pub fn from_read(source: std::io::Error, path: impl AsRef<Path>) -> Self {
    if source.kind() == std::io::ErrorKind::NotFound {
      Self::artifact_not_found(path)
    } else {
      Self::IOError(source)
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::ArtifactNotFound(_))
  }
}

// implement PartialEq for Error so that we can compare errors in tests
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
      (Self::FormatError(a), Self::FormatError(b)) => a == b,
      (Self::UnknownStatusCode(a), Self::UnknownStatusCode(b)) => a == b,
      (Self::UnknownAttributeType(a), Self::UnknownAttributeType(b)) => a == b,
      (Self::UnknownQueryKey(a), Self::UnknownQueryKey(b)) => a == b,
      (Self::ArtifactNotFound(a), Self::ArtifactNotFound(b)) => a == b,
      (Self::EnvironmentError(a), Self::EnvironmentError(b)) => a == b,
      (Self::IOError(a), Self::IOError(b)) => a.kind() == b.kind(),
      _ => false,
    }
  }
}
