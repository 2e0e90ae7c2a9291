//! Error types for the baseguard client layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guard::Denial;

/// Failure reported by the remote client.
///
/// The wrapper never inspects or rebuilds this value; whatever the collaborator
/// returned is handed back to the caller inside [`Error::Remote`].
#[derive(Error, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[error("Remote error ({status}): {message}")]
pub struct RemoteError {
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub status: u16,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub data: serde_json::Value,
  #[serde(default, rename = "isAbort")]
  pub is_abort: bool,
}

impl RemoteError {
  pub fn new(status: u16, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
      ..Default::default()
    }
  }

  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.url = url.into();
    self
  }

  pub fn with_data(mut self, data: serde_json::Value) -> Self {
    self.data = data;
    self
  }
}

#[derive(Error, Debug)]
pub enum Error {
  #[error("Unauthorized: {0}")]
  Unauthorized(Denial),

  #[error(transparent)]
  Remote(#[from] RemoteError),

  #[error("Empty result: {operation} returned no items")]
  EmptyResult { operation: &'static str },

  #[error("Invalid options: {0}")]
  InvalidOptions(String),

  #[error("Serialization error: {0}")]
  Serialization(String),
}

impl Error {
  /// The remote failure carried by this error, if it came from the collaborator.
  pub fn remote(&self) -> Option<&RemoteError> {
    match self {
      Error::Remote(e) => Some(e),
      _ => None,
    }
  }

  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidOptions(msg.into())
  }
}

impl From<serde_json::Error> for Error {
  fn from(e: serde_json::Error) -> Self {
    Self::Serialization(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, Error>;
