//! Wrapper configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable read by [`WrapperConfig::from_env`].
pub const ENV_THROW_ON_UNAUTHORIZED: &str = "BASEGUARD_THROW_ON_UNAUTHORIZED";

/// Environment variable read by [`WrapperConfig::from_env`].
pub const ENV_SUPPRESS_ERRORS: &str = "BASEGUARD_SUPPRESS_ERRORS";

/// Guard and normalizer policy, fixed when the wrapper is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperConfig {
  /// Fail protected operations locally instead of logging an advisory.
  #[serde(default)]
  pub throw_on_unauthorized: bool,
  /// Return `None`/`false` instead of propagating failed calls.
  #[serde(default)]
  pub suppress_errors: bool,
}

impl WrapperConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn throw_on_unauthorized(mut self, value: bool) -> Self {
    self.throw_on_unauthorized = value;
    self
  }

  pub fn suppress_errors(mut self, value: bool) -> Self {
    self.suppress_errors = value;
    self
  }

  /// Build from `BASEGUARD_*` environment variables, defaulting unset ones.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let mut config = Self::default();

    if let Some(raw) = lookup(ENV_THROW_ON_UNAUTHORIZED) {
      config.throw_on_unauthorized = parse_flag(ENV_THROW_ON_UNAUTHORIZED, &raw)?;
    }

    if let Some(raw) = lookup(ENV_SUPPRESS_ERRORS) {
      config.suppress_errors = parse_flag(ENV_SUPPRESS_ERRORS, &raw)?;
    }

    Ok(config)
  }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" | "" => Ok(false),
    other => Err(Error::invalid(format!(
      "{} must be a boolean, got '{}'",
      key, other
    ))),
  }
}
