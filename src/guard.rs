//! Authorization guard.
//!
//! [`check`] is a pure decision over the operation descriptor and a session
//! snapshot. [`enforce`] turns a rejection into either a hard failure or a
//! logged advisory, depending on [`WrapperConfig::throw_on_unauthorized`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Operation;
use crate::config::WrapperConfig;
use crate::error::{Error, Result};
use crate::session::Session;

/// Session level an operation requires before it is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
  None,
  User,
  Admin,
}

impl fmt::Display for AuthLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AuthLevel::None => write!(f, "none"),
      AuthLevel::User => write!(f, "user"),
      AuthLevel::Admin => write!(f, "admin"),
    }
  }
}

/// Why the guard refused an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
  pub operation: &'static str,
  pub required: AuthLevel,
  pub is_authenticated: bool,
  pub is_admin: bool,
}

impl fmt::Display for Denial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} requires {} access (is_authenticated={}, is_admin={})",
      self.operation, self.required, self.is_authenticated, self.is_admin
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Proceed,
  Reject(Denial),
}

impl Verdict {
  pub fn is_proceed(&self) -> bool {
    matches!(self, Verdict::Proceed)
  }
}

/// Decide whether `op` may run against `session`.
pub fn check(op: &Operation, session: &Session) -> Verdict {
  let allowed = match op.level {
    AuthLevel::None => true,
    AuthLevel::User => session.is_authenticated,
    AuthLevel::Admin => session.is_admin,
  };

  if allowed {
    Verdict::Proceed
  } else {
    Verdict::Reject(Denial {
      operation: op.name,
      required: op.level,
      is_authenticated: session.is_authenticated,
      is_admin: session.is_admin,
    })
  }
}

/// Apply the configured rejection policy to a verdict.
///
/// Returns `Ok(())` when the remote call should be attempted.
pub fn enforce(verdict: Verdict, config: &WrapperConfig) -> Result<()> {
  match verdict {
    Verdict::Proceed => Ok(()),
    Verdict::Reject(denial) if config.throw_on_unauthorized => Err(Error::Unauthorized(denial)),
    Verdict::Reject(denial) => {
      warn!(
        operation = denial.operation,
        required = %denial.required,
        is_authenticated = denial.is_authenticated,
        is_admin = denial.is_admin,
        "calling protected operation without the required session"
      );
      Ok(())
    }
  }
}
