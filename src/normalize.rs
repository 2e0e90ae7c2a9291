//! Result normalizer.
//!
//! Maps the settled outcome of a remote call to exactly one of: the value,
//! the operation's sentinel, or the original error.

use serde_json::Value;
use tracing::debug;

use crate::catalog::{EmptyPolicy, Operation};
use crate::config::WrapperConfig;
use crate::error::{Error, RemoteError, Result};
use crate::models::*;

/// Whether a successful result counts as "nothing came back".
///
/// Only consulted for operations whose policy is [`EmptyPolicy::Reject`].
pub trait Emptiness {
  fn is_empty_result(&self) -> bool {
    false
  }
}

impl<T> Emptiness for Vec<T> {
  fn is_empty_result(&self) -> bool {
    self.is_empty()
  }
}

impl<T> Emptiness for ListResult<T> {
  fn is_empty_result(&self) -> bool {
    self.is_empty()
  }
}

impl Emptiness for Value {
  fn is_empty_result(&self) -> bool {
    match self {
      Value::Null => true,
      Value::Array(items) => items.is_empty(),
      Value::Object(map) => map.is_empty(),
      _ => false,
    }
  }
}

impl Emptiness for String {
  fn is_empty_result(&self) -> bool {
    self.is_empty()
  }
}

macro_rules! never_empty {
  ($($ty:ty),* $(,)?) => {
    $(impl Emptiness for $ty {})*
  };
}

never_empty!(
  Record,
  AuthResult,
  AdminAuthResult,
  Admin,
  Collection,
  AuthMethods,
  LogEntry,
  HealthCheck,
  AppleClientSecret,
);

/// Settle an object-shaped call: `Ok(Some(value))`, `Ok(None)` or `Err`.
pub fn settle<T: Emptiness>(
  op: &Operation,
  outcome: std::result::Result<T, RemoteError>,
  config: &WrapperConfig,
) -> Result<Option<T>> {
  let failure = match outcome {
    Ok(value) if op.empty == EmptyPolicy::Reject && value.is_empty_result() => {
      Error::EmptyResult {
        operation: op.name,
      }
    }
    Ok(value) => return Ok(Some(value)),
    Err(remote) => Error::Remote(remote),
  };

  suppress_or_raise(op, failure, config).map(|()| None)
}

/// Settle a flag-shaped call: `Ok(flag)`, `Ok(false)` or `Err`.
pub fn settle_flag(
  op: &Operation,
  outcome: std::result::Result<bool, RemoteError>,
  config: &WrapperConfig,
) -> Result<bool> {
  match outcome {
    Ok(flag) => Ok(flag),
    Err(remote) => suppress_or_raise(op, Error::Remote(remote), config).map(|()| false),
  }
}

fn suppress_or_raise(op: &Operation, failure: Error, config: &WrapperConfig) -> Result<()> {
  if config.suppress_errors {
    debug!(operation = op.name, error = %failure, "suppressed failure");
    Ok(())
  } else {
    Err(failure)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog;

  fn suppressing() -> WrapperConfig {
    WrapperConfig::new().suppress_errors(true)
  }

  fn empty_page() -> ListResult<Record> {
    ListResult {
      page: 1,
      per_page: 30,
      ..Default::default()
    }
  }

  #[test]
  fn test_success_passes_through() {
    let record = Record {
      id: "r1".to_string(),
      ..Default::default()
    };
    let out = settle(&catalog::GET_RECORD, Ok(record.clone()), &WrapperConfig::default()).unwrap();
    assert_eq!(out, Some(record));
  }

  #[test]
  fn test_failure_propagates_original() {
    let remote = RemoteError::new(404, "not found").with_url("http://x/api/records/1");
    let err = settle::<Record>(&catalog::GET_RECORD, Err(remote.clone()), &WrapperConfig::default())
      .unwrap_err();
    assert_eq!(err.remote(), Some(&remote));
  }

  #[test]
  fn test_failure_suppressed_to_none() {
    let out = settle::<Record>(
      &catalog::GET_RECORD,
      Err(RemoteError::new(500, "boom")),
      &suppressing(),
    )
    .unwrap();
    assert!(out.is_none());
  }

  #[test]
  fn test_empty_listing_rejected() {
    let err = settle(&catalog::LIST_RECORDS, Ok(empty_page()), &WrapperConfig::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyResult { operation: "list_records" }));

    let out = settle(&catalog::LIST_RECORDS, Ok(empty_page()), &suppressing()).unwrap();
    assert!(out.is_none());
  }

  #[test]
  fn test_empty_listing_allowed_when_relaxed() {
    let op = catalog::LIST_RECORDS.allowing_empty();
    let out = settle(&op, Ok(empty_page()), &WrapperConfig::default()).unwrap();
    assert_eq!(out, Some(empty_page()));
  }

  #[test]
  fn test_empty_value_allowed_for_allow_policy() {
    let out = settle(&catalog::LIST_BACKUPS, Ok(Vec::<BackupInfo>::new()), &WrapperConfig::default()).unwrap();
    assert_eq!(out, Some(vec![]));
  }

  #[test]
  fn test_flag_sentinel() {
    let remote = RemoteError::new(403, "forbidden");
    assert!(settle_flag(&catalog::DELETE_RECORD, Ok(true), &WrapperConfig::default()).unwrap());
    assert!(!settle_flag(&catalog::DELETE_RECORD, Err(remote.clone()), &suppressing()).unwrap());

    let err = settle_flag(&catalog::DELETE_RECORD, Err(remote.clone()), &WrapperConfig::default())
      .unwrap_err();
    assert_eq!(err.remote(), Some(&remote));
  }

  #[test]
  fn test_value_emptiness() {
    assert!(Value::Null.is_empty_result());
    assert!(serde_json::json!([]).is_empty_result());
    assert!(!serde_json::json!({"a": 1}).is_empty_result());
  }
}
