//! Local cache of the remote client's authentication state.
//!
//! The cache starts empty and is only ever replaced wholesale with a snapshot
//! read from the remote client after a session-lifecycle call settles. The
//! guard reads it through [`SessionCache::snapshot`], which always returns one
//! consistent value.
//!
//! Concurrent lifecycle calls on the same wrapper are not ordered: the cache
//! holds whichever snapshot was published last, and a protected call issued
//! alongside an authentication may observe the state before or after it.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Authentication state as exposed by the remote client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub is_authenticated: bool,
  pub is_admin: bool,
  #[serde(default)]
  pub token: String,
  #[serde(default)]
  pub subject_id: String,
}

impl Session {
  /// Unauthenticated session.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Session of an authenticated auth-collection record.
  pub fn user(token: impl Into<String>, subject_id: impl Into<String>) -> Self {
    Self {
      is_authenticated: true,
      is_admin: false,
      token: token.into(),
      subject_id: subject_id.into(),
    }
  }

  /// Session of an authenticated admin account.
  pub fn admin(token: impl Into<String>, subject_id: impl Into<String>) -> Self {
    Self {
      is_authenticated: true,
      is_admin: true,
      token: token.into(),
      subject_id: subject_id.into(),
    }
  }

  pub fn has_token(&self) -> bool {
    !self.token.is_empty()
  }
}

/// Owned, single-instance holder of the cached [`Session`].
#[derive(Debug)]
pub(crate) struct SessionCache {
  tx: watch::Sender<Session>,
}

impl SessionCache {
  pub(crate) fn new() -> Self {
    let (tx, _rx) = watch::channel(Session::empty());
    Self { tx }
  }

  pub(crate) fn snapshot(&self) -> Session {
    self.tx.borrow().clone()
  }

  /// Replace the cached session, notifying subscribers only on change.
  pub(crate) fn publish(&self, next: Session) {
    self.tx.send_if_modified(|current| {
      if *current == next {
        false
      } else {
        *current = next;
        true
      }
    });
  }

  pub(crate) fn subscribe(&self) -> watch::Receiver<Session> {
    self.tx.subscribe()
  }
}
