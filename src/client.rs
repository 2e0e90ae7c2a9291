//! The guarded client: option translation, guard, delegate call, normalizer.

use std::future::Future;

use tokio::sync::watch;
use tracing::{debug, debug_span, Instrument};

use crate::catalog::{self, Operation};
use crate::config::WrapperConfig;
use crate::error::Result;
use crate::guard;
use crate::models::*;
use crate::normalize::{self, Emptiness};
use crate::options::*;
use crate::remote::{RemoteClient, RemoteResult};
use crate::session::{Session, SessionCache};

/// Wraps one [`RemoteClient`] and applies the guard/normalizer policy to every
/// call made through it.
///
/// Object-shaped operations return `Result<Option<T>>`: `Some` on success,
/// `None` only when a failure was suppressed. Flag-shaped operations return
/// `Result<bool>` with `false` as the suppressed failure.
///
/// One instance represents one caller's session. Do not share an instance
/// between independent users.
pub struct BaseGuard<C> {
  client: C,
  config: WrapperConfig,
  session: SessionCache,
}

impl<C: RemoteClient> BaseGuard<C> {
  pub fn new(client: C) -> Self {
    Self::with_config(client, WrapperConfig::default())
  }

  pub fn with_config(client: C, config: WrapperConfig) -> Self {
    Self {
      client,
      config,
      session: SessionCache::new(),
    }
  }

  pub fn config(&self) -> &WrapperConfig {
    &self.config
  }

  /// The wrapped remote client.
  pub fn remote(&self) -> &C {
    &self.client
  }

  /// Snapshot of the cached session.
  pub fn session(&self) -> Session {
    self.session.snapshot()
  }

  pub fn is_authenticated(&self) -> bool {
    self.session.snapshot().is_authenticated
  }

  pub fn is_admin(&self) -> bool {
    self.session.snapshot().is_admin
  }

  /// Observe every change of the cached session.
  pub fn session_changes(&self) -> watch::Receiver<Session> {
    self.session.subscribe()
  }

  fn authorize(&self, op: &Operation) -> Result<()> {
    let verdict = guard::check(op, &self.session.snapshot());
    guard::enforce(verdict, &self.config)
  }

  fn sync_session(&self) {
    let next = self.client.session();
    debug!(
      is_authenticated = next.is_authenticated,
      is_admin = next.is_admin,
      "session refreshed from remote client"
    );
    self.session.publish(next);
  }

  pub(crate) async fn call<'a, T, F, Fut>(&'a self, op: &Operation, call: F) -> Result<Option<T>>
  where
    T: Emptiness,
    F: FnOnce(&'a C) -> Fut,
    Fut: Future<Output = RemoteResult<T>>,
  {
    self.authorize(op)?;
    self.delegate(op, call).await
  }

  async fn delegate<'a, T, F, Fut>(&'a self, op: &Operation, call: F) -> Result<Option<T>>
  where
    T: Emptiness,
    F: FnOnce(&'a C) -> Fut,
    Fut: Future<Output = RemoteResult<T>>,
  {
    let outcome = call(&self.client)
      .instrument(debug_span!("remote_call", operation = op.name))
      .await;
    normalize::settle(op, outcome, &self.config)
  }

  pub(crate) async fn call_flag<'a, F, Fut>(&'a self, op: &Operation, call: F) -> Result<bool>
  where
    F: FnOnce(&'a C) -> Fut,
    Fut: Future<Output = RemoteResult<bool>>,
  {
    self.authorize(op)?;
    let outcome = call(&self.client)
      .instrument(debug_span!("remote_call", operation = op.name))
      .await;
    normalize::settle_flag(op, outcome, &self.config)
  }

  /// Like [`call`](Self::call), then re-read the remote client's session once
  /// the delegate call has settled.
  async fn call_session<'a, T, F, Fut>(&'a self, op: &Operation, call: F) -> Result<Option<T>>
  where
    T: Emptiness,
    F: FnOnce(&'a C) -> Fut,
    Fut: Future<Output = RemoteResult<T>>,
  {
    self.authorize(op)?;
    let result = self.delegate(op, call).await;
    self.sync_session();
    result
  }

  pub(crate) fn authorize_local(&self, op: &Operation) -> Result<()> {
    self.authorize(op)
  }

  // Session lifecycle

  pub async fn list_auth_methods(&self, opts: CollectionOptions) -> Result<Option<AuthMethods>> {
    opts.validate()?;
    self
      .call(&catalog::LIST_AUTH_METHODS, |c| {
        c.list_auth_methods(&opts.collection, &opts.query)
      })
      .await
  }

  pub async fn auth_with_password(&self, opts: PasswordAuthOptions) -> Result<Option<AuthResult>> {
    opts.validate()?;
    self
      .call_session(&catalog::AUTH_WITH_PASSWORD, |c| {
        c.auth_with_password(&opts.collection, &opts.identity, &opts.password, &opts.query)
      })
      .await
  }

  pub async fn auth_with_oauth2_code(&self, opts: OAuth2Options) -> Result<Option<AuthResult>> {
    opts.validate()?;
    self
      .call_session(&catalog::AUTH_WITH_OAUTH2_CODE, |c| {
        c.auth_with_oauth2_code(
          &opts.collection,
          &opts.provider,
          &opts.code,
          &opts.code_verifier,
          &opts.redirect_url,
          opts.create_data.as_ref(),
          &opts.query,
        )
      })
      .await
  }

  pub async fn auth_refresh(&self, opts: CollectionOptions) -> Result<Option<AuthResult>> {
    opts.validate()?;
    self
      .call_session(&catalog::AUTH_REFRESH, |c| {
        c.auth_refresh(&opts.collection, &opts.query)
      })
      .await
  }

  /// Clear the remote auth store and reset the cached session. Idempotent.
  pub fn clear_auth(&self) {
    self.client.clear_auth();
    self.sync_session();
  }

  pub async fn request_verification(&self, opts: EmailOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::REQUEST_VERIFICATION, |c| {
        c.request_verification(&opts.collection, &opts.email)
      })
      .await
  }

  pub async fn confirm_verification(&self, opts: TokenOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::CONFIRM_VERIFICATION, |c| {
        c.confirm_verification(&opts.collection, &opts.token)
      })
      .await
  }

  pub async fn request_password_reset(&self, opts: EmailOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::REQUEST_PASSWORD_RESET, |c| {
        c.request_password_reset(&opts.collection, &opts.email)
      })
      .await
  }

  pub async fn confirm_password_reset(&self, opts: PasswordResetOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::CONFIRM_PASSWORD_RESET, |c| {
        c.confirm_password_reset(
          &opts.collection,
          &opts.token,
          &opts.password,
          &opts.password_confirm,
        )
      })
      .await
  }

  /// `opts.email` is the new address.
  pub async fn request_email_change(&self, opts: EmailOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::REQUEST_EMAIL_CHANGE, |c| {
        c.request_email_change(&opts.collection, &opts.email)
      })
      .await
  }

  pub async fn confirm_email_change(&self, opts: EmailChangeOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::CONFIRM_EMAIL_CHANGE, |c| {
        c.confirm_email_change(&opts.collection, &opts.token, &opts.password)
      })
      .await
  }

  pub async fn list_external_auths(
    &self,
    opts: ExternalAuthOptions,
  ) -> Result<Option<Vec<ExternalAuth>>> {
    opts.validate()?;
    self
      .call(&catalog::LIST_EXTERNAL_AUTHS, |c| {
        c.list_external_auths(&opts.collection, &opts.record_id)
      })
      .await
  }

  pub async fn unlink_external_auth(
    &self,
    opts: ExternalAuthOptions,
    provider: &str,
  ) -> Result<bool> {
    opts.validate()?;
    check_present("provider", provider)?;
    self
      .call_flag(&catalog::UNLINK_EXTERNAL_AUTH, |c| {
        c.unlink_external_auth(&opts.collection, &opts.record_id, provider)
      })
      .await
  }

  // Admin session lifecycle

  pub async fn admin_auth_with_password(
    &self,
    opts: AdminCredentials,
  ) -> Result<Option<AdminAuthResult>> {
    opts.validate()?;
    self
      .call_session(&catalog::ADMIN_AUTH_WITH_PASSWORD, |c| {
        c.admin_auth_with_password(&opts.email, &opts.password, &opts.query)
      })
      .await
  }

  pub async fn admin_auth_refresh(&self, query: QueryOptions) -> Result<Option<AdminAuthResult>> {
    self
      .call_session(&catalog::ADMIN_AUTH_REFRESH, |c| c.admin_auth_refresh(&query))
      .await
  }

  pub async fn admin_request_password_reset(&self, email: &str) -> Result<bool> {
    check_email("email", email)?;
    self
      .call_flag(&catalog::ADMIN_REQUEST_PASSWORD_RESET, |c| {
        c.admin_request_password_reset(email)
      })
      .await
  }

  pub async fn admin_confirm_password_reset(&self, opts: AdminPasswordResetOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::ADMIN_CONFIRM_PASSWORD_RESET, |c| {
        c.admin_confirm_password_reset(&opts.token, &opts.password, &opts.password_confirm)
      })
      .await
  }

  pub async fn health_check(&self) -> Result<Option<HealthCheck>> {
    self
      .call(&catalog::HEALTH_CHECK, |c| c.health_check())
      .await
  }
}
