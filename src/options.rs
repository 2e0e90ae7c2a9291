//! Per-call option objects.
//!
//! Each operation category has its own struct. Required fields are
//! constructor arguments, optional ones are builder methods, and everything is
//! checked by [`Validate`] before the call reaches the guard.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::filter::{sort_expr, Filter, SortDir};
use crate::models::{Collection, Record};

/// Default page size of paged listings.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Default batch size used when fetching every record.
pub const DEFAULT_BATCH: u32 = 500;

/// Boundary check run on every option object before dispatch.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

fn identifier() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier pattern is valid"))
}

pub(crate) fn check_collection(name: &str) -> Result<()> {
  if name.is_empty() {
    return Err(Error::invalid("collection is required"));
  }
  if !identifier().is_match(name) {
    return Err(Error::invalid(format!(
      "collection '{}' must contain only letters, digits and underscores",
      name
    )));
  }
  Ok(())
}

pub(crate) fn check_id(what: &str, id: &str) -> Result<()> {
  if id.trim().is_empty() {
    return Err(Error::invalid(format!("{} is required", what)));
  }
  if id.contains('/') || id.chars().any(char::is_whitespace) {
    return Err(Error::invalid(format!("{} '{}' is not a valid identifier", what, id)));
  }
  Ok(())
}

pub(crate) fn check_present(what: &str, value: &str) -> Result<()> {
  if value.is_empty() {
    Err(Error::invalid(format!("{} is required", what)))
  } else {
    Ok(())
  }
}

pub(crate) fn check_email(what: &str, email: &str) -> Result<()> {
  match email.split_once('@') {
    Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
    _ => Err(Error::invalid(format!("{} '{}' is not an email address", what, email))),
  }
}

fn check_body(body: &Value) -> Result<()> {
  if body.is_object() {
    Ok(())
  } else {
    Err(Error::invalid("body must be a JSON object"))
  }
}

fn check_page(page: u32, per_page: u32) -> Result<()> {
  if page == 0 {
    return Err(Error::invalid("page starts at 1"));
  }
  if per_page == 0 {
    return Err(Error::invalid("per_page must be at least 1"));
  }
  Ok(())
}

fn is_false(v: &bool) -> bool {
  !*v
}

/// Query parameters shared by most read and write calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub filter: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expand: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fields: Option<String>,
  #[serde(skip_serializing_if = "is_false")]
  pub skip_total: bool,
  /// Additional query parameters passed through untouched.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl QueryOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn filter(mut self, expr: impl Into<String>) -> Self {
    self.filter = Some(expr.into());
    self
  }

  pub fn matching(self, filter: Filter) -> Self {
    self.filter(filter.compile())
  }

  pub fn sort(mut self, expr: impl Into<String>) -> Self {
    self.sort = Some(expr.into());
    self
  }

  pub fn sort_by(self, specs: &[(&str, SortDir)]) -> Self {
    self.sort(sort_expr(specs))
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.expand = Some(relations.into());
    self
  }

  pub fn fields(mut self, fields: impl Into<String>) -> Self {
    self.fields = Some(fields.into());
    self
  }

  pub fn skip_total(mut self) -> Self {
    self.skip_total = true;
    self
  }

  pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.extra.insert(key.into(), value.into());
    self
  }

  /// The query as a flat parameter map.
  pub fn to_params(&self) -> Map<String, Value> {
    match serde_json::to_value(self) {
      Ok(Value::Object(map)) => map,
      _ => Map::new(),
    }
  }
}

/// Builder methods forwarding to the embedded `query` field.
macro_rules! query_builders {
  ($ty:ty) => {
    impl $ty {
      pub fn query(mut self, query: QueryOptions) -> Self {
        self.query = query;
        self
      }

      pub fn filter(mut self, expr: impl Into<String>) -> Self {
        self.query = self.query.filter(expr);
        self
      }

      pub fn matching(mut self, filter: Filter) -> Self {
        self.query = self.query.matching(filter);
        self
      }

      pub fn sort(mut self, expr: impl Into<String>) -> Self {
        self.query = self.query.sort(expr);
        self
      }

      pub fn sort_by(mut self, specs: &[(&str, SortDir)]) -> Self {
        self.query = self.query.sort_by(specs);
        self
      }

      pub fn expand(mut self, relations: impl Into<String>) -> Self {
        self.query = self.query.expand(relations);
        self
      }

      pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.query = self.query.fields(fields);
        self
      }
    }
  };
}

// Records

/// One page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
  pub collection: String,
  pub page: u32,
  pub per_page: u32,
  /// Accept an empty page instead of treating it as a failure.
  pub allow_empty: bool,
  pub query: QueryOptions,
}

impl ListOptions {
  pub fn new(collection: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      page: 1,
      per_page: DEFAULT_PER_PAGE,
      allow_empty: false,
      query: QueryOptions::default(),
    }
  }

  pub fn page(mut self, page: u32) -> Self {
    self.page = page;
    self
  }

  pub fn per_page(mut self, per_page: u32) -> Self {
    self.per_page = per_page;
    self
  }

  pub fn allow_empty(mut self) -> Self {
    self.allow_empty = true;
    self
  }

  pub fn skip_total(mut self) -> Self {
    self.query = self.query.skip_total();
    self
  }
}

query_builders!(ListOptions);

impl Validate for ListOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_page(self.page, self.per_page)
  }
}

/// Every record of a collection, fetched in batches by the remote client.
#[derive(Debug, Clone, PartialEq)]
pub struct FullListOptions {
  pub collection: String,
  pub batch: u32,
  pub allow_empty: bool,
  pub query: QueryOptions,
}

impl FullListOptions {
  pub fn new(collection: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      batch: DEFAULT_BATCH,
      allow_empty: false,
      query: QueryOptions::default(),
    }
  }

  pub fn batch(mut self, batch: u32) -> Self {
    self.batch = batch;
    self
  }

  pub fn allow_empty(mut self) -> Self {
    self.allow_empty = true;
    self
  }
}

query_builders!(FullListOptions);

impl Validate for FullListOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    if self.batch == 0 {
      return Err(Error::invalid("batch must be at least 1"));
    }
    Ok(())
  }
}

/// First record matching a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstOptions {
  pub collection: String,
  pub filter: String,
  pub query: QueryOptions,
}

impl FirstOptions {
  pub fn new(collection: impl Into<String>, filter: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      filter: filter.into(),
      query: QueryOptions::default(),
    }
  }

  pub fn from_filter(collection: impl Into<String>, filter: Filter) -> Self {
    Self::new(collection, filter.compile())
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.query = self.query.expand(relations);
    self
  }

  pub fn fields(mut self, fields: impl Into<String>) -> Self {
    self.query = self.query.fields(fields);
    self
  }
}

impl Validate for FirstOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_present("filter", self.filter.trim())
  }
}

/// A single record addressed by id (get / delete).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOptions {
  pub collection: String,
  pub id: String,
  pub query: QueryOptions,
}

impl RecordOptions {
  pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      id: id.into(),
      query: QueryOptions::default(),
    }
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.query = self.query.expand(relations);
    self
  }

  pub fn fields(mut self, fields: impl Into<String>) -> Self {
    self.query = self.query.fields(fields);
    self
  }
}

impl Validate for RecordOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_id("record id", &self.id)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOptions {
  pub collection: String,
  pub body: Value,
  pub query: QueryOptions,
}

impl CreateOptions {
  pub fn new(collection: impl Into<String>, body: Value) -> Self {
    Self {
      collection: collection.into(),
      body,
      query: QueryOptions::default(),
    }
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.query = self.query.expand(relations);
    self
  }
}

impl Validate for CreateOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_body(&self.body)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOptions {
  pub collection: String,
  pub id: String,
  pub body: Value,
  pub query: QueryOptions,
}

impl UpdateOptions {
  pub fn new(collection: impl Into<String>, id: impl Into<String>, body: Value) -> Self {
    Self {
      collection: collection.into(),
      id: id.into(),
      body,
      query: QueryOptions::default(),
    }
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.query = self.query.expand(relations);
    self
  }
}

impl Validate for UpdateOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_id("record id", &self.id)?;
    check_body(&self.body)
  }
}

/// Public URL of a file attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOptions {
  pub record: Record,
  pub filename: String,
  pub thumb: Option<String>,
  pub token: Option<String>,
  pub download: bool,
}

impl FileOptions {
  pub fn new(record: Record, filename: impl Into<String>) -> Self {
    Self {
      record,
      filename: filename.into(),
      thumb: None,
      token: None,
      download: false,
    }
  }

  /// Thumbnail size, e.g. `100x100`.
  pub fn thumb(mut self, size: impl Into<String>) -> Self {
    self.thumb = Some(size.into());
    self
  }

  /// Access token for protected files.
  pub fn token(mut self, token: impl Into<String>) -> Self {
    self.token = Some(token.into());
    self
  }

  pub fn download(mut self) -> Self {
    self.download = true;
    self
  }
}

// Auth collections

/// Calls that only address an auth collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOptions {
  pub collection: String,
  pub query: QueryOptions,
}

impl CollectionOptions {
  pub fn new(collection: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      query: QueryOptions::default(),
    }
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.query = self.query.expand(relations);
    self
  }
}

impl Validate for CollectionOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordAuthOptions {
  pub collection: String,
  /// Username or email.
  pub identity: String,
  pub password: String,
  pub query: QueryOptions,
}

impl PasswordAuthOptions {
  pub fn new(
    collection: impl Into<String>,
    identity: impl Into<String>,
    password: impl Into<String>,
  ) -> Self {
    Self {
      collection: collection.into(),
      identity: identity.into(),
      password: password.into(),
      query: QueryOptions::default(),
    }
  }

  pub fn expand(mut self, relations: impl Into<String>) -> Self {
    self.query = self.query.expand(relations);
    self
  }
}

impl Validate for PasswordAuthOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_present("identity", &self.identity)?;
    check_present("password", &self.password)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OAuth2Options {
  pub collection: String,
  pub provider: String,
  pub code: String,
  pub code_verifier: String,
  pub redirect_url: String,
  /// Fields for the record created on first sign-in.
  pub create_data: Option<Value>,
  pub query: QueryOptions,
}

impl OAuth2Options {
  pub fn new(
    collection: impl Into<String>,
    provider: impl Into<String>,
    code: impl Into<String>,
    code_verifier: impl Into<String>,
    redirect_url: impl Into<String>,
  ) -> Self {
    Self {
      collection: collection.into(),
      provider: provider.into(),
      code: code.into(),
      code_verifier: code_verifier.into(),
      redirect_url: redirect_url.into(),
      create_data: None,
      query: QueryOptions::default(),
    }
  }

  pub fn create_data(mut self, data: Value) -> Self {
    self.create_data = Some(data);
    self
  }
}

impl Validate for OAuth2Options {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_present("provider", &self.provider)?;
    check_present("code", &self.code)?;
    check_present("redirect_url", &self.redirect_url)?;
    match &self.create_data {
      Some(data) => check_body(data),
      None => Ok(()),
    }
  }
}

/// Request flows that send an email (verification, password reset, email change).
#[derive(Debug, Clone, PartialEq)]
pub struct EmailOptions {
  pub collection: String,
  pub email: String,
}

impl EmailOptions {
  pub fn new(collection: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      email: email.into(),
    }
  }
}

impl Validate for EmailOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_email("email", &self.email)
  }
}

/// Confirmation flows carrying only the emailed token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOptions {
  pub collection: String,
  pub token: String,
}

impl TokenOptions {
  pub fn new(collection: impl Into<String>, token: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      token: token.into(),
    }
  }
}

impl Validate for TokenOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_present("token", &self.token)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordResetOptions {
  pub collection: String,
  pub token: String,
  pub password: String,
  pub password_confirm: String,
}

impl PasswordResetOptions {
  pub fn new(
    collection: impl Into<String>,
    token: impl Into<String>,
    password: impl Into<String>,
    password_confirm: impl Into<String>,
  ) -> Self {
    Self {
      collection: collection.into(),
      token: token.into(),
      password: password.into(),
      password_confirm: password_confirm.into(),
    }
  }
}

impl Validate for PasswordResetOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_reset(&self.token, &self.password, &self.password_confirm)
  }
}

fn check_reset(token: &str, password: &str, password_confirm: &str) -> Result<()> {
  check_present("token", token)?;
  check_present("password", password)?;
  if password != password_confirm {
    return Err(Error::invalid("password and password_confirm differ"));
  }
  Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailChangeOptions {
  pub collection: String,
  pub token: String,
  pub password: String,
}

impl EmailChangeOptions {
  pub fn new(
    collection: impl Into<String>,
    token: impl Into<String>,
    password: impl Into<String>,
  ) -> Self {
    Self {
      collection: collection.into(),
      token: token.into(),
      password: password.into(),
    }
  }
}

impl Validate for EmailChangeOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_present("token", &self.token)?;
    check_present("password", &self.password)
  }
}

/// OAuth2 links of one auth record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalAuthOptions {
  pub collection: String,
  pub record_id: String,
}

impl ExternalAuthOptions {
  pub fn new(collection: impl Into<String>, record_id: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      record_id: record_id.into(),
    }
  }
}

impl Validate for ExternalAuthOptions {
  fn validate(&self) -> Result<()> {
    check_collection(&self.collection)?;
    check_id("record id", &self.record_id)
  }
}

// Admin accounts and administrative resources

#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredentials {
  pub email: String,
  pub password: String,
  pub query: QueryOptions,
}

impl AdminCredentials {
  pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      email: email.into(),
      password: password.into(),
      query: QueryOptions::default(),
    }
  }
}

impl Validate for AdminCredentials {
  fn validate(&self) -> Result<()> {
    check_email("email", &self.email)?;
    check_present("password", &self.password)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminPasswordResetOptions {
  pub token: String,
  pub password: String,
  pub password_confirm: String,
}

impl AdminPasswordResetOptions {
  pub fn new(
    token: impl Into<String>,
    password: impl Into<String>,
    password_confirm: impl Into<String>,
  ) -> Self {
    Self {
      token: token.into(),
      password: password.into(),
      password_confirm: password_confirm.into(),
    }
  }
}

impl Validate for AdminPasswordResetOptions {
  fn validate(&self) -> Result<()> {
    check_reset(&self.token, &self.password, &self.password_confirm)
  }
}

/// One page of an administrative resource (collections, admins, logs).
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
  pub page: u32,
  pub per_page: u32,
  pub query: QueryOptions,
}

impl Default for PageOptions {
  fn default() -> Self {
    Self {
      page: 1,
      per_page: DEFAULT_PER_PAGE,
      query: QueryOptions::default(),
    }
  }
}

impl PageOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn page(mut self, page: u32) -> Self {
    self.page = page;
    self
  }

  pub fn per_page(mut self, per_page: u32) -> Self {
    self.per_page = per_page;
    self
  }
}

query_builders!(PageOptions);

impl Validate for PageOptions {
  fn validate(&self) -> Result<()> {
    check_page(self.page, self.per_page)
  }
}

/// One administrative item addressed by id (or collection name).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOptions {
  pub id: String,
  pub query: QueryOptions,
}

impl ItemOptions {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      query: QueryOptions::default(),
    }
  }

  pub fn fields(mut self, fields: impl Into<String>) -> Self {
    self.query = self.query.fields(fields);
    self
  }
}

impl Validate for ItemOptions {
  fn validate(&self) -> Result<()> {
    check_id("id", &self.id)
  }
}

/// Create or replace payload for an administrative resource.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyOptions {
  pub body: Value,
  pub query: QueryOptions,
}

impl BodyOptions {
  pub fn new(body: Value) -> Self {
    Self {
      body,
      query: QueryOptions::default(),
    }
  }
}

impl Validate for BodyOptions {
  fn validate(&self) -> Result<()> {
    check_body(&self.body)
  }
}

/// Partial update of an administrative item.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchOptions {
  pub id: String,
  pub body: Value,
  pub query: QueryOptions,
}

impl PatchOptions {
  pub fn new(id: impl Into<String>, body: Value) -> Self {
    Self {
      id: id.into(),
      body,
      query: QueryOptions::default(),
    }
  }
}

impl Validate for PatchOptions {
  fn validate(&self) -> Result<()> {
    check_id("id", &self.id)?;
    check_body(&self.body)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
  pub collections: Vec<Collection>,
  /// Drop server collections missing from the import.
  pub delete_missing: bool,
}

impl ImportOptions {
  pub fn new(collections: Vec<Collection>) -> Self {
    Self {
      collections,
      delete_missing: false,
    }
  }

  pub fn delete_missing(mut self) -> Self {
    self.delete_missing = true;
    self
  }
}

impl Validate for ImportOptions {
  fn validate(&self) -> Result<()> {
    if self.collections.is_empty() {
      return Err(Error::invalid("nothing to import"));
    }
    for collection in &self.collections {
      check_collection(&collection.name)?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackupUpload {
  pub name: String,
  pub bytes: Vec<u8>,
}

impl BackupUpload {
  pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self {
      name: name.into(),
      bytes,
    }
  }
}

impl Validate for BackupUpload {
  fn validate(&self) -> Result<()> {
    check_backup_name(&self.name)?;
    if self.bytes.is_empty() {
      return Err(Error::invalid("backup archive is empty"));
    }
    Ok(())
  }
}

pub(crate) fn check_backup_name(name: &str) -> Result<()> {
  check_id("backup name", name)?;
  if !name.ends_with(".zip") {
    return Err(Error::invalid(format!("backup name '{}' must end in .zip", name)));
  }
  Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestEmailOptions {
  pub to: String,
  /// One of `verification`, `password-reset`, `email-change`.
  pub template: String,
}

impl TestEmailOptions {
  pub fn new(to: impl Into<String>, template: impl Into<String>) -> Self {
    Self {
      to: to.into(),
      template: template.into(),
    }
  }
}

impl Validate for TestEmailOptions {
  fn validate(&self) -> Result<()> {
    check_email("to", &self.to)?;
    match self.template.as_str() {
      "verification" | "password-reset" | "email-change" => Ok(()),
      other => Err(Error::invalid(format!("unknown email template '{}'", other))),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppleSecretOptions {
  pub client_id: String,
  pub team_id: String,
  pub key_id: String,
  pub private_key: String,
  /// Lifetime of the generated secret in seconds.
  pub duration: u64,
}

impl AppleSecretOptions {
  pub fn new(
    client_id: impl Into<String>,
    team_id: impl Into<String>,
    key_id: impl Into<String>,
    private_key: impl Into<String>,
    duration: u64,
  ) -> Self {
    Self {
      client_id: client_id.into(),
      team_id: team_id.into(),
      key_id: key_id.into(),
      private_key: private_key.into(),
      duration,
    }
  }
}

impl Validate for AppleSecretOptions {
  fn validate(&self) -> Result<()> {
    check_present("client_id", &self.client_id)?;
    check_present("team_id", &self.team_id)?;
    check_present("key_id", &self.key_id)?;
    check_present("private_key", &self.private_key)?;
    if self.duration == 0 {
      return Err(Error::invalid("duration must be positive"));
    }
    Ok(())
  }
}
