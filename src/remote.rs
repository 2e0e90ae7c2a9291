//! Contract of the remote client this crate wraps.
//!
//! Implementations own the transport and the actual auth store. Every method
//! reports failures as [`RemoteError`]; the wrapper passes them through.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;
use crate::models::*;
use crate::options::QueryOptions;
use crate::session::Session;

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[async_trait]
pub trait RemoteClient: Send + Sync {
  /// Root URL of the backend, e.g. `http://127.0.0.1:8090`.
  fn base_url(&self) -> &str;

  /// Current auth store state.
  fn session(&self) -> Session;

  /// Drop the stored token and auth model.
  fn clear_auth(&self);

  // Auth collections

  async fn list_auth_methods(
    &self,
    collection: &str,
    query: &QueryOptions,
  ) -> RemoteResult<AuthMethods>;

  async fn auth_with_password(
    &self,
    collection: &str,
    identity: &str,
    password: &str,
    query: &QueryOptions,
  ) -> RemoteResult<AuthResult>;

  #[allow(clippy::too_many_arguments)]
  async fn auth_with_oauth2_code(
    &self,
    collection: &str,
    provider: &str,
    code: &str,
    code_verifier: &str,
    redirect_url: &str,
    create_data: Option<&Value>,
    query: &QueryOptions,
  ) -> RemoteResult<AuthResult>;

  async fn auth_refresh(&self, collection: &str, query: &QueryOptions) -> RemoteResult<AuthResult>;

  async fn request_verification(&self, collection: &str, email: &str) -> RemoteResult<bool>;

  async fn confirm_verification(&self, collection: &str, token: &str) -> RemoteResult<bool>;

  async fn request_password_reset(&self, collection: &str, email: &str) -> RemoteResult<bool>;

  async fn confirm_password_reset(
    &self,
    collection: &str,
    token: &str,
    password: &str,
    password_confirm: &str,
  ) -> RemoteResult<bool>;

  async fn request_email_change(&self, collection: &str, new_email: &str) -> RemoteResult<bool>;

  async fn confirm_email_change(
    &self,
    collection: &str,
    token: &str,
    password: &str,
  ) -> RemoteResult<bool>;

  async fn list_external_auths(
    &self,
    collection: &str,
    record_id: &str,
  ) -> RemoteResult<Vec<ExternalAuth>>;

  async fn unlink_external_auth(
    &self,
    collection: &str,
    record_id: &str,
    provider: &str,
  ) -> RemoteResult<bool>;

  // Admin auth

  async fn admin_auth_with_password(
    &self,
    email: &str,
    password: &str,
    query: &QueryOptions,
  ) -> RemoteResult<AdminAuthResult>;

  async fn admin_auth_refresh(&self, query: &QueryOptions) -> RemoteResult<AdminAuthResult>;

  async fn admin_request_password_reset(&self, email: &str) -> RemoteResult<bool>;

  async fn admin_confirm_password_reset(
    &self,
    token: &str,
    password: &str,
    password_confirm: &str,
  ) -> RemoteResult<bool>;

  // Records

  async fn list_records(
    &self,
    collection: &str,
    page: u32,
    per_page: u32,
    query: &QueryOptions,
  ) -> RemoteResult<ListResult<Record>>;

  async fn list_all_records(
    &self,
    collection: &str,
    batch: u32,
    query: &QueryOptions,
  ) -> RemoteResult<Vec<Record>>;

  async fn get_first_record(
    &self,
    collection: &str,
    filter: &str,
    query: &QueryOptions,
  ) -> RemoteResult<Record>;

  async fn get_record(&self, collection: &str, id: &str, query: &QueryOptions)
    -> RemoteResult<Record>;

  async fn create_record(
    &self,
    collection: &str,
    body: &Value,
    query: &QueryOptions,
  ) -> RemoteResult<Record>;

  async fn update_record(
    &self,
    collection: &str,
    id: &str,
    body: &Value,
    query: &QueryOptions,
  ) -> RemoteResult<Record>;

  async fn delete_record(&self, collection: &str, id: &str) -> RemoteResult<bool>;

  /// Short-lived token for protected files.
  async fn file_token(&self) -> RemoteResult<String>;

  /// Absolute URL of a record file. Empty when the record has no id or the
  /// filename is empty.
  fn file_url(
    &self,
    record: &Record,
    filename: &str,
    thumb: Option<&str>,
    token: Option<&str>,
    download: bool,
  ) -> String {
    if record.id.is_empty() || filename.is_empty() {
      return String::new();
    }

    let collection = if record.collection_id.is_empty() {
      &record.collection_name
    } else {
      &record.collection_id
    };

    let mut url = format!(
      "{}/api/files/{}/{}/{}",
      self.base_url().trim_end_matches('/'),
      urlencoding::encode(collection),
      urlencoding::encode(&record.id),
      urlencoding::encode(filename)
    );

    let mut params = Vec::new();
    if let Some(thumb) = thumb {
      params.push(format!("thumb={}", urlencoding::encode(thumb)));
    }
    if let Some(token) = token {
      params.push(format!("token={}", urlencoding::encode(token)));
    }
    if download {
      params.push("download=1".to_string());
    }
    if !params.is_empty() {
      url.push('?');
      url.push_str(&params.join("&"));
    }

    url
  }

  // Collections

  async fn list_collections(
    &self,
    page: u32,
    per_page: u32,
    query: &QueryOptions,
  ) -> RemoteResult<ListResult<Collection>>;

  async fn list_all_collections(&self, query: &QueryOptions) -> RemoteResult<Vec<Collection>>;

  async fn get_collection(&self, id_or_name: &str, query: &QueryOptions)
    -> RemoteResult<Collection>;

  async fn create_collection(&self, body: &Value, query: &QueryOptions)
    -> RemoteResult<Collection>;

  async fn update_collection(
    &self,
    id_or_name: &str,
    body: &Value,
    query: &QueryOptions,
  ) -> RemoteResult<Collection>;

  async fn delete_collection(&self, id_or_name: &str) -> RemoteResult<bool>;

  async fn import_collections(
    &self,
    collections: &[Collection],
    delete_missing: bool,
  ) -> RemoteResult<bool>;

  // Admin accounts

  async fn list_admins(
    &self,
    page: u32,
    per_page: u32,
    query: &QueryOptions,
  ) -> RemoteResult<ListResult<Admin>>;

  async fn list_all_admins(&self, query: &QueryOptions) -> RemoteResult<Vec<Admin>>;

  async fn get_admin(&self, id: &str, query: &QueryOptions) -> RemoteResult<Admin>;

  async fn create_admin(&self, body: &Value, query: &QueryOptions) -> RemoteResult<Admin>;

  async fn update_admin(&self, id: &str, body: &Value, query: &QueryOptions)
    -> RemoteResult<Admin>;

  async fn delete_admin(&self, id: &str) -> RemoteResult<bool>;

  // Backups

  async fn list_backups(&self) -> RemoteResult<Vec<BackupInfo>>;

  async fn create_backup(&self, name: &str) -> RemoteResult<bool>;

  async fn upload_backup(&self, name: &str, bytes: &[u8]) -> RemoteResult<bool>;

  async fn delete_backup(&self, key: &str) -> RemoteResult<bool>;

  async fn restore_backup(&self, key: &str) -> RemoteResult<bool>;

  /// Download URL of a backup archive, authorized by a file token.
  fn backup_download_url(&self, token: &str, key: &str) -> String {
    format!(
      "{}/api/backups/{}?token={}",
      self.base_url().trim_end_matches('/'),
      urlencoding::encode(key),
      urlencoding::encode(token)
    )
  }

  // Logs

  async fn list_logs(
    &self,
    page: u32,
    per_page: u32,
    query: &QueryOptions,
  ) -> RemoteResult<ListResult<LogEntry>>;

  async fn get_log(&self, id: &str, query: &QueryOptions) -> RemoteResult<LogEntry>;

  async fn get_log_stats(&self, query: &QueryOptions) -> RemoteResult<Vec<HourlyStats>>;

  // Settings

  async fn get_settings(&self, query: &QueryOptions) -> RemoteResult<Value>;

  async fn update_settings(&self, body: &Value, query: &QueryOptions) -> RemoteResult<Value>;

  async fn test_s3(&self, filesystem: &str) -> RemoteResult<bool>;

  async fn test_email(&self, to: &str, template: &str) -> RemoteResult<bool>;

  async fn generate_apple_client_secret(
    &self,
    client_id: &str,
    team_id: &str,
    key_id: &str,
    private_key: &str,
    duration: u64,
  ) -> RemoteResult<AppleClientSecret>;

  async fn health_check(&self) -> RemoteResult<HealthCheck>;
}
