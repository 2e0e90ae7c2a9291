//! Administrative operations: collections, admin accounts, backups, logs and
//! settings. All of them require an admin session.

use serde_json::Value;

use crate::catalog;
use crate::client::BaseGuard;
use crate::error::Result;
use crate::models::*;
use crate::options::*;
use crate::remote::RemoteClient;

impl<C: RemoteClient> BaseGuard<C> {
  // Collections

  pub async fn list_collections(&self, opts: PageOptions) -> Result<Option<ListResult<Collection>>> {
    opts.validate()?;
    self
      .call(&catalog::LIST_COLLECTIONS, |c| {
        c.list_collections(opts.page, opts.per_page, &opts.query)
      })
      .await
  }

  pub async fn list_all_collections(&self, query: QueryOptions) -> Result<Option<Vec<Collection>>> {
    self
      .call(&catalog::LIST_ALL_COLLECTIONS, |c| c.list_all_collections(&query))
      .await
  }

  /// `opts.id` may be the collection id or its name.
  pub async fn get_collection(&self, opts: ItemOptions) -> Result<Option<Collection>> {
    opts.validate()?;
    self
      .call(&catalog::GET_COLLECTION, |c| c.get_collection(&opts.id, &opts.query))
      .await
  }

  pub async fn create_collection(&self, opts: BodyOptions) -> Result<Option<Collection>> {
    opts.validate()?;
    self
      .call(&catalog::CREATE_COLLECTION, |c| {
        c.create_collection(&opts.body, &opts.query)
      })
      .await
  }

  pub async fn update_collection(&self, opts: PatchOptions) -> Result<Option<Collection>> {
    opts.validate()?;
    self
      .call(&catalog::UPDATE_COLLECTION, |c| {
        c.update_collection(&opts.id, &opts.body, &opts.query)
      })
      .await
  }

  pub async fn delete_collection(&self, id_or_name: &str) -> Result<bool> {
    check_id("collection", id_or_name)?;
    self
      .call_flag(&catalog::DELETE_COLLECTION, |c| c.delete_collection(id_or_name))
      .await
  }

  pub async fn import_collections(&self, opts: ImportOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::IMPORT_COLLECTIONS, |c| {
        c.import_collections(&opts.collections, opts.delete_missing)
      })
      .await
  }

  // Admin accounts

  pub async fn list_admins(&self, opts: PageOptions) -> Result<Option<ListResult<Admin>>> {
    opts.validate()?;
    self
      .call(&catalog::LIST_ADMINS, |c| {
        c.list_admins(opts.page, opts.per_page, &opts.query)
      })
      .await
  }

  pub async fn list_all_admins(&self, query: QueryOptions) -> Result<Option<Vec<Admin>>> {
    self
      .call(&catalog::LIST_ALL_ADMINS, |c| c.list_all_admins(&query))
      .await
  }

  pub async fn get_admin(&self, opts: ItemOptions) -> Result<Option<Admin>> {
    opts.validate()?;
    self
      .call(&catalog::GET_ADMIN, |c| c.get_admin(&opts.id, &opts.query))
      .await
  }

  pub async fn create_admin(&self, opts: BodyOptions) -> Result<Option<Admin>> {
    opts.validate()?;
    self
      .call(&catalog::CREATE_ADMIN, |c| c.create_admin(&opts.body, &opts.query))
      .await
  }

  pub async fn update_admin(&self, opts: PatchOptions) -> Result<Option<Admin>> {
    opts.validate()?;
    self
      .call(&catalog::UPDATE_ADMIN, |c| {
        c.update_admin(&opts.id, &opts.body, &opts.query)
      })
      .await
  }

  pub async fn delete_admin(&self, id: &str) -> Result<bool> {
    check_id("admin id", id)?;
    self
      .call_flag(&catalog::DELETE_ADMIN, |c| c.delete_admin(id))
      .await
  }

  // Backups

  pub async fn list_backups(&self) -> Result<Option<Vec<BackupInfo>>> {
    self
      .call(&catalog::LIST_BACKUPS, |c| c.list_backups())
      .await
  }

  /// Start a new backup named `name` (must end in `.zip`).
  pub async fn create_backup(&self, name: &str) -> Result<bool> {
    check_backup_name(name)?;
    self
      .call_flag(&catalog::CREATE_BACKUP, |c| c.create_backup(name))
      .await
  }

  pub async fn upload_backup(&self, upload: BackupUpload) -> Result<bool> {
    upload.validate()?;
    self
      .call_flag(&catalog::UPLOAD_BACKUP, |c| {
        c.upload_backup(&upload.name, &upload.bytes)
      })
      .await
  }

  pub async fn delete_backup(&self, key: &str) -> Result<bool> {
    check_backup_name(key)?;
    self
      .call_flag(&catalog::DELETE_BACKUP, |c| c.delete_backup(key))
      .await
  }

  /// Restore from `key`. The backend restarts once the restore completes.
  pub async fn restore_backup(&self, key: &str) -> Result<bool> {
    check_backup_name(key)?;
    self
      .call_flag(&catalog::RESTORE_BACKUP, |c| c.restore_backup(key))
      .await
  }

  /// Download URL for a backup. `token` comes from [`file_token`](Self::file_token).
  pub fn backup_download_url(&self, token: &str, key: &str) -> Result<String> {
    check_present("token", token)?;
    check_backup_name(key)?;
    self.authorize_local(&catalog::BACKUP_DOWNLOAD_URL)?;
    Ok(self.remote().backup_download_url(token, key))
  }

  // Logs

  pub async fn list_logs(&self, opts: PageOptions) -> Result<Option<ListResult<LogEntry>>> {
    opts.validate()?;
    self
      .call(&catalog::LIST_LOGS, |c| {
        c.list_logs(opts.page, opts.per_page, &opts.query)
      })
      .await
  }

  pub async fn get_log(&self, opts: ItemOptions) -> Result<Option<LogEntry>> {
    opts.validate()?;
    self
      .call(&catalog::GET_LOG, |c| c.get_log(&opts.id, &opts.query))
      .await
  }

  /// Hourly request counts, optionally narrowed by `query.filter`.
  pub async fn get_log_stats(&self, query: QueryOptions) -> Result<Option<Vec<HourlyStats>>> {
    self
      .call(&catalog::GET_LOG_STATS, |c| c.get_log_stats(&query))
      .await
  }

  // Settings

  pub async fn get_settings(&self, query: QueryOptions) -> Result<Option<Value>> {
    self
      .call(&catalog::GET_SETTINGS, |c| c.get_settings(&query))
      .await
  }

  pub async fn update_settings(&self, opts: BodyOptions) -> Result<Option<Value>> {
    opts.validate()?;
    self
      .call(&catalog::UPDATE_SETTINGS, |c| {
        c.update_settings(&opts.body, &opts.query)
      })
      .await
  }

  /// Check S3 connectivity of `filesystem` (`storage` or `backups`).
  pub async fn test_s3(&self, filesystem: &str) -> Result<bool> {
    check_present("filesystem", filesystem)?;
    self
      .call_flag(&catalog::TEST_S3, |c| c.test_s3(filesystem))
      .await
  }

  pub async fn test_email(&self, opts: TestEmailOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::TEST_EMAIL, |c| c.test_email(&opts.to, &opts.template))
      .await
  }

  pub async fn generate_apple_client_secret(
    &self,
    opts: AppleSecretOptions,
  ) -> Result<Option<AppleClientSecret>> {
    opts.validate()?;
    self
      .call(&catalog::GENERATE_APPLE_CLIENT_SECRET, |c| {
        c.generate_apple_client_secret(
          &opts.client_id,
          &opts.team_id,
          &opts.key_id,
          &opts.private_key,
          opts.duration,
        )
      })
      .await
  }
}
