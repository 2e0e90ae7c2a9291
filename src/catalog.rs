//! Operation catalog.
//!
//! One [`Operation`] descriptor per remote capability. The guard reads
//! `level`, the normalizer reads `shape` and `empty`; nothing decides these
//! per call.

use crate::guard::AuthLevel;

/// What the caller gets back, and therefore which sentinel applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
  /// Returns a value; sentinel is `None`.
  Object,
  /// Returns a success flag; sentinel is `false`.
  Flag,
  /// Computed by the remote client without I/O; never normalized.
  Local,
}

/// How a structurally successful but empty result is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
  Allow,
  Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
  pub name: &'static str,
  pub level: AuthLevel,
  pub shape: Shape,
  pub empty: EmptyPolicy,
}

impl Operation {
  const fn new(name: &'static str, level: AuthLevel, shape: Shape) -> Self {
    Self {
      name,
      level,
      shape,
      empty: EmptyPolicy::Allow,
    }
  }

  const fn object(name: &'static str, level: AuthLevel) -> Self {
    Self::new(name, level, Shape::Object)
  }

  const fn flag(name: &'static str, level: AuthLevel) -> Self {
    Self::new(name, level, Shape::Flag)
  }

  const fn local(name: &'static str, level: AuthLevel) -> Self {
    Self::new(name, level, Shape::Local)
  }

  const fn reject_empty(mut self) -> Self {
    self.empty = EmptyPolicy::Reject;
    self
  }

  /// Same operation with empty results accepted.
  pub const fn allowing_empty(mut self) -> Self {
    self.empty = EmptyPolicy::Allow;
    self
  }
}

use crate::guard::AuthLevel::{Admin, None as Public, User};

// Session lifecycle
pub const LIST_AUTH_METHODS: Operation = Operation::object("list_auth_methods", Public);
pub const AUTH_WITH_PASSWORD: Operation = Operation::object("auth_with_password", Public);
pub const AUTH_WITH_OAUTH2_CODE: Operation = Operation::object("auth_with_oauth2_code", Public);
pub const AUTH_REFRESH: Operation = Operation::object("auth_refresh", User);
pub const CLEAR_AUTH: Operation = Operation::local("clear_auth", Public);
pub const REQUEST_VERIFICATION: Operation = Operation::flag("request_verification", Public);
pub const CONFIRM_VERIFICATION: Operation = Operation::flag("confirm_verification", Public);
pub const REQUEST_PASSWORD_RESET: Operation = Operation::flag("request_password_reset", Public);
pub const CONFIRM_PASSWORD_RESET: Operation = Operation::flag("confirm_password_reset", Public);
pub const REQUEST_EMAIL_CHANGE: Operation = Operation::flag("request_email_change", User);
pub const CONFIRM_EMAIL_CHANGE: Operation = Operation::flag("confirm_email_change", Public);
pub const LIST_EXTERNAL_AUTHS: Operation = Operation::object("list_external_auths", User);
pub const UNLINK_EXTERNAL_AUTH: Operation = Operation::flag("unlink_external_auth", User);

// Admin session lifecycle
pub const ADMIN_AUTH_WITH_PASSWORD: Operation =
  Operation::object("admin_auth_with_password", Public);
pub const ADMIN_AUTH_REFRESH: Operation = Operation::object("admin_auth_refresh", Admin);
pub const ADMIN_REQUEST_PASSWORD_RESET: Operation =
  Operation::flag("admin_request_password_reset", Public);
pub const ADMIN_CONFIRM_PASSWORD_RESET: Operation =
  Operation::flag("admin_confirm_password_reset", Public);

// Records. Access rules are enforced server-side, so these are public here.
pub const LIST_RECORDS: Operation = Operation::object("list_records", Public).reject_empty();
pub const LIST_ALL_RECORDS: Operation =
  Operation::object("list_all_records", Public).reject_empty();
pub const GET_FIRST_RECORD: Operation = Operation::object("get_first_record", Public);
pub const GET_RECORD: Operation = Operation::object("get_record", Public);
pub const CREATE_RECORD: Operation = Operation::object("create_record", Public);
pub const UPDATE_RECORD: Operation = Operation::object("update_record", Public);
pub const DELETE_RECORD: Operation = Operation::flag("delete_record", Public);
pub const FILE_URL: Operation = Operation::local("file_url", Public);
pub const FILE_TOKEN: Operation = Operation::object("file_token", User);

// Collections
pub const LIST_COLLECTIONS: Operation = Operation::object("list_collections", Admin);
pub const LIST_ALL_COLLECTIONS: Operation = Operation::object("list_all_collections", Admin);
pub const GET_COLLECTION: Operation = Operation::object("get_collection", Admin);
pub const CREATE_COLLECTION: Operation = Operation::object("create_collection", Admin);
pub const UPDATE_COLLECTION: Operation = Operation::object("update_collection", Admin);
pub const DELETE_COLLECTION: Operation = Operation::flag("delete_collection", Admin);
pub const IMPORT_COLLECTIONS: Operation = Operation::flag("import_collections", Admin);

// Admin accounts
pub const LIST_ADMINS: Operation = Operation::object("list_admins", Admin);
pub const LIST_ALL_ADMINS: Operation = Operation::object("list_all_admins", Admin);
pub const GET_ADMIN: Operation = Operation::object("get_admin", Admin);
pub const CREATE_ADMIN: Operation = Operation::object("create_admin", Admin);
pub const UPDATE_ADMIN: Operation = Operation::object("update_admin", Admin);
pub const DELETE_ADMIN: Operation = Operation::flag("delete_admin", Admin);

// Backups
pub const LIST_BACKUPS: Operation = Operation::object("list_backups", Admin);
pub const CREATE_BACKUP: Operation = Operation::flag("create_backup", Admin);
pub const UPLOAD_BACKUP: Operation = Operation::flag("upload_backup", Admin);
pub const DELETE_BACKUP: Operation = Operation::flag("delete_backup", Admin);
pub const RESTORE_BACKUP: Operation = Operation::flag("restore_backup", Admin);
pub const BACKUP_DOWNLOAD_URL: Operation = Operation::local("backup_download_url", Admin);

// Logs
pub const LIST_LOGS: Operation = Operation::object("list_logs", Admin);
pub const GET_LOG: Operation = Operation::object("get_log", Admin);
pub const GET_LOG_STATS: Operation = Operation::object("get_log_stats", Admin);

// Settings
pub const GET_SETTINGS: Operation = Operation::object("get_settings", Admin);
pub const UPDATE_SETTINGS: Operation = Operation::object("update_settings", Admin);
pub const TEST_S3: Operation = Operation::flag("test_s3", Admin);
pub const TEST_EMAIL: Operation = Operation::flag("test_email", Admin);
pub const GENERATE_APPLE_CLIENT_SECRET: Operation =
  Operation::object("generate_apple_client_secret", Admin);

pub const HEALTH_CHECK: Operation = Operation::object("health_check", Public);

/// Every operation the wrapper exposes.
pub const ALL: &[Operation] = &[
  LIST_AUTH_METHODS,
  AUTH_WITH_PASSWORD,
  AUTH_WITH_OAUTH2_CODE,
  AUTH_REFRESH,
  CLEAR_AUTH,
  REQUEST_VERIFICATION,
  CONFIRM_VERIFICATION,
  REQUEST_PASSWORD_RESET,
  CONFIRM_PASSWORD_RESET,
  REQUEST_EMAIL_CHANGE,
  CONFIRM_EMAIL_CHANGE,
  LIST_EXTERNAL_AUTHS,
  UNLINK_EXTERNAL_AUTH,
  ADMIN_AUTH_WITH_PASSWORD,
  ADMIN_AUTH_REFRESH,
  ADMIN_REQUEST_PASSWORD_RESET,
  ADMIN_CONFIRM_PASSWORD_RESET,
  LIST_RECORDS,
  LIST_ALL_RECORDS,
  GET_FIRST_RECORD,
  GET_RECORD,
  CREATE_RECORD,
  UPDATE_RECORD,
  DELETE_RECORD,
  FILE_URL,
  FILE_TOKEN,
  LIST_COLLECTIONS,
  LIST_ALL_COLLECTIONS,
  GET_COLLECTION,
  CREATE_COLLECTION,
  UPDATE_COLLECTION,
  DELETE_COLLECTION,
  IMPORT_COLLECTIONS,
  LIST_ADMINS,
  LIST_ALL_ADMINS,
  GET_ADMIN,
  CREATE_ADMIN,
  UPDATE_ADMIN,
  DELETE_ADMIN,
  LIST_BACKUPS,
  CREATE_BACKUP,
  UPLOAD_BACKUP,
  DELETE_BACKUP,
  RESTORE_BACKUP,
  BACKUP_DOWNLOAD_URL,
  LIST_LOGS,
  GET_LOG,
  GET_LOG_STATS,
  GET_SETTINGS,
  UPDATE_SETTINGS,
  TEST_S3,
  TEST_EMAIL,
  GENERATE_APPLE_CLIENT_SECRET,
  HEALTH_CHECK,
];

/// Look up an operation by name.
pub fn find(name: &str) -> Option<&'static Operation> {
  ALL.iter().find(|op| op.name == name)
}

/// Operations requiring exactly `level`.
pub fn requiring(level: AuthLevel) -> impl Iterator<Item = &'static Operation> {
  ALL.iter().filter(move |op| op.level == level)
}
