//! baseguard
//!
//! A guarded, option-object client layer over a PocketBase-style backend
//! client. Every call goes through the same pipeline:
//!
//! 1. the option object is validated,
//! 2. the authorization guard checks the cached session against the
//!    operation's required level (fail fast or log an advisory),
//! 3. the wrapped [`RemoteClient`] performs the call,
//! 4. the normalizer returns the value, a sentinel, or the original error.
//!
//! # Example
//!
//! ```no_run
//! use baseguard::filter::field;
//! use baseguard::{BaseGuard, ListOptions, PasswordAuthOptions, RemoteClient, WrapperConfig};
//!
//! async fn recent_posts<C: RemoteClient>(remote: C) -> baseguard::Result<()> {
//!     let pb = BaseGuard::with_config(remote, WrapperConfig::new().throw_on_unauthorized(true));
//!
//!     pb.auth_with_password(PasswordAuthOptions::new("users", "alice@example.com", "secret"))
//!         .await?;
//!     assert!(pb.is_authenticated());
//!
//!     let page = pb
//!         .list_records(
//!             ListOptions::new("posts")
//!                 .matching(field("published").eq(true))
//!                 .sort("-created")
//!                 .per_page(10),
//!         )
//!         .await?;
//!
//!     if let Some(page) = page {
//!         for post in page.items {
//!             println!("{:?}", post.get("title"));
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod admin;
pub mod catalog;
mod client;
mod config;
mod error;
pub mod filter;
pub mod guard;
pub mod models;
pub mod normalize;
pub mod options;
mod records;
mod remote;
mod session;

pub use catalog::{EmptyPolicy, Operation, Shape};
pub use client::BaseGuard;
pub use config::{WrapperConfig, ENV_SUPPRESS_ERRORS, ENV_THROW_ON_UNAUTHORIZED};
pub use error::{Error, RemoteError, Result};
pub use guard::{AuthLevel, Denial, Verdict};
pub use models::{
  Admin, AdminAuthResult, AppleClientSecret, AuthMethods, AuthProvider, AuthResult, BackupInfo,
  Collection, CollectionType, ExternalAuth, HealthCheck, HourlyStats, ListResult, LogEntry, Record,
  SchemaField,
};
pub use options::{
  AdminCredentials, AdminPasswordResetOptions, AppleSecretOptions, BackupUpload, BodyOptions,
  CollectionOptions, CreateOptions, EmailChangeOptions, EmailOptions, ExternalAuthOptions,
  FileOptions, FirstOptions, FullListOptions, ImportOptions, ItemOptions, ListOptions,
  OAuth2Options, PageOptions, PasswordAuthOptions, PasswordResetOptions, PatchOptions,
  QueryOptions, RecordOptions, TestEmailOptions, TokenOptions, UpdateOptions, Validate,
};
pub use remote::{RemoteClient, RemoteResult};
pub use session::Session;
