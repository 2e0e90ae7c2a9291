//! Record operations.
//!
//! Access to records is decided by the backend's collection rules, so none of
//! these are guarded locally except `file_token`.

use crate::catalog;
use crate::client::BaseGuard;
use crate::error::Result;
use crate::models::{ListResult, Record};
use crate::options::*;
use crate::remote::RemoteClient;

impl<C: RemoteClient> BaseGuard<C> {
  /// One page of records. An empty page is a failure unless
  /// [`ListOptions::allow_empty`] is set.
  pub async fn list_records(&self, opts: ListOptions) -> Result<Option<ListResult<Record>>> {
    opts.validate()?;
    let op = if opts.allow_empty {
      catalog::LIST_RECORDS.allowing_empty()
    } else {
      catalog::LIST_RECORDS
    };
    self
      .call(&op, |c| {
        c.list_records(&opts.collection, opts.page, opts.per_page, &opts.query)
      })
      .await
  }

  /// Every record matching the query. An empty result is a failure unless
  /// [`FullListOptions::allow_empty`] is set.
  pub async fn list_all_records(&self, opts: FullListOptions) -> Result<Option<Vec<Record>>> {
    opts.validate()?;
    let op = if opts.allow_empty {
      catalog::LIST_ALL_RECORDS.allowing_empty()
    } else {
      catalog::LIST_ALL_RECORDS
    };
    self
      .call(&op, |c| {
        c.list_all_records(&opts.collection, opts.batch, &opts.query)
      })
      .await
  }

  pub async fn get_first_record(&self, opts: FirstOptions) -> Result<Option<Record>> {
    opts.validate()?;
    self
      .call(&catalog::GET_FIRST_RECORD, |c| {
        c.get_first_record(&opts.collection, &opts.filter, &opts.query)
      })
      .await
  }

  pub async fn get_record(&self, opts: RecordOptions) -> Result<Option<Record>> {
    opts.validate()?;
    self
      .call(&catalog::GET_RECORD, |c| {
        c.get_record(&opts.collection, &opts.id, &opts.query)
      })
      .await
  }

  pub async fn create_record(&self, opts: CreateOptions) -> Result<Option<Record>> {
    opts.validate()?;
    self
      .call(&catalog::CREATE_RECORD, |c| {
        c.create_record(&opts.collection, &opts.body, &opts.query)
      })
      .await
  }

  pub async fn update_record(&self, opts: UpdateOptions) -> Result<Option<Record>> {
    opts.validate()?;
    self
      .call(&catalog::UPDATE_RECORD, |c| {
        c.update_record(&opts.collection, &opts.id, &opts.body, &opts.query)
      })
      .await
  }

  pub async fn delete_record(&self, opts: RecordOptions) -> Result<bool> {
    opts.validate()?;
    self
      .call_flag(&catalog::DELETE_RECORD, |c| {
        c.delete_record(&opts.collection, &opts.id)
      })
      .await
  }

  pub fn file_url(&self, opts: &FileOptions) -> String {
    self.remote().file_url(
      &opts.record,
      &opts.filename,
      opts.thumb.as_deref(),
      opts.token.as_deref(),
      opts.download,
    )
  }

  pub async fn file_token(&self) -> Result<Option<String>> {
    self
      .call(&catalog::FILE_TOKEN, |c| c.file_token())
      .await
  }
}
