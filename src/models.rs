//! Data shapes exchanged with the remote backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record of any collection: system fields plus user-defined data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub collection_id: String,
  #[serde(default)]
  pub collection_name: String,
  #[serde(default)]
  pub created: String,
  #[serde(default)]
  pub updated: String,
  #[serde(default, skip_serializing_if = "Map::is_empty")]
  pub expand: Map<String, Value>,
  #[serde(flatten)]
  pub data: Map<String, Value>,
}

impl Record {
  pub fn get(&self, field: &str) -> Option<&Value> {
    self.data.get(field)
  }

  /// Decode the user-defined fields into a typed value.
  pub fn decode<T: DeserializeOwned>(&self) -> crate::Result<T> {
    Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
  }
}

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
  pub page: u32,
  pub per_page: u32,
  #[serde(default)]
  pub total_items: i64,
  #[serde(default)]
  pub total_pages: i64,
  pub items: Vec<T>,
}

impl<T> ListResult<T> {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
  pub token: String,
  pub record: Record,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminAuthResult {
  pub token: String,
  pub admin: Admin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Admin {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub avatar: u32,
  #[serde(default)]
  pub created: String,
  #[serde(default)]
  pub updated: String,
}

/// Collection type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
  #[default]
  Base,
  Auth,
  View,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  #[serde(default)]
  pub id: String,
  pub name: String,
  #[serde(default, rename = "type")]
  pub kind: CollectionType,
  #[serde(default)]
  pub system: bool,
  #[serde(default)]
  pub schema: Vec<SchemaField>,
  #[serde(default)]
  pub indexes: Vec<String>,
  #[serde(default)]
  pub list_rule: Option<String>,
  #[serde(default)]
  pub view_rule: Option<String>,
  #[serde(default)]
  pub create_rule: Option<String>,
  #[serde(default)]
  pub update_rule: Option<String>,
  #[serde(default)]
  pub delete_rule: Option<String>,
  #[serde(default)]
  pub options: Map<String, Value>,
  #[serde(default)]
  pub created: String,
  #[serde(default)]
  pub updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
  #[serde(default)]
  pub id: String,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub system: bool,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub presentable: bool,
  #[serde(default)]
  pub options: Map<String, Value>,
}

/// OAuth2 account linked to an auth record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuth {
  pub id: String,
  pub record_id: String,
  pub collection_id: String,
  pub provider: String,
  pub provider_id: String,
  #[serde(default)]
  pub created: String,
  #[serde(default)]
  pub updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProvider {
  pub name: String,
  #[serde(default)]
  pub display_name: String,
  #[serde(default)]
  pub state: String,
  #[serde(default)]
  pub code_verifier: String,
  #[serde(default)]
  pub code_challenge: String,
  #[serde(default)]
  pub code_challenge_method: String,
  #[serde(default)]
  pub auth_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMethods {
  #[serde(default)]
  pub username_password: bool,
  #[serde(default)]
  pub email_password: bool,
  #[serde(default)]
  pub only_verified: bool,
  #[serde(default)]
  pub auth_providers: Vec<AuthProvider>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupInfo {
  pub key: String,
  pub size: u64,
  pub modified: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
  pub id: String,
  #[serde(default)]
  pub created: String,
  #[serde(default)]
  pub updated: String,
  #[serde(default)]
  pub level: i32,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyStats {
  pub total: u64,
  pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
  pub code: u16,
  pub message: String,
  #[serde(default)]
  pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppleClientSecret {
  pub secret: String,
}
