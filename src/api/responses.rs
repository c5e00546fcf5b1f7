// src/api/responses.rs
//! Payload shapes for the open-API endpoints the readers call.
//!
//! Every field the readers look at is spelled out with a default, so a
//! missing field reads as empty rather than failing the whole response.
//! Objects that are handed to the caller unchanged keep their remaining
//! fields in an order-preserving map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON object passed through to the output as the platform sent it.
pub type Passthrough = IndexMap<String, Value>;

/// The `{ code, msg, data }` envelope wrapped around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// Absent codes are treated as failures, not as success.
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Response of the tenant access token exchange (not wrapped in `data`).
#[derive(Debug, Clone, Deserialize)]
pub struct TenantTokenResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expire: Option<i64>,
}

// --- docx ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub document: Passthrough,
}

/// One block of a rich document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default)]
    pub block_type: i64,
    /// Type-specific payload (`text`, `heading1`, `code`, ...) and the rest.
    #[serde(flatten)]
    pub fields: Passthrough,
}

// --- sheet ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetData {
    #[serde(default)]
    pub spreadsheet: SpreadsheetMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub sheets: Vec<SheetProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetListData {
    #[serde(default)]
    pub sheets: Vec<SheetProperties>,
}

fn default_sheet_title() -> String {
    "Sheet".to_string()
}

/// A worksheet's descriptor, emitted verbatim as its `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: String,
    #[serde(default = "default_sheet_title")]
    pub title: String,
    #[serde(flatten)]
    pub fields: Passthrough,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetValuesData {
    #[serde(default, rename = "valueRange")]
    pub value_range: ValueRange,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

// --- bitable ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BitableAppData {
    #[serde(default)]
    pub app: Passthrough,
}

fn default_table_name() -> String {
    "Table".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BitableTable {
    #[serde(default)]
    pub table_id: String,
    #[serde(default = "default_table_name")]
    pub name: String,
}

// --- wiki ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiNodeData {
    #[serde(default)]
    pub node: WikiNode,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiSpaceData {
    #[serde(default)]
    pub space: Passthrough,
}

/// An entry of the knowledge-base tree.
///
/// The traversal reads the named fields; everything else the platform
/// sends (`node_type`, timestamps, `origin_node_token`, ...) rides along in
/// `fields` and is serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WikiNode {
    #[serde(default)]
    pub space_id: String,
    #[serde(default)]
    pub node_token: String,
    #[serde(default)]
    pub obj_token: String,
    #[serde(default)]
    pub obj_type: String,
    #[serde(default)]
    pub parent_node_token: String,
    #[serde(default)]
    pub has_child: bool,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub fields: Passthrough,
}
