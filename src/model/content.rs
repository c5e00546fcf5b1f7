//! Kind-specific content payloads.

use super::tree::{NodeChildren, NodeContent, TraversedNode};
use crate::api::responses::{Block, Passthrough, SheetProperties, WikiNode};
use crate::types::ResourceKind;
use serde::Serialize;
use serde_json::Value;

/// Content of one resource, shaped by its kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Content {
    Document(DocumentContent),
    LegacyDocument(LegacyDocumentContent),
    Spreadsheet(SpreadsheetContent),
    Bitable(BitableContent),
    WikiNode(WikiNodeContent),
    WikiSpace(WikiSpaceContent),
    Unsupported(UnsupportedContent),
}

impl Content {
    /// Placeholder for a recognized kind no reader handles.
    pub fn unsupported(kind: &str) -> Self {
        let kind = if kind.is_empty() { "<empty>" } else { kind };
        Content::Unsupported(UnsupportedContent {
            note: format!("Reading content of type '{}' is not implemented", kind),
        })
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            Content::Document(doc) => Some(doc.text_content.as_str()),
            _ => None,
        }
    }
}

/// A rich document with its blocks and the text derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentContent {
    pub document: Passthrough,
    pub blocks: Vec<Block>,
    pub text_content: String,
    /// Set when a legacy-document read was answered by this reader instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<ResourceKind>,
}

/// A legacy document; the old API only exposes metadata.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyDocumentContent {
    pub document: Passthrough,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpreadsheetContent {
    pub spreadsheet: SpreadsheetSummary,
    pub sheets: Vec<SheetContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadsheetSummary {
    pub title: String,
    pub owner_id: String,
    pub sheet_count: usize,
}

/// One worksheet; its values, or the reason they could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct SheetContent {
    pub sheet_id: String,
    pub title: String,
    pub properties: SheetProperties,
    #[serde(flatten)]
    pub data: SheetData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SheetData {
    Values { values: Vec<Vec<Value>> },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BitableContent {
    pub app: Passthrough,
    pub tables: Vec<TableContent>,
    pub table_count: usize,
}

/// One table of a bitable app; its fields and records, or the failure.
#[derive(Debug, Clone, Serialize)]
pub struct TableContent {
    pub table_id: String,
    pub name: String,
    #[serde(flatten)]
    pub data: TableData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableData {
    Loaded {
        fields: Vec<Passthrough>,
        records: Vec<Passthrough>,
        record_count: usize,
        /// The record cap stopped the drain before the table was exhausted.
        truncated: bool,
    },
    Failed {
        error: String,
    },
}

/// A single wiki node read: the node, what it wraps, and its children.
#[derive(Debug, Clone, Serialize)]
pub struct WikiNodeContent {
    pub node: WikiNode,
    #[serde(flatten)]
    pub content: NodeContent,
    #[serde(flatten)]
    pub children: NodeChildren,
}

/// A whole knowledge space: its description and root nodes.
#[derive(Debug, Clone, Serialize)]
pub struct WikiSpaceContent {
    pub space: Passthrough,
    pub nodes: Vec<TraversedNode>,
    pub node_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsupportedContent {
    pub note: String,
}
