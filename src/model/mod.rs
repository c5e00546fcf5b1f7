// src/model/mod.rs
//! Normalized read results.
//!
//! Every read produces a [`ReadResult`]: a kind-specific [`Content`] payload
//! plus the `_meta` envelope recording what was resolved. The shapes here
//! are what the CLI prints; their field names are part of the output format.

mod content;
mod tree;

pub use content::*;
pub use tree::*;

use crate::types::ResourceKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata attached to every top-level result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadMeta {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub token: String,
    pub fetched_at: DateTime<Utc>,
}

/// A top-level read: content fields at the root, metadata under `_meta`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadResult {
    #[serde(flatten)]
    pub content: Content,
    #[serde(rename = "_meta")]
    pub meta: ReadMeta,
}

impl ReadResult {
    pub fn new(kind: ResourceKind, token: impl Into<String>, content: Content) -> Self {
        Self {
            content,
            meta: ReadMeta {
                kind,
                token: token.into(),
                fetched_at: Utc::now(),
            },
        }
    }

    /// Plain text of the result, when the content has any.
    pub fn text_content(&self) -> Option<&str> {
        self.content.text_content()
    }
}
