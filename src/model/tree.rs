//! Wiki traversal output.

use super::content::Content;
use crate::api::responses::WikiNode;
use serde::Serialize;

/// What a node's wrapped resource resolved to.
///
/// `content` and `content_error` can never both be present.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NodeContent {
    Resolved { content: Box<Content> },
    Failed { content_error: String },
}

/// What expanding a node's children produced.
///
/// `children` and `children_error` can never both be present.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NodeChildren {
    Expanded { children: Vec<TraversedNode> },
    Failed { children_error: String },
}

/// A wiki node as returned by the traversal: the platform's fields, plus
/// whatever resolution and expansion reached it.
///
/// Nodes below the depth bound keep both annotations empty and serialize
/// exactly as the platform listed them.
#[derive(Debug, Clone, Serialize)]
pub struct TraversedNode {
    #[serde(flatten)]
    pub node: WikiNode,
    #[serde(flatten)]
    pub content: Option<NodeContent>,
    #[serde(flatten)]
    pub children: Option<NodeChildren>,
}

impl TraversedNode {
    /// A node passed through untouched.
    pub fn unexpanded(node: WikiNode) -> Self {
        Self {
            node,
            content: None,
            children: None,
        }
    }

    pub fn content(&self) -> Option<&Content> {
        match &self.content {
            Some(NodeContent::Resolved { content }) => Some(content),
            _ => None,
        }
    }

    pub fn content_error(&self) -> Option<&str> {
        match &self.content {
            Some(NodeContent::Failed { content_error }) => Some(content_error),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[TraversedNode]> {
        match &self.children {
            Some(NodeChildren::Expanded { children }) => Some(children),
            _ => None,
        }
    }

    pub fn children_error(&self) -> Option<&str> {
        match &self.children {
            Some(NodeChildren::Failed { children_error }) => Some(children_error),
            _ => None,
        }
    }
}
