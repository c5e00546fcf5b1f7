//! The closed set of resource kinds the platform exposes.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural category of a document-platform resource.
///
/// Serialized with the platform's own names so `_meta.type` in the output
/// and `obj_type` on wiki nodes use the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// New-style rich document
    Docx,
    /// Legacy document
    Doc,
    /// Spreadsheet
    Sheet,
    /// Multi-dimensional record tables
    Bitable,
    /// Knowledge-base node wrapping one of the other kinds
    Wiki,
    /// Drive file
    File,
    /// Slides deck
    Slides,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        Self::Docx,
        Self::Doc,
        Self::Sheet,
        Self::Bitable,
        Self::Wiki,
        Self::File,
        Self::Slides,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Sheet => "sheet",
            Self::Bitable => "bitable",
            Self::Wiki => "wiki",
            Self::File => "file",
            Self::Slides => "slides",
        }
    }

    /// Maps a wiki node's `obj_type` onto a kind.
    ///
    /// Returns `None` for object types this crate has no name for
    /// (mind notes, for instance); callers treat those as unsupported.
    pub fn from_obj_type(obj_type: &str) -> Option<Self> {
        obj_type.parse().ok()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}
