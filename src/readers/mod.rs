// src/readers/mod.rs
//! Per-kind resource readers.
//!
//! [`ContentReader::read`] is the single dispatch point: an exhaustive match
//! on [`ResourceKind`] picks the reader, so adding a kind forces a decision
//! here. Readers only talk to the [`FeishuRepository`] trait.

mod bitable;
mod document;
mod sheet;

use crate::api::FeishuRepository;
use crate::config::ReadLimits;
use crate::error::AppError;
use crate::model::Content;
use crate::types::{ResourceKind, Token};

/// Reads one resource of a known kind into its normalized content.
pub struct ContentReader<'a> {
    repo: &'a dyn FeishuRepository,
    limits: ReadLimits,
}

impl<'a> ContentReader<'a> {
    pub fn new(repo: &'a dyn FeishuRepository, limits: ReadLimits) -> Self {
        Self { repo, limits }
    }

    pub fn repository(&self) -> &'a dyn FeishuRepository {
        self.repo
    }

    pub fn limits(&self) -> ReadLimits {
        self.limits
    }

    /// Reads `token` as `kind`.
    ///
    /// Kinds without a content reader (file, slides, and wiki nodes met
    /// inside a wiki) yield [`Content::Unsupported`] rather than an error.
    pub async fn read(&self, kind: ResourceKind, token: &Token) -> Result<Content, AppError> {
        log::debug!("Reading {} {}", kind, token);
        match kind {
            ResourceKind::Docx => document::read_docx(self.repo, token)
                .await
                .map(Content::Document),
            ResourceKind::Doc => document::read_legacy(self.repo, token).await,
            ResourceKind::Sheet => sheet::read_spreadsheet(self.repo, token)
                .await
                .map(Content::Spreadsheet),
            ResourceKind::Bitable => {
                bitable::read_bitable(self.repo, token, self.limits.bitable_record_cap)
                    .await
                    .map(Content::Bitable)
            }
            ResourceKind::Wiki | ResourceKind::File | ResourceKind::Slides => {
                Ok(Content::unsupported(kind.as_str()))
            }
        }
    }
}
