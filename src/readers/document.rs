// src/readers/document.rs
//! Rich (docx) and legacy (doc) documents.

use crate::api::types::PaginationRequest;
use crate::api::{drain_pages, FeishuRepository};
use crate::constants::DOCX_BLOCKS_PAGE_SIZE;
use crate::error::AppError;
use crate::formatting::extract_text;
use crate::model::{Content, DocumentContent, LegacyDocumentContent};
use crate::types::{ResourceKind, Token};

const LEGACY_DOCUMENT_NOTE: &str =
    "The legacy document API exposes metadata only; read the document as docx for its content";

/// Document info, every block in order, and the text derived from them.
pub(super) async fn read_docx(
    repo: &dyn FeishuRepository,
    token: &Token,
) -> Result<DocumentContent, AppError> {
    let document = repo.document_info(token).await?;

    let blocks = drain_pages(
        move |page| async move { repo.document_blocks(token, &page).await },
        PaginationRequest::complete(DOCX_BLOCKS_PAGE_SIZE),
    )
    .await?;
    log::debug!(
        "Document {}: {} blocks over {} page(s)",
        token,
        blocks.items.len(),
        blocks.pages_fetched
    );

    let text_content = extract_text(&blocks.items);
    Ok(DocumentContent {
        document,
        blocks: blocks.items,
        text_content,
        fallback: None,
    })
}

/// Legacy document metadata.
///
/// Tokens are often mislabeled as legacy documents, so any failure here is
/// retried once through the docx reader and the result marked as a
/// fallback. A failure of that read is the one reported.
pub(super) async fn read_legacy(
    repo: &dyn FeishuRepository,
    token: &Token,
) -> Result<Content, AppError> {
    match repo.legacy_document_meta(token).await {
        Ok(document) => Ok(Content::LegacyDocument(LegacyDocumentContent {
            document,
            note: LEGACY_DOCUMENT_NOTE.to_string(),
        })),
        Err(e) => {
            log::warn!(
                "Reading legacy document {} failed ({}); retrying as docx",
                token,
                e
            );
            let mut content = read_docx(repo, token).await?;
            content.fallback = Some(ResourceKind::Docx);
            Ok(Content::Document(content))
        }
    }
}
