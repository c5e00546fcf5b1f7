// src/api/mod.rs
//! Feishu open-API interaction: the ability to retrieve resources.
//!
//! Transport, parsing and pagination live here. Readers depend on the
//! [`FeishuRepository`] trait, never on HTTP details.

pub mod auth;
pub mod client;
pub mod pagination;
pub mod parser;
pub mod responses;
pub mod types;

use crate::error::AppError;
use crate::types::{SpaceId, Token};
use responses::{
    BitableTable, Block, Passthrough, SheetProperties, SpreadsheetMeta, ValueRange, WikiNode,
};
use types::{PageRequest, PaginatedResponse};

/// The ability to retrieve resources from a Feishu tenant.
///
/// One method per endpoint. List endpoints return a single page; draining
/// is the caller's concern (see [`pagination::drain_pages`]).
#[async_trait::async_trait]
pub trait FeishuRepository: Send + Sync {
    async fn document_info(&self, document: &Token) -> Result<Passthrough, AppError>;
    async fn document_blocks(
        &self,
        document: &Token,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Block>, AppError>;
    async fn legacy_document_meta(&self, document: &Token) -> Result<Passthrough, AppError>;

    async fn spreadsheet_meta(&self, spreadsheet: &Token) -> Result<SpreadsheetMeta, AppError>;
    async fn list_sheets(&self, spreadsheet: &Token) -> Result<Vec<SheetProperties>, AppError>;
    async fn sheet_values(&self, spreadsheet: &Token, sheet_id: &str)
        -> Result<ValueRange, AppError>;

    async fn bitable_app(&self, app: &Token) -> Result<Passthrough, AppError>;
    async fn bitable_tables(
        &self,
        app: &Token,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<BitableTable>, AppError>;
    async fn bitable_fields(
        &self,
        app: &Token,
        table_id: &str,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Passthrough>, AppError>;
    async fn bitable_records(
        &self,
        app: &Token,
        table_id: &str,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Passthrough>, AppError>;

    async fn wiki_node(&self, node: &Token) -> Result<WikiNode, AppError>;
    async fn wiki_space(&self, space: &SpaceId) -> Result<Passthrough, AppError>;
    /// Lists a space's root nodes, or the children of `parent_node`.
    async fn wiki_nodes(
        &self,
        space: &SpaceId,
        parent_node: Option<&str>,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<WikiNode>, AppError>;
}

// Re-export the public interface
pub use client::FeishuHttpClient;
pub use pagination::drain_pages;
