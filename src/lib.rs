// src/lib.rs
//! feishu-reader library: reads Feishu/Lark documents, spreadsheets,
//! bitables and wiki spaces into one normalized result tree.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `FeishuErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ReaderConfig`, `ReadLimits`
//! - **Reading**: `FeishuReader`, `ContentReader`, `WikiTraversal`, `resolve`
//! - **Result model**: `ReadResult`, `Content` and the per-kind payloads
//! - **API client**: `FeishuRepository`, `FeishuHttpClient`, `drain_pages`

mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod model;
mod output;
mod pipeline;
mod reader;
mod readers;
mod resolver;
mod types;
mod wiki;

// --- Error Handling ---
pub use crate::error::{AppError, FeishuErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    discover_credentials, CommandLineInput, DiscoveredCredentials, KindArg, ReadLimits,
    ReadTarget, ReaderConfig,
};
pub use crate::constants::{DEFAULT_BITABLE_RECORD_CAP, DEFAULT_WIKI_MAX_DEPTH, FEISHU_API_BASE_URL};

// --- Domain Types ---
pub use crate::types::{
    AppCredentials, AppId, AppSecret, ResourceKind, SpaceId, Token, ValidatedUrl, Warning,
    WarningLevel,
};

// --- Reading ---
pub use crate::reader::FeishuReader;
pub use crate::readers::ContentReader;
pub use crate::resolver::{classify_token, extract_token_from_url, resolve, Resolution, UrlToken};
pub use crate::wiki::WikiTraversal;

// --- Result Model ---
pub use crate::model::{
    BitableContent, Content, DocumentContent, LegacyDocumentContent, NodeChildren, NodeContent,
    ReadMeta, ReadResult, SheetContent, SheetData, SpreadsheetContent, SpreadsheetSummary,
    TableContent, TableData, TraversedNode, UnsupportedContent, WikiNodeContent,
    WikiSpaceContent,
};

// --- API Client ---
pub use crate::api::{
    auth::TenantSession,
    client::ApiResponse,
    parser::{check_envelope, parse_api_response},
    responses::{
        ApiEnvelope, BitableTable, Block, Passthrough, SheetProperties, SpreadsheetMeta, ValueRange, WikiNode,
    },
    types::{ApiRequest, HttpMethod, PageRequest, PaginatedResponse, PaginationRequest, PaginationResult},
    drain_pages, FeishuHttpClient, FeishuRepository,
};

// --- Formatting & Output ---
pub use crate::formatting::extract_text;
pub use crate::output::{print_to_stdout, render_output, OutputFormat, Presentation};

// --- Pipeline Traits ---
pub use crate::pipeline::{ContentSource, ResultRenderer};
