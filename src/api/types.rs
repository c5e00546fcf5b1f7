// src/api/types.rs
//! Type definitions for the Feishu API module.
//!
//! Requests and pagination state are plain immutable values; the HTTP
//! client and the pagination driver are the only things that act on them.

use serde::Deserialize;
use serde_json::Value;

// --- Request Types ---

/// HTTP verbs the open API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One call against the open API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Returns a new request with the query parameter appended.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends `page_size` and, when present, `page_token`.
    pub fn with_page(self, page: &PageRequest) -> Self {
        let request = self.with_query("page_size", page.page_size);
        match &page.page_token {
            Some(token) => request.with_query("page_token", token),
            None => request,
        }
    }
}

// --- Pagination Types ---

/// Parameters for fetching one page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: u32,
    pub page_token: Option<String>,
}

/// One page of a list endpoint, as found in the envelope's `data`.
///
/// Every field defaults: an empty `data` object reads as a final, empty page.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page_token: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page carrying `items`.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            page_token: None,
            has_more: false,
        }
    }

    /// A page announcing more results behind `cursor`.
    pub fn with_more(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            page_token: Some(cursor.into()),
            has_more: true,
        }
    }

    pub fn cursor(&self) -> PageCursor {
        PageCursor {
            page_token: self.page_token.clone().filter(|token| !token.is_empty()),
            has_more: self.has_more,
        }
    }
}

/// Continuation state threaded through a single drain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageCursor {
    pub page_token: Option<String>,
    pub has_more: bool,
}

/// How a list endpoint should be drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    pub page_size: u32,
    /// Stop once this many items have been collected.
    pub item_cap: Option<usize>,
}

impl PaginationRequest {
    /// Drain to completion.
    pub fn complete(page_size: u32) -> Self {
        Self {
            page_size,
            item_cap: None,
        }
    }

    /// Drain until `cap` items have been collected.
    pub fn capped(page_size: u32, cap: usize) -> Self {
        Self {
            page_size,
            item_cap: Some(cap),
        }
    }
}

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    /// The item cap cut the drain short.
    pub truncated: bool,
}
