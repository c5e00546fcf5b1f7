// src/api/client.rs
//! HTTP transport for the Feishu open API.
//!
//! This module wraps reqwest: it attaches the tenant access token, sends
//! one request, and hands the raw body to the parser. Endpoint paths live
//! in the `FeishuRepository` implementation at the bottom of the file.

use super::auth::TenantSession;
use super::parser::{decode_data, parse_api_response};
use super::responses::*;
use super::types::{ApiRequest, HttpMethod, PageRequest, PaginatedResponse};
use crate::constants::API_REQUEST_TIMEOUT;
use crate::error::AppError;
use crate::types::{AppCredentials, SpaceId, Token, ValidatedUrl};
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;
use std::sync::Arc;

/// Authenticated client for the open API.
///
/// Clones share the same session, so the access token is requested once
/// no matter how many handles are in use.
#[derive(Clone)]
pub struct FeishuHttpClient {
    client: Client,
    base_url: ValidatedUrl,
    session: Arc<TenantSession>,
}

impl FeishuHttpClient {
    /// Creates a client; no network traffic happens until the first call.
    pub fn new(credentials: AppCredentials, base_url: ValidatedUrl) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(API_REQUEST_TIMEOUT)
            .user_agent(concat!("feishu-reader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url,
            session: Arc::new(TenantSession::new(credentials)),
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    /// Performs one authenticated call and returns the envelope's `data`.
    pub async fn call(&self, request: ApiRequest) -> Result<Value, AppError> {
        let token = self
            .session
            .access_token(&self.client, &self.base_url)
            .await?;
        let response = request_builder(&self.client, &self.base_url, &request)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout {
                        endpoint: request.path.clone(),
                    }
                } else {
                    AppError::NetworkFailure(e)
                }
            })?;

        let result = extract_response_text(response).await?;
        parse_api_response(result)
    }

    /// Calls an endpoint and decodes `data` into `T`.
    async fn fetch<T>(&self, request: ApiRequest) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = request.path.clone();
        let data = self.call(request).await?;
        decode_data(data, &path)
    }
}

#[async_trait::async_trait]
impl super::FeishuRepository for FeishuHttpClient {
    async fn document_info(&self, document: &Token) -> Result<Passthrough, AppError> {
        let data: DocumentData = self
            .fetch(ApiRequest::get(format!("docx/v1/documents/{}", document)))
            .await?;
        Ok(data.document)
    }

    async fn document_blocks(
        &self,
        document: &Token,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.fetch(
            ApiRequest::get(format!("docx/v1/documents/{}/blocks", document)).with_page(page),
        )
        .await
    }

    async fn legacy_document_meta(&self, document: &Token) -> Result<Passthrough, AppError> {
        self.fetch(ApiRequest::get(format!("doc/v2/meta/{}", document)))
            .await
    }

    async fn spreadsheet_meta(&self, spreadsheet: &Token) -> Result<SpreadsheetMeta, AppError> {
        let data: SpreadsheetData = self
            .fetch(ApiRequest::get(format!(
                "sheets/v3/spreadsheets/{}",
                spreadsheet
            )))
            .await?;
        Ok(data.spreadsheet)
    }

    async fn list_sheets(&self, spreadsheet: &Token) -> Result<Vec<SheetProperties>, AppError> {
        let data: SheetListData = self
            .fetch(ApiRequest::get(format!(
                "sheets/v3/spreadsheets/{}/sheets/query",
                spreadsheet
            )))
            .await?;
        Ok(data.sheets)
    }

    async fn sheet_values(
        &self,
        spreadsheet: &Token,
        sheet_id: &str,
    ) -> Result<ValueRange, AppError> {
        let data: SheetValuesData = self
            .fetch(ApiRequest::get(format!(
                "sheets/v2/spreadsheets/{}/values/{}",
                spreadsheet, sheet_id
            )))
            .await?;
        Ok(data.value_range)
    }

    async fn bitable_app(&self, app: &Token) -> Result<Passthrough, AppError> {
        let data: BitableAppData = self
            .fetch(ApiRequest::get(format!("bitable/v1/apps/{}", app)))
            .await?;
        Ok(data.app)
    }

    async fn bitable_tables(
        &self,
        app: &Token,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<BitableTable>, AppError> {
        self.fetch(ApiRequest::get(format!("bitable/v1/apps/{}/tables", app)).with_page(page))
            .await
    }

    async fn bitable_fields(
        &self,
        app: &Token,
        table_id: &str,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Passthrough>, AppError> {
        self.fetch(
            ApiRequest::get(format!("bitable/v1/apps/{}/tables/{}/fields", app, table_id))
                .with_page(page),
        )
        .await
    }

    async fn bitable_records(
        &self,
        app: &Token,
        table_id: &str,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Passthrough>, AppError> {
        self.fetch(
            ApiRequest::get(format!(
                "bitable/v1/apps/{}/tables/{}/records",
                app, table_id
            ))
            .with_page(page),
        )
        .await
    }

    async fn wiki_node(&self, node: &Token) -> Result<WikiNode, AppError> {
        let data: WikiNodeData = self
            .fetch(ApiRequest::get("wiki/v2/spaces/get_node").with_query("token", node))
            .await?;
        Ok(data.node)
    }

    async fn wiki_space(&self, space: &SpaceId) -> Result<Passthrough, AppError> {
        let data: WikiSpaceData = self
            .fetch(ApiRequest::get(format!("wiki/v2/spaces/{}", space)))
            .await?;
        Ok(data.space)
    }

    async fn wiki_nodes(
        &self,
        space: &SpaceId,
        parent_node: Option<&str>,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<WikiNode>, AppError> {
        let mut request = ApiRequest::get(format!("wiki/v2/spaces/{}/nodes", space));
        if let Some(parent) = parent_node {
            request = request.with_query("parent_node_token", parent);
        }
        self.fetch(request.with_page(page)).await
    }
}

/// Prepares `request` against the base URL: method, path, query and body.
///
/// Authentication and per-call timeouts are left to the caller.
pub(super) fn request_builder(
    client: &Client,
    base_url: &ValidatedUrl,
    request: &ApiRequest,
) -> RequestBuilder {
    let url = format!("{}/{}", base_url.as_base(), request.path);
    log::debug!("{:?} {} {:?}", request.method, url, request.query);

    let builder = match request.method {
        HttpMethod::Get => client.get(&url),
        HttpMethod::Post => client.post(&url),
    };
    let builder = builder.query(&request.query);
    match &request.body {
        Some(body) => builder.json(body),
        None => builder,
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
