// tests/common/mod.rs
//! In-memory Feishu tenant used by the integration tests.
//!
//! Every endpoint is backed by a map keyed the way the real endpoint path
//! is built. Unknown keys answer 404, keys listed in `failing` answer a
//! permission error, and list endpoints are served in pages whose cursor is
//! the offset of the next item.

#![allow(dead_code)]

use feishu_reader::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryFeishu {
    pub documents: HashMap<String, Passthrough>,
    pub blocks: HashMap<String, Vec<Block>>,
    pub legacy_documents: HashMap<String, Passthrough>,
    pub spreadsheets: HashMap<String, SpreadsheetMeta>,
    pub sheet_lists: HashMap<String, Vec<SheetProperties>>,
    pub sheet_values: HashMap<String, ValueRange>,
    pub apps: HashMap<String, Passthrough>,
    pub tables: HashMap<String, Vec<BitableTable>>,
    pub fields: HashMap<String, Vec<Passthrough>>,
    pub records: HashMap<String, Vec<Passthrough>>,
    /// Record endpoints that never run out of full pages.
    pub endless_records: HashSet<String>,
    pub wiki_nodes: HashMap<String, WikiNode>,
    pub spaces: HashMap<String, Passthrough>,
    /// Node listings keyed by `space` (roots) or `space/parent`.
    pub listings: HashMap<String, Vec<WikiNode>>,
    pub failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryFeishu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, key: impl Into<String>) {
        self.failing.insert(key.into());
    }

    /// Every endpoint key requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record_call(&self, key: &str) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(key.to_string());
        if self.failing.contains(key) {
            return Err(AppError::from_envelope(91403, "forbidden"));
        }
        Ok(())
    }

    fn lookup<T: Clone>(&self, map: &HashMap<String, T>, key: String) -> Result<T, AppError> {
        self.record_call(&key)?;
        map.get(&key)
            .cloned()
            .ok_or(AppError::NotFound { endpoint: key })
    }

    fn page<T: Clone>(
        &self,
        map: &HashMap<String, Vec<T>>,
        key: String,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<T>, AppError> {
        let items = self.lookup(map, key)?;
        Ok(page_of(&items, page))
    }

    // --- builders ---

    pub fn with_document(mut self, token: &str, title: &str, blocks: Vec<Block>) -> Self {
        self.documents.insert(
            format!("docx/{}", token),
            passthrough(json!({"document_id": token, "title": title})),
        );
        self.blocks.insert(format!("docx/{}/blocks", token), blocks);
        self
    }

    pub fn with_wiki_node(mut self, node: WikiNode) -> Self {
        self.wiki_nodes
            .insert(format!("wiki/node/{}", node.node_token), node);
        self
    }

    pub fn with_space(mut self, space_id: &str, name: &str, roots: Vec<WikiNode>) -> Self {
        self.spaces.insert(
            format!("wiki/space/{}", space_id),
            passthrough(json!({"space_id": space_id, "name": name})),
        );
        self.listings.insert(format!("wiki/nodes/{}", space_id), roots);
        self
    }

    pub fn with_children(mut self, space_id: &str, parent: &str, children: Vec<WikiNode>) -> Self {
        self.listings
            .insert(format!("wiki/nodes/{}/{}", space_id, parent), children);
        self
    }
}

#[async_trait::async_trait]
impl FeishuRepository for InMemoryFeishu {
    async fn document_info(&self, document: &Token) -> Result<Passthrough, AppError> {
        self.lookup(&self.documents, format!("docx/{}", document))
    }

    async fn document_blocks(
        &self,
        document: &Token,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.page(&self.blocks, format!("docx/{}/blocks", document), page)
    }

    async fn legacy_document_meta(&self, document: &Token) -> Result<Passthrough, AppError> {
        self.lookup(&self.legacy_documents, format!("doc/{}", document))
    }

    async fn spreadsheet_meta(&self, spreadsheet: &Token) -> Result<SpreadsheetMeta, AppError> {
        self.lookup(&self.spreadsheets, format!("sheets/{}", spreadsheet))
    }

    async fn list_sheets(&self, spreadsheet: &Token) -> Result<Vec<SheetProperties>, AppError> {
        self.lookup(&self.sheet_lists, format!("sheets/{}/query", spreadsheet))
    }

    async fn sheet_values(
        &self,
        spreadsheet: &Token,
        sheet_id: &str,
    ) -> Result<ValueRange, AppError> {
        self.lookup(
            &self.sheet_values,
            format!("sheets/{}/values/{}", spreadsheet, sheet_id),
        )
    }

    async fn bitable_app(&self, app: &Token) -> Result<Passthrough, AppError> {
        self.lookup(&self.apps, format!("bitable/{}", app))
    }

    async fn bitable_tables(
        &self,
        app: &Token,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<BitableTable>, AppError> {
        self.page(&self.tables, format!("bitable/{}/tables", app), page)
    }

    async fn bitable_fields(
        &self,
        app: &Token,
        table_id: &str,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Passthrough>, AppError> {
        self.page(
            &self.fields,
            format!("bitable/{}/{}/fields", app, table_id),
            page,
        )
    }

    async fn bitable_records(
        &self,
        app: &Token,
        table_id: &str,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<Passthrough>, AppError> {
        let key = format!("bitable/{}/{}/records", app, table_id);
        if self.endless_records.contains(&key) {
            self.record_call(&key)?;
            let offset: usize = page
                .page_token
                .as_deref()
                .map(|t| t.parse().unwrap())
                .unwrap_or(0);
            let size = page.page_size as usize;
            let items = (offset..offset + size)
                .map(|n| passthrough(json!({"record_id": format!("rec{}", n)})))
                .collect();
            return Ok(PaginatedResponse {
                items,
                page_token: Some((offset + size).to_string()),
                has_more: true,
            });
        }
        self.page(&self.records, key, page)
    }

    async fn wiki_node(&self, node: &Token) -> Result<WikiNode, AppError> {
        self.lookup(&self.wiki_nodes, format!("wiki/node/{}", node))
    }

    async fn wiki_space(&self, space: &SpaceId) -> Result<Passthrough, AppError> {
        self.lookup(&self.spaces, format!("wiki/space/{}", space))
    }

    async fn wiki_nodes(
        &self,
        space: &SpaceId,
        parent_node: Option<&str>,
        page: &PageRequest,
    ) -> Result<PaginatedResponse<WikiNode>, AppError> {
        let key = match parent_node {
            Some(parent) => format!("wiki/nodes/{}/{}", space, parent),
            None => format!("wiki/nodes/{}", space),
        };
        // A parent with no registered listing simply has no children
        if parent_node.is_some() && !self.listings.contains_key(&key) {
            self.record_call(&key)?;
            return Ok(PaginatedResponse {
                items: vec![],
                page_token: None,
                has_more: false,
            });
        }
        self.page(&self.listings, key, page)
    }
}

/// Serves one page of `items`; the cursor is the offset of the next item.
pub fn page_of<T: Clone>(items: &[T], page: &PageRequest) -> PaginatedResponse<T> {
    let offset: usize = page
        .page_token
        .as_deref()
        .map(|t| t.parse().unwrap())
        .unwrap_or(0);
    let end = (offset + page.page_size as usize).min(items.len());
    let has_more = end < items.len();
    PaginatedResponse {
        items: items[offset.min(end)..end].to_vec(),
        page_token: has_more.then(|| end.to_string()),
        has_more,
    }
}

pub fn passthrough(value: Value) -> Passthrough {
    serde_json::from_value(value).unwrap()
}

pub fn text_block(id: &str, block_type: i64, key: &str, content: &str) -> Block {
    serde_json::from_value(json!({
        "block_id": id,
        "block_type": block_type,
        key: {"elements": [{"text_run": {"content": content}}]}
    }))
    .unwrap()
}

pub fn wiki_node(space: &str, token: &str, obj_type: &str, obj_token: &str, has_child: bool) -> WikiNode {
    WikiNode {
        space_id: space.to_string(),
        node_token: token.to_string(),
        obj_token: obj_token.to_string(),
        obj_type: obj_type.to_string(),
        title: format!("Node {}", token),
        has_child,
        ..Default::default()
    }
}

pub fn reader_for(repo: InMemoryFeishu) -> (std::sync::Arc<InMemoryFeishu>, FeishuReader) {
    let repo = std::sync::Arc::new(repo);
    let reader = FeishuReader::new(repo.clone(), ReadLimits::default());
    (repo, reader)
}

pub fn reader_with_limits(
    repo: InMemoryFeishu,
    limits: ReadLimits,
) -> (std::sync::Arc<InMemoryFeishu>, FeishuReader) {
    let repo = std::sync::Arc::new(repo);
    let reader = FeishuReader::new(repo.clone(), limits);
    (repo, reader)
}
