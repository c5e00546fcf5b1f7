// src/reader.rs
//! The unified read operation.

use crate::api::FeishuRepository;
use crate::config::{ReadLimits, ReadTarget};
use crate::error::AppError;
use crate::model::{Content, ReadResult};
use crate::pipeline::ContentSource;
use crate::readers::ContentReader;
use crate::resolver;
use crate::types::{ResourceKind, SpaceId};
use crate::wiki::WikiTraversal;
use std::sync::Arc;

/// Reads any supported resource into a [`ReadResult`].
#[derive(Clone)]
pub struct FeishuReader {
    repo: Arc<dyn FeishuRepository>,
    limits: ReadLimits,
}

impl FeishuReader {
    pub fn new(repo: Arc<dyn FeishuRepository>, limits: ReadLimits) -> Self {
        Self { repo, limits }
    }

    /// Resolves `identifier` (a token or URL) and reads it.
    ///
    /// `recursive` only matters for wiki nodes. File and slides resources
    /// come back as unsupported content rather than an error.
    pub async fn read(
        &self,
        identifier: &str,
        explicit_kind: Option<ResourceKind>,
        recursive: bool,
    ) -> Result<ReadResult, AppError> {
        let resolution = resolver::resolve(identifier, explicit_kind)?;
        log::info!("Reading {} {}", resolution.kind, resolution.token);

        let reader = ContentReader::new(self.repo.as_ref(), self.limits);
        let content = match resolution.kind {
            ResourceKind::Wiki => Content::WikiNode(
                WikiTraversal::new(&reader)
                    .read_node(&resolution.token, recursive)
                    .await?,
            ),
            kind => reader.read(kind, &resolution.token).await?,
        };

        Ok(ReadResult::new(
            resolution.kind,
            resolution.token.into_string(),
            content,
        ))
    }

    /// Reads a whole knowledge space.
    pub async fn read_wiki_space(
        &self,
        space_id: &SpaceId,
        recursive: bool,
    ) -> Result<ReadResult, AppError> {
        log::info!("Reading wiki space {} (recursive: {})", space_id, recursive);
        let reader = ContentReader::new(self.repo.as_ref(), self.limits);
        let space = WikiTraversal::new(&reader)
            .read_space(space_id, recursive)
            .await?;
        Ok(ReadResult::new(
            ResourceKind::Wiki,
            space_id.as_str(),
            Content::WikiSpace(space),
        ))
    }
}

#[async_trait::async_trait]
impl ContentSource for FeishuReader {
    async fn fetch(&self, target: &ReadTarget, recursive: bool) -> Result<ReadResult, AppError> {
        match target {
            ReadTarget::Resource { identifier, kind } => {
                self.read(identifier, *kind, recursive).await
            }
            ReadTarget::WikiSpace { space_id } => self.read_wiki_space(space_id, recursive).await,
        }
    }
}
