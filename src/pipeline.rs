// src/pipeline.rs
//! Pipeline capability traits: the two stages of a read, fetch then render.
//!
//! Each trait describes a single capability so each stage can be tested in
//! isolation.

use crate::config::ReadTarget;
use crate::error::AppError;
use crate::model::ReadResult;

/// Produces a normalized result for a read target.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self, target: &ReadTarget, recursive: bool) -> Result<ReadResult, AppError>;
}

/// Turns a result into the text that gets printed.
pub trait ResultRenderer {
    fn render(&self, result: &ReadResult) -> Result<String, AppError>;
}
