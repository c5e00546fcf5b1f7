// src/formatting/mod.rs
//! Rendering of document content into plain text.

mod text;

pub use text::extract_text;
