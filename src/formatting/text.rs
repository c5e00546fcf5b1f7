//! Plain-text extraction from rich-document blocks.
//!
//! Only text-bearing block types produce output. Tables and images leave a
//! marker line; every other block type is skipped.

use crate::api::responses::Block;
use serde::Deserialize;
use serde_json::Value;

/// Block type codes that carry text, with the key of their payload and
/// the prefix their line gets.
fn text_block_style(block_type: i64) -> Option<(&'static str, &'static str)> {
    match block_type {
        2 => Some(("text", "")),
        3 => Some(("heading1", "# ")),
        4 => Some(("heading2", "## ")),
        5 => Some(("heading3", "### ")),
        6 => Some(("heading4", "#### ")),
        9 => Some(("bullet", "- ")),
        10 => Some(("ordered", "1. ")),
        11 => Some(("quote", "> ")),
        13 => Some(("code", "```\n")),
        _ => None,
    }
}

const TABLE_BLOCK: i64 = 23;
const IMAGE_BLOCK: i64 = 27;

#[derive(Debug, Default, Deserialize)]
struct TextPayload {
    #[serde(default)]
    elements: Vec<TextElement>,
}

#[derive(Debug, Default, Deserialize)]
struct TextElement {
    #[serde(default)]
    text_run: Option<TextRun>,
    #[serde(default)]
    mention_user: Option<MentionUser>,
    #[serde(default)]
    mention_doc: Option<MentionDoc>,
}

#[derive(Debug, Default, Deserialize)]
struct TextRun {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct MentionUser {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MentionDoc {
    #[serde(default)]
    title: Option<String>,
}

/// Derives the plain text of a document from its blocks, one line per block.
pub fn extract_text(blocks: &[Block]) -> String {
    let mut lines = Vec::with_capacity(blocks.len());

    for block in blocks {
        match block.block_type {
            TABLE_BLOCK => lines.push("[Table]".to_string()),
            IMAGE_BLOCK => lines.push("[Image]".to_string()),
            other => {
                let Some((key, prefix)) = text_block_style(other) else {
                    continue;
                };
                let payload = text_payload(block, key);
                let text = render_elements(&payload.elements);
                if !text.is_empty() {
                    lines.push(format!("{}{}", prefix, text));
                }
            }
        }
    }

    lines.join("\n")
}

/// Reads the block's type-specific payload, falling back to `text`.
fn text_payload(block: &Block, key: &str) -> TextPayload {
    let raw = non_empty(block.fields.get(key)).or_else(|| non_empty(block.fields.get("text")));
    raw.and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

fn non_empty(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    })
}

/// Concatenates a text payload's elements into one string.
fn render_elements(elements: &[TextElement]) -> String {
    let mut out = String::new();
    for element in elements {
        if let Some(run) = &element.text_run {
            out.push_str(&run.content);
        } else if let Some(user) = &element.mention_user {
            out.push('@');
            out.push_str(user.name.as_deref().unwrap_or("user"));
        } else if let Some(doc) = &element.mention_doc {
            out.push_str("[Doc: ");
            out.push_str(doc.title.as_deref().unwrap_or("doc"));
            out.push(']');
        }
    }
    out
}
