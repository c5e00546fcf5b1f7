// src/resolver.rs
//! Resource-kind resolution from tokens and URLs.
//!
//! Tokens carry no authoritative type tag. The kind is guessed from
//! well-known prefixes, then from the URL path marker, and finally defaults
//! to a rich document, the most common kind, with a warning rather than an
//! error.

use crate::types::{ResourceKind, Token, ValidationError, Warning, WarningLevel};
use url::Url;

/// Token prefixes in priority order. A token matches when it starts with
/// or contains the prefix; the first match wins.
const TOKEN_PREFIXES: [(&str, ResourceKind); 7] = [
    ("docx_", ResourceKind::Docx),
    ("doc_", ResourceKind::Doc),
    ("sheet_", ResourceKind::Sheet),
    ("shtcn", ResourceKind::Sheet),
    ("base", ResourceKind::Bitable),
    ("bascn", ResourceKind::Bitable),
    ("wikcn", ResourceKind::Wiki),
];

/// URL path segments that precede a resource token.
const URL_MARKERS: [(&str, ResourceKind); 6] = [
    ("docx", ResourceKind::Docx),
    ("doc", ResourceKind::Doc),
    ("wiki", ResourceKind::Wiki),
    ("sheets", ResourceKind::Sheet),
    ("base", ResourceKind::Bitable),
    ("file", ResourceKind::File),
];

/// The outcome of resolving an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub kind: ResourceKind,
    pub token: Token,
    /// Set when the kind is a guess.
    pub warning: Option<Warning>,
}

/// A token pulled out of a URL, with the kind its path marker implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlToken {
    pub token: String,
    pub marker_kind: Option<ResourceKind>,
}

/// Maps an identifier or URL to a resource kind and token.
///
/// With `explicit_kind`, only token extraction runs.
pub fn resolve(
    identifier: &str,
    explicit_kind: Option<ResourceKind>,
) -> Result<Resolution, ValidationError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(ValidationError::EmptyField("identifier"));
    }

    let (raw_token, marker_kind) = if is_url(identifier) {
        let extracted = extract_token_from_url(identifier)?;
        (extracted.token, extracted.marker_kind)
    } else {
        (identifier.to_string(), None)
    };
    let token = Token::parse(&raw_token)?;

    if let Some(kind) = explicit_kind {
        return Ok(Resolution {
            kind,
            token,
            warning: None,
        });
    }

    if let Some(kind) = classify_token(token.as_str()).or(marker_kind) {
        return Ok(Resolution {
            kind,
            token,
            warning: None,
        });
    }

    let warning = Warning::new(
        WarningLevel::Warning,
        format!(
            "Could not infer the type of token {}; reading it as docx",
            token
        ),
    )
    .with_context(identifier.to_string());
    log::warn!("{}", warning.message);

    Ok(Resolution {
        kind: ResourceKind::Docx,
        token,
        warning: Some(warning),
    })
}

/// Classifies a raw token by its known prefixes.
pub fn classify_token(token: &str) -> Option<ResourceKind> {
    TOKEN_PREFIXES
        .iter()
        .find(|(prefix, _)| token.starts_with(prefix) || token.contains(prefix))
        .map(|(_, kind)| *kind)
}

/// Only an explicit http(s) scheme makes an identifier a URL; tokens may
/// themselves begin with "http".
fn is_url(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Extracts the resource token from a platform URL.
///
/// The segment following the first known marker wins; otherwise the last
/// non-empty segment. Query strings and fragments are never part of the
/// token.
pub fn extract_token_from_url(url: &str) -> Result<UrlToken, ValidationError> {
    let segments: Vec<String> = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .map(|segments| segments.map(str::to_string).collect())
            .unwrap_or_default(),
        // Not a well-formed URL; split what is there by hand
        Err(_) => strip_query(url).split('/').skip(1).map(str::to_string).collect(),
    };

    for (i, segment) in segments.iter().enumerate() {
        let Some((_, kind)) = URL_MARKERS.iter().find(|(marker, _)| marker == segment) else {
            continue;
        };
        if let Some(next) = segments.get(i + 1) {
            let token = strip_query(next);
            if !token.is_empty() {
                return Ok(UrlToken {
                    token: token.to_string(),
                    marker_kind: Some(*kind),
                });
            }
        }
    }

    segments
        .iter()
        .rev()
        .map(|segment| strip_query(segment))
        .find(|segment| !segment.is_empty() && !segment.contains(':'))
        .map(|token| UrlToken {
            token: token.to_string(),
            marker_kind: None,
        })
        .ok_or_else(|| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: "no token found in the URL path".to_string(),
        })
}

fn strip_query(segment: &str) -> &str {
    segment
        .split(['?', '#'])
        .next()
        .unwrap_or(segment)
}
