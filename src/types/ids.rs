//! Opaque platform identifiers.
//!
//! Feishu hands out tokens for every resource instance. They carry no
//! checksum or fixed length, so validation stops at "non-empty, no
//! whitespace, no path separators". Anything stronger would reject tokens
//! the platform happily accepts.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for identifiers with phantom markers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker for resource tokens (document, sheet, app, node, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenMarker;

/// Marker for wiki space identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceMarker;

pub type Token = Id<TokenMarker>;
pub type SpaceId = Id<SpaceMarker>;

impl<T> Id<T> {
    /// Validates and wraps a raw identifier.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("token"));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(ValidationError::InvalidToken(format!(
                "'{}' contains whitespace or path separators",
                trimmed
            )));
        }
        Ok(Self::from_normalized(trimmed.to_string()))
    }

    /// Wraps a value the platform itself returned (internal use)
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_normalized(value))
    }
}
