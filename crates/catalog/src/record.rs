use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use similarity::Item;

use std::fmt;

use crate::error::CatalogError;
use crate::tags::merge_tags;

/// Maximum number of tags stored on a single image.
pub const MAX_TAGS: usize = 10;

/// Validated image identifier: 24 hexadecimal characters, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageId(String);

impl ImageId {
    pub const LEN: usize = 24;

    /// Parse an identifier, rejecting anything that is not 24 hex digits.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();
        if trimmed.len() != Self::LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CatalogError::InvalidId(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ImageId {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageId> for String {
    fn from(value: ImageId) -> Self {
        value.0
    }
}

/// File-level facts about the uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageMetadata {
    pub filename: String,
    pub height: u32,
    pub width: u32,
    pub filesize: u64,
}

/// A persisted gallery image as the catalog stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    pub id: ImageId,
    /// Admin that owns the image.
    pub admin_id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Embedding produced at upload time; empty when none was computed.
    #[serde(default)]
    pub embeddings: Vec<f32>,
    pub metadata: ImageMetadata,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ImageRecord {
    /// Replace the tags with cleaned, de-duplicated labels from one or more
    /// prediction groups, keeping at most [`MAX_TAGS`].
    pub fn with_predicted_tags(mut self, groups: &[Vec<String>]) -> Self {
        let mut tags = merge_tags(groups);
        tags.truncate(MAX_TAGS);
        self.tags = Some(tags);
        self
    }

    /// Build the rankable view of this record.
    pub fn to_item(&self) -> Item {
        Item::new(self.id.as_str(), self.admin_id.as_str())
            .with_tags(self.tags.iter().flatten().cloned())
            .with_embedding(self.embeddings.clone())
    }
}
