use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::collections::BTreeSet;

/// A rankable image: identity, owner, curated tags and an optional embedding.
///
/// Items are built per request from persisted records and dropped once the
/// response is produced. Tags form a set, so duplicates collapse and the
/// order they were supplied in does not matter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Opaque item identifier.
    pub id: String,
    /// Opaque identifier of the admin that owns the item.
    pub owner_id: String,
    /// Tag labels attached to the item.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Feature vector produced by the embedding model. `None` and an empty
    /// vector both mean "no embedding".
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Item {
    /// Create an item with no tags and no embedding.
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            tags: BTreeSet::new(),
            embedding: None,
        }
    }

    /// Replace the tag set; duplicate labels collapse.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Attach an embedding vector. An empty vector is stored as absent.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = if embedding.is_empty() {
            None
        } else {
            Some(embedding)
        };
        self
    }

    /// The embedding as a slice, if one is present and non-empty.
    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|v| !v.is_empty())
    }
}

/// A candidate paired with its blended similarity score.
///
/// `score` lies in [0, 1] in theory but is not clamped: a negative cosine
/// term can pull it slightly below zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityHit {
    /// The ranked candidate.
    pub item: Item,
    /// Weighted blend of the two component similarities.
    pub score: f32,
    /// Jaccard overlap between the tag sets.
    pub tag_similarity: f32,
    /// Cosine similarity between the normalized embeddings.
    pub embedding_similarity: f32,
}

/// Weights applied when blending tag and embedding similarity.
///
/// Tags dominate by default because they are curated labels; the embedding
/// refines the ordering. The weights are not renormalized when one signal is
/// missing, so an item without an embedding tops out at `tag_weight`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankConfig {
    /// Weight of the Jaccard tag similarity.
    #[serde(default = "RankConfig::default_tag_weight")]
    pub tag_weight: f32,
    /// Weight of the cosine embedding similarity.
    #[serde(default = "RankConfig::default_embedding_weight")]
    pub embedding_weight: f32,
}

impl RankConfig {
    pub const DEFAULT_TAG_WEIGHT: f32 = 0.7;
    pub const DEFAULT_EMBEDDING_WEIGHT: f32 = 0.3;

    pub(crate) fn default_tag_weight() -> f32 {
        Self::DEFAULT_TAG_WEIGHT
    }

    pub(crate) fn default_embedding_weight() -> f32 {
        Self::DEFAULT_EMBEDDING_WEIGHT
    }

    /// Validate that both weights are finite and within [0.0, 1.0].
    pub fn validate(&self) -> Result<(), SimilarityError> {
        for (name, weight) in [
            ("tag_weight", self.tag_weight),
            ("embedding_weight", self.embedding_weight),
        ] {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(SimilarityError::InvalidConfig(format!(
                    "{name} must be between 0.0 and 1.0, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            tag_weight: Self::DEFAULT_TAG_WEIGHT,
            embedding_weight: Self::DEFAULT_EMBEDDING_WEIGHT,
        }
    }
}

/// Errors produced by the similarity layer.
///
/// Ranking itself never fails; only configuration can be rejected.
#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    /// Invalid ranking configuration.
    #[error("invalid rank config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RankConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tag_weight, 0.7);
        assert_eq!(cfg.embedding_weight, 0.3);
    }

    #[test]
    fn out_of_range_weight_rejected() {
        let cfg = RankConfig {
            tag_weight: 1.5,
            ..RankConfig::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            SimilarityError::InvalidConfig(msg) => assert!(msg.contains("tag_weight")),
        }
    }

    #[test]
    fn nan_weight_rejected() {
        let cfg = RankConfig {
            embedding_weight: f32::NAN,
            ..RankConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn duplicate_tags_collapse() {
        let item = Item::new("a", "owner").with_tags(["cat", "pet", "cat"]);
        assert_eq!(item.tags.len(), 2);
    }

    #[test]
    fn empty_embedding_is_absent() {
        let item = Item::new("a", "owner").with_embedding(Vec::new());
        assert!(item.embedding.is_none());
        assert!(item.embedding().is_none());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let item: Item =
            serde_json::from_str(r#"{"id":"a","owner_id":"o"}"#).expect("deserialize item");
        assert!(item.tags.is_empty());
        assert!(item.embedding.is_none());
    }
}
