use serde::{Deserialize, Serialize};
use similarity::{Ranker, SimilarityHit};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::error::CatalogError;
use crate::record::{ImageId, ImageRecord};
use crate::repository::ImageRepository;

/// Limits applied to "find similar" requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimilarPolicy {
    /// Result count used when the caller gives none, or a negative one.
    #[serde(default = "SimilarPolicy::default_limit")]
    pub default_limit: usize,
    /// Upper bound on the result count a caller may request.
    #[serde(default = "SimilarPolicy::default_max_limit")]
    pub max_limit: usize,
}

impl SimilarPolicy {
    pub(crate) fn default_limit() -> usize {
        3
    }

    pub(crate) fn default_max_limit() -> usize {
        50
    }

    /// Resolve a requested count.
    ///
    /// Missing or negative values fall back to `default_limit`; zero is kept
    /// and yields an empty result; anything else is capped at `max_limit`.
    pub fn resolve(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_limit,
            Some(n) if n < 0 => self.default_limit,
            Some(n) => usize::try_from(n)
                .unwrap_or(usize::MAX)
                .min(self.max_limit),
        }
    }
}

impl Default for SimilarPolicy {
    fn default() -> Self {
        Self {
            default_limit: Self::default_limit(),
            max_limit: Self::default_max_limit(),
        }
    }
}

/// An image returned from a similarity query, with its score breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarImage {
    pub image: ImageRecord,
    pub score: f32,
    pub tag_similarity: f32,
    pub embedding_similarity: f32,
}

/// Answers "find similar" and "compare" requests over an [`ImageRepository`].
pub struct SimilarityService<R: ImageRepository + ?Sized> {
    repository: Arc<R>,
    ranker: Ranker,
    policy: SimilarPolicy,
}

impl<R: ImageRepository + ?Sized> SimilarityService<R> {
    pub fn new(repository: Arc<R>, ranker: Ranker, policy: SimilarPolicy) -> Self {
        Self {
            repository,
            ranker,
            policy,
        }
    }

    /// Service with the default 0.7 / 0.3 weights and a default limit of 3.
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self::new(repository, Ranker::default(), SimilarPolicy::default())
    }

    pub fn policy(&self) -> &SimilarPolicy {
        &self.policy
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Rank the other images of the same admin against image `id`.
    ///
    /// `limit` is resolved through the service's [`SimilarPolicy`].
    pub async fn find_similar(
        &self,
        id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SimilarImage>, CatalogError> {
        self.find_similar_top(id, self.policy.resolve(limit)).await
    }

    /// Like [`find_similar`](Self::find_similar) with an already resolved
    /// result count. The policy cap is not applied here.
    pub async fn find_similar_top(
        &self,
        id: &str,
        limit: usize,
    ) -> Result<Vec<SimilarImage>, CatalogError> {
        let start = Instant::now();
        let id = ImageId::parse(id)?;

        let reference = self.fetch(&id).await?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let pool = self
            .repository
            .find_by_owner(&reference.admin_id, &id)
            .await?;
        let pool_size = pool.len();

        let reference_item = reference.to_item();
        let hits = self
            .ranker
            .rank(&reference_item, pool.iter().map(ImageRecord::to_item), limit);
        let results = attach_records(hits, pool);

        tracing::debug!(
            image_id = %id,
            owner = %reference.admin_id,
            candidates = pool_size,
            limit,
            results = results.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "similar images ranked"
        );
        Ok(results)
    }

    /// Score image `right` against image `left`, regardless of owner.
    pub async fn compare(&self, left: &str, right: &str) -> Result<SimilarImage, CatalogError> {
        let left = self.fetch(&ImageId::parse(left)?).await?;
        let right = self.fetch(&ImageId::parse(right)?).await?;

        let hit = self.ranker.score(&left.to_item(), right.to_item());
        Ok(SimilarImage {
            image: right,
            score: hit.score,
            tag_similarity: hit.tag_similarity,
            embedding_similarity: hit.embedding_similarity,
        })
    }

    async fn fetch(&self, id: &ImageId) -> Result<ImageRecord, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

/// Pair ranked hits back up with the records they were built from.
fn attach_records(hits: Vec<SimilarityHit>, pool: Vec<ImageRecord>) -> Vec<SimilarImage> {
    let mut records: HashMap<String, ImageRecord> = pool
        .into_iter()
        .map(|record| (record.id.as_str().to_owned(), record))
        .collect();
    hits.into_iter()
        .filter_map(|hit| {
            let image = records.remove(&hit.item.id)?;
            Some(SimilarImage {
                image,
                score: hit.score,
                tag_similarity: hit.tag_similarity,
                embedding_similarity: hit.embedding_similarity,
            })
        })
        .collect()
}
