//! Workspace umbrella crate for Folio.
//!
//! This crate stitches the similarity ranker and the image catalog together
//! so callers can configure and run "find similar" from a single entry
//! point.

pub mod config;

pub use catalog::{
    CatalogError, ImageId, ImageMetadata, ImageRecord, ImageRepository, InMemoryImageRepository,
    SimilarImage, SimilarPolicy, SimilarityService, MAX_TAGS,
};
pub use config::{ConfigLoadError, FolioConfig};
pub use similarity::{
    rank, Item, RankConfig, RankMetrics, Ranker, SimilarityError, SimilarityHit,
};

use std::sync::Arc;

/// Build a [`SimilarityService`] over `repository` using the weights and
/// limits from `config`.
pub fn similarity_service<R>(
    config: &FolioConfig,
    repository: Arc<R>,
) -> Result<SimilarityService<R>, ConfigLoadError>
where
    R: ImageRepository + ?Sized,
{
    let ranker = config.ranker()?;
    tracing::debug!(
        tag_weight = config.ranking.tag_weight,
        embedding_weight = config.ranking.embedding_weight,
        default_limit = config.similar.default_limit,
        max_limit = config.similar.max_limit,
        "similarity service configured"
    );
    Ok(SimilarityService::new(repository, ranker, config.similar))
}
