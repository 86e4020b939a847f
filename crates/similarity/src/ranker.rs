use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::RankMetrics;
use crate::score::{embedding_similarity, jaccard};
use crate::types::{Item, RankConfig, SimilarityError, SimilarityHit};


/// Ranks a candidate pool against a reference item by blended similarity.
///
/// The ranker is a pure function of its inputs. It does not filter by owner
/// or drop the reference from the pool; callers hand it exactly the
/// candidates that should be considered.
#[derive(Clone, Default)]
pub struct Ranker {
    config: RankConfig,
    metrics: Option<Arc<dyn RankMetrics>>,
}

impl fmt::Debug for Ranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranker")
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Ranker {
    /// Construct a ranker with explicit weights.
    pub fn new(config: RankConfig) -> Result<Self, SimilarityError> {
        config.validate()?;
        Ok(Self {
            config,
            metrics: None,
        })
    }

    /// Attach a metrics observer that is notified after every `rank` call.
    pub fn with_metrics(mut self, metrics: Arc<dyn RankMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Active blending weights.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Score a single candidate against the reference.
    pub fn score(&self, reference: &Item, candidate: Item) -> SimilarityHit {
        let tag_similarity = jaccard(&reference.tags, &candidate.tags);
        let embedding_similarity = embedding_similarity(reference.embedding(), candidate.embedding());
        let score = self.config.tag_weight * tag_similarity
            + self.config.embedding_weight * embedding_similarity;

        SimilarityHit {
            item: candidate,
            score,
            tag_similarity,
            embedding_similarity,
        }
    }

    /// Score every candidate, sort by score descending and keep the first
    /// `limit` entries.
    ///
    /// The sort is stable: candidates with equal scores keep the order they
    /// were supplied in. A `limit` of zero yields an empty result.
    pub fn rank<I>(&self, reference: &Item, candidates: I, limit: usize) -> Vec<SimilarityHit>
    where
        I: IntoIterator<Item = Item>,
    {
        let start = Instant::now();

        if limit == 0 {
            self.record(0, 0, start);
            return Vec::new();
        }

        let mut hits: Vec<SimilarityHit> = candidates
            .into_iter()
            .map(|candidate| self.score(reference, candidate))
            .collect();
        let pool = hits.len();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(limit);

        tracing::trace!(
            reference = %reference.id,
            candidates = pool,
            hits = hits.len(),
            "ranked candidate pool"
        );
        self.record(pool, hits.len(), start);
        hits
    }

    fn record(&self, candidates: usize, hits: usize, start: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.record_rank(candidates, hits, start.elapsed());
        }
    }
}

/// Rank `candidates` against `reference` with the default 0.7 / 0.3 weights.
pub fn rank<I>(reference: &Item, candidates: I, limit: usize) -> Vec<SimilarityHit>
where
    I: IntoIterator<Item = Item>,
{
    Ranker::default().rank(reference, candidates, limit)
}
