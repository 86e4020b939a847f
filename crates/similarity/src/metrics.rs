// Metrics hooks for the `similarity` crate.
//
// A `Ranker` optionally owns an `Arc<dyn RankMetrics>` handed to it at
// construction; every call to `Ranker::rank` then reports pool size, hit
// count and latency. There is no process-wide recorder.
use std::time::Duration;

/// Metrics observer for ranking calls.
pub trait RankMetrics: Send + Sync {
    /// Record the outcome of a ranking call.
    ///
    /// `candidates` is the size of the pool that was scored, `hits` the number
    /// of entries returned after truncation, and `latency` the wall-clock time
    /// spent scoring and sorting.
    fn record_rank(&self, candidates: usize, hits: usize, latency: Duration);
}
