//! # Folio Similarity (`similarity`)
//!
//! ## Purpose
//!
//! `similarity` ranks gallery images against a reference image. Each
//! candidate gets a blended score:
//!
//! - **Tag similarity**: Jaccard overlap of the two tag sets.
//! - **Embedding similarity**: cosine similarity of the two embeddings,
//!   each L2-normalized on its own.
//! - **Score**: `0.7 * tag + 0.3 * embedding` by default.
//!
//! Degenerate inputs never fail. Empty tag sets, missing or zero-length
//! embeddings, mismatched dimensions and zero vectors all resolve to a 0.0
//! component score.
//!
//! ## Core Types
//!
//! - [`Item`]: identifier, owner, tag set and optional embedding.
//! - [`SimilarityHit`]: a ranked candidate with its score breakdown.
//! - [`RankConfig`]: blending weights.
//! - [`Ranker`]: applies a [`RankConfig`] and optionally reports to a
//!   [`RankMetrics`] observer.
//!
//! ## Example Usage
//!
//! ```
//! use similarity::{rank, Item};
//!
//! let reference = Item::new("ref", "admin-1").with_tags(["cat", "pet"]);
//! let candidates = vec![
//!     Item::new("b", "admin-1").with_tags(["cat"]),
//!     Item::new("a", "admin-1").with_tags(["cat", "pet"]),
//! ];
//!
//! let hits = rank(&reference, candidates, 2);
//! assert_eq!(hits[0].item.id, "a");
//! assert!((hits[0].score - 0.7).abs() < 1e-6);
//! assert!((hits[1].score - 0.35).abs() < 1e-6);
//! ```
//!
//! Ownership filtering and excluding the reference from its own pool are the
//! caller's job; the ranker scores whatever it is given.

pub mod metrics;
pub mod ranker;
pub mod score;
pub mod types;

pub use crate::metrics::RankMetrics;
pub use crate::ranker::{rank, Ranker};
pub use crate::score::{cosine, jaccard, l2_normalize};
pub use crate::types::{Item, RankConfig, SimilarityError, SimilarityHit};
