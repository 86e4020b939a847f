//! # Folio Catalog (`catalog`)
//!
//! The catalog owns everything around the ranker that touches stored
//! images:
//!
//! - [`ImageRecord`] / [`ImageId`]: the persisted image shape and its
//!   validated identifier.
//! - [`ImageRepository`]: read contract over stored images, with
//!   [`InMemoryImageRepository`] as the process-local implementation.
//! - [`SimilarityService`]: resolves the requested result count, loads the
//!   reference image, gathers the same admin's other images and hands them to
//!   [`similarity::Ranker`].
//! - [`tags`]: clean-up of labels produced by the tagging models.
//!
//! ```no_run
//! use std::sync::Arc;
//! use catalog::{InMemoryImageRepository, SimilarityService};
//!
//! # async fn demo() -> Result<(), catalog::CatalogError> {
//! let repo = Arc::new(InMemoryImageRepository::load_json("catalog.json")?);
//! let service = SimilarityService::with_defaults(repo);
//! for hit in service.find_similar("65a1b2c3d4e5f60718293a4b", None).await? {
//!     println!("{} score={}", hit.image.id, hit.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod record;
pub mod repository;
pub mod service;
pub mod tags;

pub use crate::error::CatalogError;
pub use crate::record::{ImageId, ImageMetadata, ImageRecord, MAX_TAGS};
pub use crate::repository::{ImageRepository, InMemoryImageRepository};
pub use crate::service::{SimilarImage, SimilarPolicy, SimilarityService};
