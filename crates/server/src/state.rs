use crate::config::ServerConfig;
use crate::error::ServerResult;
use catalog::{ImageRepository, InMemoryImageRepository, SimilarityService};
use folio::FolioConfig;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Image catalog (shared across requests)
    pub repository: Arc<dyn ImageRepository>,

    /// Similarity service over the catalog
    pub similarity: Arc<SimilarityService<dyn ImageRepository>>,

    /// When this state was built, for uptime reporting
    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state
    ///
    /// Ranking settings come from `pipeline_config` when set. The catalog is
    /// seeded from `catalog_path` when set and starts empty otherwise.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let folio_config = match &config.pipeline_config {
            Some(path) => FolioConfig::from_file(path)?,
            None => FolioConfig::default(),
        };

        let repository = match &config.catalog_path {
            Some(path) => InMemoryImageRepository::load_json(path)?,
            None => {
                tracing::warn!("no catalog_path configured, starting with an empty catalog");
                InMemoryImageRepository::new()
            }
        };

        Self::with_repository(config, &folio_config, Arc::new(repository))
    }

    /// Build state around an existing repository.
    pub fn with_repository(
        config: ServerConfig,
        folio_config: &FolioConfig,
        repository: Arc<dyn ImageRepository>,
    ) -> ServerResult<Self> {
        let similarity = folio::similarity_service(folio_config, repository.clone())?;

        Ok(Self {
            config: Arc::new(config),
            repository,
            similarity: Arc::new(similarity),
            started_at: Instant::now(),
        })
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
