use async_trait::async_trait;

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::error::CatalogError;
use crate::record::{ImageId, ImageRecord};

/// Read access to persisted image records.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Look up a single image.
    async fn find_by_id(&self, id: &ImageId) -> Result<Option<ImageRecord>, CatalogError>;

    /// All images owned by `owner_id` except `exclude`, in storage order.
    async fn find_by_owner(
        &self,
        owner_id: &str,
        exclude: &ImageId,
    ) -> Result<Vec<ImageRecord>, CatalogError>;

    /// Number of stored images.
    async fn count(&self) -> Result<usize, CatalogError>;
}

/// Insertion-ordered, process-local image store.
#[derive(Debug, Default)]
pub struct InMemoryImageRepository {
    records: RwLock<Vec<ImageRecord>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository holding `records` in the given order.
    pub fn from_records(records: impl IntoIterator<Item = ImageRecord>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.insert(record);
        }
        repo
    }

    /// Seed a repository from a JSON file containing an array of records.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        let records: Vec<ImageRecord> = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            records = records.len(),
            "loaded image catalog seed"
        );
        Ok(Self::from_records(records))
    }

    /// Store a record. A record with an existing id replaces it in place.
    pub fn insert(&self, record: ImageRecord) {
        let mut guard = self
            .records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => guard.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<ImageRecord>> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn find_by_id(&self, id: &ImageId) -> Result<Option<ImageRecord>, CatalogError> {
        Ok(self.read().iter().find(|record| &record.id == id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
        exclude: &ImageId,
    ) -> Result<Vec<ImageRecord>, CatalogError> {
        Ok(self
            .read()
            .iter()
            .filter(|record| record.admin_id == owner_id && &record.id != exclude)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ImageMetadata;
    use std::io::Write;

    fn record(id: &str, admin: &str) -> ImageRecord {
        ImageRecord {
            id: ImageId::parse(id).expect("valid id"),
            admin_id: admin.into(),
            project_id: "project-1".into(),
            title: Some(format!("image {id}")),
            caption: None,
            tags: Some(vec!["cat".into()]),
            embeddings: Vec::new(),
            metadata: ImageMetadata {
                filename: "a.jpg".into(),
                height: 1,
                width: 1,
                filesize: 1,
            },
            created_at: None,
            updated_at: None,
        }
    }

    const A: &str = "000000000000000000000001";
    const B: &str = "000000000000000000000002";
    const C: &str = "000000000000000000000003";
    const D: &str = "000000000000000000000004";

    #[tokio::test]
    async fn find_by_owner_excludes_self_and_other_owners() {
        let repo = InMemoryImageRepository::from_records([
            record(A, "admin-1"),
            record(B, "admin-2"),
            record(C, "admin-1"),
            record(D, "admin-1"),
        ]);

        let exclude = ImageId::parse(A).expect("valid id");
        let found = repo
            .find_by_owner("admin-1", &exclude)
            .await
            .expect("query");

        let ids: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![C, D]);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_when_missing() {
        let repo = InMemoryImageRepository::from_records([record(A, "admin-1")]);
        let missing = ImageId::parse(B).expect("valid id");
        assert!(repo.find_by_id(&missing).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn insert_replaces_existing_id_in_place() {
        let repo = InMemoryImageRepository::from_records([record(A, "admin-1"), record(B, "admin-1")]);
        let mut replacement = record(A, "admin-1");
        replacement.title = Some("renamed".into());
        repo.insert(replacement);

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.count().await.expect("count"), 2);
        let id = ImageId::parse(A).expect("valid id");
        let stored = repo.find_by_id(&id).await.expect("query").expect("present");
        assert_eq!(stored.title.as_deref(), Some("renamed"));
    }

    #[test]
    fn load_json_reads_seed_file() {
        let records = vec![record(A, "admin-1"), record(B, "admin-2")];
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(serde_json::to_string(&records).expect("encode").as_bytes())
            .expect("write seed");

        let repo = InMemoryImageRepository::load_json(file.path()).expect("load seed");
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn load_json_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write seed");

        let err = InMemoryImageRepository::load_json(file.path()).expect_err("bad seed");
        assert!(matches!(err, CatalogError::SeedParse(_)));
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = InMemoryImageRepository::load_json("/definitely/not/here.json")
            .expect_err("missing seed");
        assert!(matches!(err, CatalogError::SeedRead(_)));
    }
}
