//! Saved-analysis storage backends.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use archwright_core::{Analysis, StorageConfig};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// An ordered list of saved analyses, oldest first.
///
/// Positions are indices into that list as returned by [`list`](Self::list).
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// All saved analyses in insertion order.
    async fn list(&self) -> Result<Vec<Analysis>, StoreError>;

    /// Append an analysis. Returns its position.
    async fn save(&self, analysis: Analysis) -> Result<usize, StoreError>;

    /// The analysis at `index`, if any.
    async fn get(&self, index: usize) -> Result<Option<Analysis>, StoreError>;

    /// Remove and return the analysis at `index`, if any.
    async fn delete(&self, index: usize) -> Result<Option<Analysis>, StoreError>;

    /// Remove everything.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Saved analyses as a single JSON array on disk.
///
/// Every change reads the whole list, edits it and writes it back.
/// A missing file is an empty list.
pub struct FileAnalysisStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileAnalysisStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Analysis>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, analyses: &[Analysis]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(analyses)?;
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        tokio::fs::write(&self.path, json).await.map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), count = analyses.len(), "Saved analyses written");
        Ok(())
    }
}

#[async_trait]
impl AnalysisStore for FileAnalysisStore {
    async fn list(&self) -> Result<Vec<Analysis>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    async fn save(&self, analysis: Analysis) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;
        let mut analyses = self.read_all().await?;
        analyses.push(analysis);
        self.write_all(&analyses).await?;
        Ok(analyses.len() - 1)
    }

    async fn get(&self, index: usize) -> Result<Option<Analysis>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.into_iter().nth(index))
    }

    async fn delete(&self, index: usize) -> Result<Option<Analysis>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut analyses = self.read_all().await?;
        if index >= analyses.len() {
            return Ok(None);
        }
        let removed = analyses.remove(index);
        self.write_all(&analyses).await?;
        Ok(Some(removed))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write_all(&[]).await
    }
}

/// Saved analyses kept in memory only.
#[derive(Default)]
pub struct MemoryAnalysisStore {
    analyses: Mutex<Vec<Analysis>>,
}

impl MemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn list(&self) -> Result<Vec<Analysis>, StoreError> {
        Ok(self.analyses.lock().await.clone())
    }

    async fn save(&self, analysis: Analysis) -> Result<usize, StoreError> {
        let mut analyses = self.analyses.lock().await;
        analyses.push(analysis);
        Ok(analyses.len() - 1)
    }

    async fn get(&self, index: usize) -> Result<Option<Analysis>, StoreError> {
        Ok(self.analyses.lock().await.get(index).cloned())
    }

    async fn delete(&self, index: usize) -> Result<Option<Analysis>, StoreError> {
        let mut analyses = self.analyses.lock().await;
        Ok((index < analyses.len()).then(|| analyses.remove(index)))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.analyses.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::snapshot;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn analysis(name: &str) -> Analysis {
        snapshot(name).to_analysis(name, Utc::now())
    }

    fn names(analyses: &[Analysis]) -> Vec<&str> {
        analyses.iter().map(|a| a.name.as_str()).collect()
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileAnalysisStore::new(dir.path().join("analyses.json"));
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.get(0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_appends_in_order_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("analyses.json");
        let store = FileAnalysisStore::new(&path);

        assert_eq!(store.save(analysis("first")).await.unwrap(), 0);
        assert_eq!(store.save(analysis("second")).await.unwrap(), 1);

        let reopened = FileAnalysisStore::new(&path);
        let listed = reopened.list().await.unwrap();
        assert_eq!(names(&listed), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn file_store_delete_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileAnalysisStore::new(dir.path().join("analyses.json"));
        for name in ["a", "b", "c"] {
            store.save(analysis(name)).await.unwrap();
        }

        let removed = store.delete(1).await.unwrap().unwrap();
        assert_eq!(removed.name, "b");
        assert!(store.delete(5).await.unwrap().is_none());
        assert_eq!(names(&store.list().await.unwrap()), vec!["a", "c"]);

        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_store_writes_wire_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyses.json");
        let store = FileAnalysisStore::new(&path);
        let saved = snapshot("site")
            .with_infrastructure_code("resource \"azurerm_resource_group\" \"rg\" {}")
            .to_analysis("site", Utc::now());
        store.save(saved).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let record = &raw[0];
        assert_eq!(record["name"], "site");
        assert!(record["date"].is_string());
        assert!(record["terraform"].is_string());
        assert!(record["architecture"]["architecture"]["core_services"].is_array());
        assert!(record.get("diagram").is_none());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyses.json");
        std::fs::write(&path, "{ not a list").unwrap();

        let err = FileAnalysisStore::new(&path).list().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn unwritable_path_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let path = dir.path().join("analyses.json");
        std::fs::create_dir(&path).unwrap();

        let err = FileAnalysisStore::new(&path).clear().await.unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[tokio::test]
    async fn memory_store_behaves_like_a_list() {
        let store = MemoryAnalysisStore::new();
        store.save(analysis("x")).await.unwrap();
        store.save(analysis("y")).await.unwrap();

        assert_eq!(store.get(1).await.unwrap().unwrap().name, "y");
        assert_eq!(store.delete(0).await.unwrap().unwrap().name, "x");
        assert_eq!(names(&store.list().await.unwrap()), vec!["y"]);
        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
