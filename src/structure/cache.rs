//! Process-wide permalink structure cache.
//!
//! # Responsibilities
//! - Hold the fetched structure for the lifetime of the process
//! - Coalesce concurrent first loads onto a single in-flight fetch
//! - Read a persisted copy before touching the network, write one back after
//!
//! # Design Decisions
//! - tokio OnceCell gives the NotLoaded → Loading → Loaded lifecycle for
//!   free: the first caller runs the fetch, everyone else awaits it
//! - The load result is latched, success or failure, so a broken backend
//!   surfaces the same StructureUnavailable on every later navigation
//!   instead of hammering the endpoint
//! - Persistence is best-effort: a write failure is logged, never fatal

use std::path::{Path, PathBuf};

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::client::CmsClient;
use crate::error::EngineError;
use crate::structure::{LoadedStructure, PermalinkStructure};

/// File name of the persisted structure copy inside the cache directory.
const STRUCTURE_CACHE_FILE: &str = "permalink-structure.json";

/// One-shot cache for the permalink structure.
pub struct StructureCache {
    /// Latched load result. Err carries the failure message verbatim.
    cell: OnceCell<Result<Arc<LoadedStructure>, String>>,
    /// Directory holding the persisted copy, if persistence is enabled.
    cache_dir: Option<PathBuf>,
}

impl StructureCache {
    /// Create an empty cache. `cache_dir` enables the persisted copy.
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self {
            cell: OnceCell::new(),
            cache_dir,
        }
    }

    /// The loaded structure, if the load already completed successfully.
    pub fn get(&self) -> Option<Arc<LoadedStructure>> {
        match self.cell.get() {
            Some(Ok(loaded)) => Some(loaded.clone()),
            _ => None,
        }
    }

    /// Get the structure, fetching it on first use.
    ///
    /// Callers arriving while a fetch is in flight await that same fetch;
    /// the CMS sees at most one structure request per process run.
    pub async fn load_or_fetch(
        &self,
        client: &CmsClient,
    ) -> Result<Arc<LoadedStructure>, EngineError> {
        let result = self
            .cell
            .get_or_init(|| async { self.load_inner(client).await })
            .await;
        match result {
            Ok(loaded) => Ok(loaded.clone()),
            Err(message) => Err(EngineError::StructureUnavailable(message.clone())),
        }
    }

    async fn load_inner(&self, client: &CmsClient) -> Result<Arc<LoadedStructure>, String> {
        if let Some(structure) = self.read_persisted() {
            tracing::info!(
                template = %structure.posts_template,
                "Permalink structure loaded from persisted copy"
            );
            return Ok(Arc::new(LoadedStructure::new(structure)));
        }

        let structure = client
            .get_permalink_structure()
            .await
            .map_err(|e| e.to_string())?;

        tracing::info!(
            template = %structure.posts_template,
            tag_base = %structure.tag_base,
            category_base = %structure.category_base,
            "Permalink structure fetched"
        );

        self.write_persisted(&structure);
        Ok(Arc::new(LoadedStructure::new(structure)))
    }

    fn persisted_path(&self) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(STRUCTURE_CACHE_FILE))
    }

    /// Read the persisted copy if present and well-formed.
    fn read_persisted(&self) -> Option<PermalinkStructure> {
        let path = self.persisted_path()?;
        if !Path::new(&path).exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(structure) => Some(structure),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed persisted structure");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read persisted structure");
                None
            }
        }
    }

    /// Write the structure back for the next process start.
    fn write_persisted(&self, structure: &PermalinkStructure) {
        let Some(path) = self.persisted_path() else {
            return;
        };
        let serialized = match serde_json::to_string(structure) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize structure for persistence");
                return;
            }
        };
        if let Err(e) = std::fs::write(&path, serialized) {
            tracing::warn!(path = %path.display(), error = %e, "Could not persist structure");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(template: &str) -> PermalinkStructure {
        PermalinkStructure {
            posts_template: template.to_string(),
            tag_base: String::new(),
            category_base: String::new(),
        }
    }

    #[tokio::test]
    async fn test_persisted_copy_short_circuits_the_fetch() {
        let dir = std::env::temp_dir().join("permalink-gateway-cache-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(STRUCTURE_CACHE_FILE);
        std::fs::write(
            &path,
            serde_json::to_string(&structure("%postname%")).unwrap(),
        )
        .unwrap();

        // Client pointed at a dead address: any network fetch would fail.
        let client = CmsClient::new("http://127.0.0.1:9", std::time::Duration::from_millis(200));
        let cache = StructureCache::new(Some(dir.clone()));
        let loaded = cache.load_or_fetch(&client).await.unwrap();
        assert_eq!(loaded.structure.posts_template, "%postname%");

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_failed_load_is_latched() {
        let client = CmsClient::new("http://127.0.0.1:9", std::time::Duration::from_millis(200));
        let cache = StructureCache::new(None);

        let first = cache.load_or_fetch(&client).await;
        assert!(matches!(first, Err(EngineError::StructureUnavailable(_))));

        // Second attempt must observe the latched failure without refetching.
        let second = cache.load_or_fetch(&client).await;
        assert!(matches!(second, Err(EngineError::StructureUnavailable(_))));
        assert!(cache.get().is_none());
    }

    #[tokio::test]
    async fn test_malformed_persisted_copy_is_ignored() {
        let dir = std::env::temp_dir().join("permalink-gateway-cache-malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(STRUCTURE_CACHE_FILE);
        std::fs::write(&path, "not json").unwrap();

        let cache = StructureCache::new(Some(dir.clone()));
        assert!(cache.read_persisted().is_none());

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
