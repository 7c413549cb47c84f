use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::RecipeError;
use crate::model::RecipeSummary;

/// Snapshot of the last shown recipe list, kept as one JSON file
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "recipes.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Read the snapshot, distinguishing "no file" (`Ok(None)`) from unreadable content.
    pub async fn try_load(&self) -> Result<Option<Vec<RecipeSummary>>, RecipeError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Previously saved list, or empty when there is none or it can't be parsed.
    pub async fn load(&self) -> Vec<RecipeSummary> {
        match self.try_load().await {
            Ok(Some(recipes)) => {
                debug!(
                    "Restored {} recipes from {}",
                    recipes.len(),
                    self.path.display()
                );
                recipes
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(
                    "Ignoring unreadable snapshot {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the snapshot with `recipes`.
    pub async fn save(&self, recipes: &[RecipeSummary]) -> Result<(), RecipeError> {
        let json = serde_json::to_string(recipes)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Replace by rename so an interrupted write leaves the old snapshot intact
        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!("Saved {} recipes to {}", recipes.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<RecipeSummary> {
        vec![
            RecipeSummary {
                id: 2,
                title: "Gazpacho".to_string(),
                image: Some("https://img/2.jpg".to_string()),
            },
            RecipeSummary {
                id: 1,
                title: "Tortilla".to_string(),
                image: None,
            },
        ]
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("recipes.json"));
        assert!(cache.try_load().await.unwrap().is_none());
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("recipes.json"));
        cache.save(&sample()).await.unwrap();
        assert_eq!(cache.load().await, sample());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("recipes.json"));
        cache.save(&sample()).await.unwrap();
        cache.save(&sample()[..1]).await.unwrap();
        assert_eq!(cache.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupted_snapshot_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = LocalCache::new(&path);
        assert!(matches!(
            cache.try_load().await,
            Err(RecipeError::Serialization(_))
        ));
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_save_keeps_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let cache = LocalCache::new(&path);
        cache.save(&sample()).await.unwrap();

        // A write that died halfway only ever touches the staging file
        std::fs::write(dir.path().join("recipes.json.tmp"), "[{\"id\": 3, \"ti").unwrap();
        assert_eq!(cache.load().await, sample());

        cache.save(&sample()[..1]).await.unwrap();
        assert_eq!(cache.load().await, sample()[..1].to_vec());
        assert!(!dir.path().join("recipes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("nested").join("state").join("recipes.json"));
        cache.save(&sample()).await.unwrap();
        assert_eq!(cache.load().await, sample());
    }
}
