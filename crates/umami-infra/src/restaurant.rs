//! JSON-file restaurant store.
//!
//! The file is a JSON array of `{id, name, filename}` records. It is read
//! fresh on every call: edits show up without a restart, and there is no
//! cache or lock to coordinate.

use std::path::{Path, PathBuf};

use umami_core::restaurant::{self, RestaurantRepository};
use umami_types::error::RestaurantError;
use umami_types::restaurant::Restaurant;

#[derive(Debug, Clone)]
pub struct JsonRestaurantStore {
    path: PathBuf,
}

impl JsonRestaurantStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a restaurant's document lives. Relative filenames resolve
    /// against the directory holding the restaurants file.
    pub fn document_path(&self, restaurant: &Restaurant) -> PathBuf {
        let filename = Path::new(&restaurant.filename);
        if filename.is_absolute() {
            return filename.to_path_buf();
        }
        self.path
            .parent()
            .map(|dir| dir.join(filename))
            .unwrap_or_else(|| filename.to_path_buf())
    }

    async fn load(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RestaurantError::Storage(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            RestaurantError::Malformed(format!("{}: {e}", self.path.display()))
        })
    }
}

impl RestaurantRepository for JsonRestaurantStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, RestaurantError> {
        let records = self.load().await?;
        let found = restaurant::find_by_id(&records, id);
        if found.is_none() {
            tracing::debug!(id, records = records.len(), "Restaurant not found");
        }
        Ok(found)
    }

    async fn list(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store_with(content: &str) -> (JsonRestaurantStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("restaurants.json");
        tokio::fs::write(&path, content).await.unwrap();
        (JsonRestaurantStore::new(path), tmp)
    }

    #[tokio::test]
    async fn test_find_by_id_hit_and_miss() {
        let (store, _tmp) = store_with(
            r#"[
                {"id": "A", "name": "Alpha", "filename": "a.md"},
                {"id": "B", "name": "Bravo", "filename": "b.txt"}
            ]"#,
        )
        .await;

        let found = store.find_by_id("B").await.unwrap().unwrap();
        assert_eq!(found.name, "Bravo");
        assert!(store.find_by_id("C").await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reads_fresh_on_each_lookup() {
        let (store, _tmp) = store_with("[]").await;
        assert!(store.find_by_id("A").await.unwrap().is_none());

        tokio::fs::write(
            store.path(),
            r#"[{"id": "A", "name": "Alpha", "filename": "a.md"}]"#,
        )
        .await
        .unwrap();
        assert!(store.find_by_id("A").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let (store, _tmp) = store_with(r#"{"id": "A"}"#).await;
        assert!(matches!(
            store.find_by_id("A").await,
            Err(RestaurantError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        let store = JsonRestaurantStore::new(tmp.path().join("nope.json"));
        assert!(matches!(
            store.list().await,
            Err(RestaurantError::Storage(_))
        ));
    }

    #[test]
    fn test_document_path_is_relative_to_store() {
        let store = JsonRestaurantStore::new("/data/restaurants.json");
        let restaurant = Restaurant {
            id: "A".to_string(),
            name: "Alpha".to_string(),
            filename: "docs/menu.md".to_string(),
        };
        assert_eq!(
            store.document_path(&restaurant),
            PathBuf::from("/data/docs/menu.md")
        );
    }
}
