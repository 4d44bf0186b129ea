//! User storage trait and implementations

use crate::error::Result;
use async_trait::async_trait;
use auth_core::User;
use std::path::{Path, PathBuf};
use tokio::fs;

const USER_FILE: &str = "user.json";

/// User storage trait
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load the stored user, if any
    async fn get(&self) -> Result<Option<User>>;

    /// Persist the user record
    async fn set(&self, user: &User) -> Result<()>;

    /// Remove the stored user
    async fn clear(&self) -> Result<()>;
}

/// File-based user storage, partitioned as `<base>/<namespace>/<store>/`
#[derive(Debug, Clone)]
pub struct FileUserStore {
    store_path: PathBuf,
}

impl FileUserStore {
    pub fn new<P: AsRef<Path>>(base_path: P, namespace: &str, store_name: &str) -> Self {
        Self {
            store_path: base_path.as_ref().join(namespace).join(store_name),
        }
    }

    fn user_path(&self) -> PathBuf {
        self.store_path.join(USER_FILE)
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn get(&self) -> Result<Option<User>> {
        let path = self.user_path();

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).await?;
        let user: User = serde_json::from_str(&contents)?;

        Ok(Some(user))
    }

    async fn set(&self, user: &User) -> Result<()> {
        fs::create_dir_all(&self.store_path).await?;

        let contents = serde_json::to_string_pretty(user)?;
        fs::write(self.user_path(), contents).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.user_path();

        if path.exists() {
            fs::remove_file(&path).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_set_and_get() {
        let dir = tempdir().unwrap();
        let store = FileUserStore::new(dir.path(), "eha", "auth");

        let user = User::new("test", vec!["editor".to_string()]);
        store.set(&user).await.unwrap();

        let loaded = store.get().await.unwrap().unwrap();
        assert_eq!(loaded, user);
    }

    #[tokio::test]
    async fn test_file_store_empty() {
        let dir = tempdir().unwrap();
        let store = FileUserStore::new(dir.path(), "eha", "auth");

        let loaded = store.get().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_file_store_clear() {
        let dir = tempdir().unwrap();
        let store = FileUserStore::new(dir.path(), "eha", "auth");

        let user = User::new("test", vec![]);
        store.set(&user).await.unwrap();
        assert!(store.get().await.unwrap().is_some());

        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileUserStore::new(dir.path(), "eha", "auth");

        store.clear().await.unwrap();
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_namespaces_do_not_collide() {
        let dir = tempdir().unwrap();
        let store_a = FileUserStore::new(dir.path(), "app-a", "auth");
        let store_b = FileUserStore::new(dir.path(), "app-b", "auth");

        let user = User::new("test", vec![]);
        store_a.set(&user).await.unwrap();

        assert!(store_a.get().await.unwrap().is_some());
        assert!(store_b.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_surfaces_serialization_error() {
        let dir = tempdir().unwrap();
        let store = FileUserStore::new(dir.path(), "eha", "auth");

        std::fs::create_dir_all(dir.path().join("eha").join("auth")).unwrap();
        std::fs::write(dir.path().join("eha").join("auth").join("user.json"), "{not json").unwrap();

        let result = store.get().await;
        assert!(matches!(result, Err(crate::StoreError::Serialization(_))));
    }
}
