//! Implements ProfileStore using a JSON file.
//!
//! Holds one carrier/account/password triple.

use crate::domain::{LoginProfile, ProfileStoreError};
use crate::ports::ProfileStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// JSON file-based profile storage.
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ProfileStore for JsonProfileStore {
    async fn try_read(&self) -> Option<LoginProfile> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no profile file");
                return None;
            }
        };
        let profile: LoginProfile = match serde_json::from_str(&raw) {
            Ok(p) => p,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "profile file is malformed");
                return None;
            }
        };
        if profile.account.trim().is_empty() || profile.password.is_empty() {
            warn!(path = %self.path.display(), "profile file has an empty account or password");
            return None;
        }
        info!(path = %self.path.display(), carrier = %profile.carrier, "loaded profile");
        Some(profile)
    }

    /// Atomic save: write temp file, sync_all, rename over the target.
    async fn try_write(&self, profile: &LoginProfile) -> Result<(), ProfileStoreError> {
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| ProfileStoreError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ProfileStoreError::Io(format!("create profile dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| ProfileStoreError::Io(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| ProfileStoreError::Io(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| ProfileStoreError::Io(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| ProfileStoreError::Io(format!("atomic rename failed: {}", e)))?;

        info!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonProfileStore::new(dir.path().join("login_profile.json"));
        assert!(store.try_read().await.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = JsonProfileStore::new(dir.path().join("nested/login_profile.json"));
        let profile = LoginProfile::new(CarrierKind::MobileB, "114514", "1919810");

        store.try_write(&profile).await.unwrap();
        assert_eq!(store.try_read().await, Some(profile));
        assert!(!dir.path().join("nested/login_profile.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_malformed_or_unknown_carrier_reads_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("login_profile.json");
        let store = JsonProfileStore::new(&path);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(store.try_read().await.is_none());

        std::fs::write(
            &path,
            r#"{"carrier":"Satellite","account":"114514","password":"x"}"#,
        )
        .unwrap();
        assert!(store.try_read().await.is_none());

        std::fs::write(&path, r#"{"carrier":"MobileB","account":"","password":"x"}"#).unwrap();
        assert!(store.try_read().await.is_none());

        std::fs::write(&path, r#"{"carrier":"MobileB","account":"114514","password":""}"#).unwrap();
        assert!(store.try_read().await.is_none());
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_under_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a dir").unwrap();
        let store = JsonProfileStore::new(blocker.join("login_profile.json"));
        let profile = LoginProfile::new(CarrierKind::TelecomA, "a", "b");

        assert!(matches!(
            store.try_write(&profile).await,
            Err(ProfileStoreError::Io(_))
        ));
    }
}
