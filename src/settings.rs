//! Persistent endpoint settings.
//!
//! The endpoint is stored as JSON in the data directory and survives process
//! restarts. Writes go through a temp file and a rename so a crash never
//! leaves a truncated settings file behind.

use crate::{config::AppConfig, endpoint::Endpoint};
use anyhow::{Context, Result};
use log::info;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    const FILE_NAME: &str = "settings.json";

    /// Store inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(Self::FILE_NAME),
        }
    }

    /// Store inside the configured data directory
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.data_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored endpoint, an unconfigured one if nothing is stored yet
    pub fn load(&self) -> Result<Endpoint> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Endpoint::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read settings file {}", self.path.display())
                });
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse settings file {}", self.path.display()))
    }

    /// Update host and/or port
    ///
    /// Empty values keep what is stored; non-empty values replace it.
    pub fn update(&self, host: Option<&str>, port: Option<&str>) -> Result<Endpoint> {
        let endpoint = self.load()?.merged(host, port);
        self.save(&endpoint)?;

        info!("stored endpoint {endpoint}");
        Ok(endpoint)
    }

    /// Forget the stored endpoint. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("cleared stored endpoint");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("failed to remove settings file {}", self.path.display())
            }),
        }
    }

    fn save(&self, endpoint: &Endpoint) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("failed to create data directory")?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let content =
            serde_json::to_string_pretty(endpoint).context("failed to serialize settings")?;

        fs::write(&tmp_path, content)
            .with_context(|| format!("failed to write settings file {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace settings file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SettingsStore) {
        let dir = TempDir::new().expect("failed to create temp directory");
        let store = SettingsStore::new(dir.path().join("nested"));
        (dir, store)
    }

    #[test]
    fn load_without_file_is_unconfigured() {
        let (_dir, store) = store();
        let endpoint = store.load().unwrap();
        assert_eq!(endpoint, Endpoint::default());
        assert!(!endpoint.is_configured());
    }

    #[test]
    fn update_creates_directory_and_persists() {
        let (_dir, store) = store();

        let endpoint = store.update(Some("192.168.0.2"), Some("80")).unwrap();
        assert_eq!(endpoint, Endpoint::new("192.168.0.2", "80"));
        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());

        assert_eq!(store.load().unwrap(), endpoint);
    }

    #[test]
    fn update_keeps_values_for_empty_input() {
        let (_dir, store) = store();
        store.update(Some("192.168.0.2"), Some("80")).unwrap();

        let endpoint = store.update(Some(""), Some("8080")).unwrap();
        assert_eq!(endpoint, Endpoint::new("192.168.0.2", "8080"));

        let endpoint = store.update(None, None).unwrap();
        assert_eq!(endpoint, Endpoint::new("192.168.0.2", "8080"));
    }

    #[test]
    fn clear_removes_endpoint() {
        let (_dir, store) = store();
        store.update(Some("192.168.0.2"), Some("80")).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Endpoint::default());

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn load_rejects_corrupt_file() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("failed to parse settings file"));
    }
}
