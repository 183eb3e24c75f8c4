//! Configuration service implementation.
//!
//! Loads `AppConfig` from ~/.config/act/config.toml and resolves the scene
//! catalog it points at.

use crate::paths::ActPaths;
use crate::storage::AtomicTomlFile;
use act_core::SceneCatalog;
use act_core::config::AppConfig;
use act_core::error::{ActError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Loads and caches the application configuration.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config path.
    pub fn new() -> Result<Self> {
        let path = ActPaths::config_file().map_err(|e| ActError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service with a custom config path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads config.toml. A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<AppConfig> {
        Ok(AtomicTomlFile::<AppConfig>::new(self.path.clone()).load_or_default()?)
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable file is logged and replaced by the defaults.
    pub fn get_config(&self) -> AppConfig {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return cached.clone();
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!(
                "[ConfigService] Failed to load {}: {}. Using defaults.",
                self.path.display(),
                e
            );
            AppConfig::default()
        });

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Resolves the catalog named by `config`, or the seeded one.
    pub fn load_catalog(&self, config: &AppConfig) -> Result<SceneCatalog> {
        match &config.catalog.path {
            Some(path) => load_catalog_file(path),
            None => Ok(SceneCatalog::seeded()),
        }
    }
}

/// Reads a catalog TOML file (`[[solo]]`, `[[duo]]`, `[[group]]` tables).
pub fn load_catalog_file(path: &Path) -> Result<SceneCatalog> {
    let catalog = AtomicTomlFile::<SceneCatalog>::new(path.to_path_buf())
        .load()?
        .ok_or_else(|| ActError::not_found("catalog", path.display().to_string()))?;

    catalog.validate()?;
    if catalog.is_empty() {
        return Err(ActError::config(format!(
            "catalog {} has no scenes",
            path.display()
        )));
    }

    tracing::info!(
        "[ConfigService] Loaded catalog from {} (solo={}, duo={}, group={})",
        path.display(),
        catalog.solo.len(),
        catalog.duo.len(),
        catalog.group.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::config::StalePolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
        assert_eq!(service.get_config(), AppConfig::default());
    }

    #[test]
    fn test_get_config_caches_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[store]\nstale_policy = \"discard_stale\"\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(
            service.get_config().store.stale_policy,
            StalePolicy::DiscardStale
        );

        fs::write(&path, "").unwrap();
        assert_eq!(
            service.get_config().store.stale_policy,
            StalePolicy::DiscardStale
        );

        service.invalidate_cache();
        assert_eq!(
            service.get_config().store.stale_policy,
            StalePolicy::LastResponseWins
        );
    }

    #[test]
    fn test_broken_config_falls_back_in_get_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[generation\nmodel = ").unwrap();

        let service = ConfigService::with_path(path);
        assert!(service.load().is_err());
        assert_eq!(service.get_config(), AppConfig::default());
    }

    #[test]
    fn test_catalog_defaults_to_seeded() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let catalog = service.load_catalog(&AppConfig::default()).unwrap();
        assert_eq!(catalog, SceneCatalog::seeded());
    }

    #[test]
    fn test_catalog_file_override() {
        let temp_dir = TempDir::new().unwrap();
        let catalog_path = temp_dir.path().join("catalog.toml");
        fs::write(
            &catalog_path,
            r#"
[[duo]]
id = "duo_custom"
title = "Bus Stop"
prompt = "Two commuters wait for a bus that never comes."
duration = 120
difficulty = "beginner"
characters = ["The optimist", "The realist"]
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.catalog.path = Some(catalog_path);
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        let catalog = service.load_catalog(&config).unwrap();

        assert!(catalog.solo.is_empty());
        assert_eq!(catalog.duo.len(), 1);
        assert_eq!(catalog.duo[0].title, "Bus Stop");
    }

    #[test]
    fn test_missing_catalog_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_catalog_file(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_catalog_entry_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let catalog_path = temp_dir.path().join("catalog.toml");
        fs::write(
            &catalog_path,
            "[[solo]]\nid = \"s\"\ntitle = \"\"\nprompt = \"p\"\nduration = 60\ndifficulty = \"beginner\"\n",
        )
        .unwrap();
        assert!(load_catalog_file(&catalog_path).unwrap_err().is_config());
    }
}
