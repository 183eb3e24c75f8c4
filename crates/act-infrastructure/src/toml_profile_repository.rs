//! TOML-based ProfileRepository implementation.

use crate::paths::ActPaths;
use crate::storage::AtomicTomlFile;
use act_core::error::{ActError, Result};
use act_core::profile::{Profile, ProfileRepository};
use async_trait::async_trait;
use std::path::PathBuf;

/// Stores the profile in ~/.config/act/profile.toml.
pub struct TomlProfileRepository {
    file: AtomicTomlFile<Profile>,
}

impl TomlProfileRepository {
    /// Creates a repository with the default path.
    pub fn new() -> Result<Self> {
        let path = ActPaths::profile_file().map_err(|e| ActError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a repository with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

#[async_trait]
impl ProfileRepository for TomlProfileRepository {
    async fn load(&self) -> Result<Profile> {
        let profile = self.file.load_or_default()?;
        tracing::debug!(
            "[TomlProfileRepository] Loaded profile: {} favorites, {} history entries",
            profile.favorites.len(),
            profile.history.len()
        );
        Ok(profile)
    }

    async fn save(&self, profile: &Profile) -> Result<()> {
        self.file.save(profile)?;
        tracing::debug!(
            "[TomlProfileRepository] Saved profile to {}",
            self.file.path().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::{Difficulty, Mode, PreferencesPatch, Scene};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_without_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlProfileRepository::with_path(temp_dir.path().join("profile.toml"));
        assert_eq!(repo.load().await.unwrap(), Profile::default());
    }

    #[tokio::test]
    async fn test_save_and_load_profile() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlProfileRepository::with_path(temp_dir.path().join("profile.toml"));

        let mut profile = Profile::default();
        profile.preferences.merge(PreferencesPatch::mode(Mode::Duo));
        let favorite = Scene::new(
            "duo",
            "First Meeting",
            "Two strangers meet in an unusual place.",
            Mode::Duo,
            180,
            Difficulty::Beginner,
        )
        .with_characters(vec!["A".into(), "B".into()])
        .with_theme(Some("mystery".into()));
        profile.favorites.push(favorite.clone());
        profile.history.push(favorite.clone());

        repo.save(&profile).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded.preferences.mode, Mode::Duo);
        assert_eq!(loaded.favorites.len(), 1);
        assert_eq!(loaded.favorites[0].id, favorite.id);
        assert_eq!(loaded.favorites[0].characters, favorite.characters);
        assert_eq!(loaded.history[0].theme.as_deref(), Some("mystery"));
    }
}
