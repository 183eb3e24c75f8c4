//! Persisted subset of the scene store.

use crate::error::Result;
use crate::preferences::Preferences;
use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// Preferences, favorites and history as they survive between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub favorites: Vec<Scene>,
    #[serde(default)]
    pub history: Vec<Scene>,
}

/// Storage for the profile.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the saved profile, or the default one when nothing was saved yet.
    async fn load(&self) -> Result<Profile>;

    async fn save(&self, profile: &Profile) -> Result<()>;
}
