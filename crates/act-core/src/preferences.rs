//! User preferences owned by the scene store.

use crate::scene::{Difficulty, Mode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub mode: Mode,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub themes: BTreeSet<String>,
    /// Default duration in seconds.
    pub duration: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mode: Mode::Solo,
            difficulty: Difficulty::Beginner,
            themes: BTreeSet::new(),
            duration: 90,
        }
    }
}

/// A partial update; `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPatch {
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub themes: Option<BTreeSet<String>>,
    #[serde(default)]
    pub duration: Option<u32>,
}

impl PreferencesPatch {
    pub fn mode(mode: Mode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.difficulty.is_none()
            && self.themes.is_none()
            && self.duration.is_none()
    }
}

impl Preferences {
    /// Shallow merge: every field present in `patch` replaces the current one.
    ///
    /// A zero duration is ignored so the default stays positive.
    pub fn merge(&mut self, patch: PreferencesPatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(themes) = patch.themes {
            self.themes = themes;
        }
        if let Some(duration) = patch.duration.filter(|d| *d > 0) {
            self.duration = duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_merges_keep_other_fields() {
        let mut prefs = Preferences::default();
        prefs.merge(PreferencesPatch::mode(Mode::Group));
        prefs.merge(PreferencesPatch::difficulty(Difficulty::Advanced));

        assert_eq!(prefs.mode, Mode::Group);
        assert_eq!(prefs.difficulty, Difficulty::Advanced);
        assert!(prefs.themes.is_empty());
        assert_eq!(prefs.duration, 90);
    }

    #[test]
    fn test_themes_are_replaced_not_appended() {
        let mut prefs = Preferences::default();
        prefs.merge(PreferencesPatch {
            themes: Some(["comedy".to_string(), "drama".to_string()].into()),
            ..PreferencesPatch::default()
        });
        prefs.merge(PreferencesPatch {
            themes: Some(["family".to_string()].into()),
            ..PreferencesPatch::default()
        });
        assert_eq!(prefs.themes.len(), 1);
        assert!(prefs.themes.contains("family"));
    }

    #[test]
    fn test_zero_duration_is_ignored() {
        let mut prefs = Preferences::default();
        prefs.merge(PreferencesPatch {
            duration: Some(0),
            ..PreferencesPatch::default()
        });
        assert_eq!(prefs.duration, 90);
        assert!(PreferencesPatch::default().is_empty());
    }
}
