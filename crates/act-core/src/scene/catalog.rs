//! Static scene catalog.
//!
//! The catalog is plain data handed to the provider at construction. The
//! seeded table ships with the application; a TOML file with the same shape
//! can replace it.

use super::model::{Difficulty, Mode, Scene};
use crate::error::{ActError, GenerationError};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// One catalog row. Turned into a fresh [`Scene`] every time it is picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTemplate {
    pub id: String,
    pub title: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<String>,
    pub duration: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl SceneTemplate {
    fn instantiate(&self, mode: Mode) -> Scene {
        Scene::new(
            mode.as_ref(),
            self.title.clone(),
            self.prompt.clone(),
            mode,
            self.duration,
            self.difficulty,
        )
        .with_characters(self.characters.clone())
        .with_theme(self.theme.clone())
        .with_emotion(self.emotion.clone())
    }
}

/// Scene templates grouped by mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneCatalog {
    #[serde(default)]
    pub solo: Vec<SceneTemplate>,
    #[serde(default)]
    pub duo: Vec<SceneTemplate>,
    #[serde(default)]
    pub group: Vec<SceneTemplate>,
}

impl SceneCatalog {
    pub fn entries(&self, mode: Mode) -> &[SceneTemplate] {
        match mode {
            Mode::Solo => &self.solo,
            Mode::Duo => &self.duo,
            Mode::Group => &self.group,
        }
    }

    pub fn is_empty(&self) -> bool {
        Mode::all().all(|mode| self.entries(mode).is_empty())
    }

    /// Picks a template uniformly at random and instantiates it.
    ///
    /// A mode without entries resolves against the solo entries, and the
    /// returned scene reports `Mode::Solo`. Fails only when solo is empty too.
    pub fn pick<R: Rng + ?Sized>(&self, mode: Mode, rng: &mut R) -> Result<Scene, GenerationError> {
        let resolved = if self.entries(mode).is_empty() {
            Mode::Solo
        } else {
            mode
        };

        self.entries(resolved)
            .choose(rng)
            .map(|template| template.instantiate(resolved))
            .ok_or_else(|| GenerationError::NoMatchingCatalogEntry(mode.to_string()))
    }

    /// Rejects rows that could never produce a complete scene.
    pub fn validate(&self) -> Result<(), ActError> {
        for mode in Mode::all() {
            for template in self.entries(mode) {
                if template.title.trim().is_empty() || template.prompt.trim().is_empty() {
                    return Err(ActError::config(format!(
                        "catalog entry '{}' ({mode}) needs a title and a prompt",
                        template.id
                    )));
                }
                if template.duration == 0 {
                    return Err(ActError::config(format!(
                        "catalog entry '{}' ({mode}) needs a positive duration",
                        template.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// The catalog that ships with the application.
    pub fn seeded() -> Self {
        Self {
            solo: vec![
                SceneTemplate {
                    id: "solo_1".into(),
                    title: "The Phone Call".into(),
                    prompt: "You just received a life-changing phone call. React to the news and show us your emotional journey.".into(),
                    characters: Vec::new(),
                    duration: 90,
                    difficulty: Difficulty::Beginner,
                    theme: Some("drama".into()),
                    emotion: Some("surprise".into()),
                },
                SceneTemplate {
                    id: "solo_2".into(),
                    title: "Mirror Monologue".into(),
                    prompt: "Look in the mirror and give yourself a pep talk before the biggest day of your life.".into(),
                    characters: Vec::new(),
                    duration: 120,
                    difficulty: Difficulty::Beginner,
                    theme: Some("motivational".into()),
                    emotion: Some("determination".into()),
                },
                SceneTemplate {
                    id: "solo_3".into(),
                    title: "The Confession".into(),
                    prompt: "You need to confess something important to someone you care about. Practice what you would say.".into(),
                    characters: Vec::new(),
                    duration: 150,
                    difficulty: Difficulty::Intermediate,
                    theme: Some("relationship".into()),
                    emotion: Some("vulnerability".into()),
                },
            ],
            duo: vec![
                SceneTemplate {
                    id: "duo_1".into(),
                    title: "First Meeting".into(),
                    prompt: "Two strangers meet in an unusual place. One has a secret that changes everything.".into(),
                    characters: vec![
                        "Character A: Curious newcomer".into(),
                        "Character B: Local with a secret".into(),
                    ],
                    duration: 180,
                    difficulty: Difficulty::Beginner,
                    theme: Some("mystery".into()),
                    emotion: None,
                },
                SceneTemplate {
                    id: "duo_2".into(),
                    title: "The Argument".into(),
                    prompt: "Old friends disagree about a major life decision. Both believe they are right.".into(),
                    characters: vec![
                        "Character A: The risk-taker".into(),
                        "Character B: The cautious one".into(),
                    ],
                    duration: 200,
                    difficulty: Difficulty::Intermediate,
                    theme: Some("conflict".into()),
                    emotion: None,
                },
            ],
            group: vec![SceneTemplate {
                id: "group_1".into(),
                title: "The Heist Planning".into(),
                prompt: "Plan to steal something unusual and harmless (like stealing the show, or someone's heart).".into(),
                characters: vec![
                    "The Mastermind".into(),
                    "The Skeptic".into(),
                    "The Enthusiast".into(),
                    "The Wildcard".into(),
                ],
                duration: 300,
                difficulty: Difficulty::Advanced,
                theme: Some("comedy".into()),
                emotion: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_seeded_catalog_is_valid() {
        let catalog = SceneCatalog::seeded();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.solo.len(), 3);
        assert_eq!(catalog.duo.len(), 2);
        assert_eq!(catalog.group.len(), 1);
    }

    #[test]
    fn test_pick_duo_returns_seeded_duo_entry() {
        let catalog = SceneCatalog::seeded();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let scene = catalog.pick(Mode::Duo, &mut rng).unwrap();
            assert_eq!(scene.mode, Mode::Duo);
            assert!([180, 200].contains(&scene.duration));
            assert_eq!(scene.characters.len(), 2);
            assert!(!scene.generated);
            assert!(scene.id.starts_with("duo_"));
        }
    }

    #[test]
    fn test_pick_falls_back_to_solo_entries() {
        let catalog = SceneCatalog {
            group: Vec::new(),
            ..SceneCatalog::seeded()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let scene = catalog.pick(Mode::Group, &mut rng).unwrap();
        assert_eq!(scene.mode, Mode::Solo);
    }

    #[test]
    fn test_pick_from_empty_catalog_fails() {
        let catalog = SceneCatalog::default();
        let mut rng = StdRng::seed_from_u64(1);
        let err = catalog.pick(Mode::Duo, &mut rng).unwrap_err();
        assert_eq!(err, GenerationError::NoMatchingCatalogEntry("duo".into()));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let mut catalog = SceneCatalog::seeded();
        catalog.duo[0].duration = 0;
        let err = catalog.validate().unwrap_err();
        assert!(err.is_config());
    }
}
