//! Scene domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

/// How many performers a scene is written for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    Solo,
    Duo,
    Group,
}

impl Mode {
    /// Parses a mode name, falling back to [`Mode::Solo`] for anything unrecognized.
    pub fn parse_lossy(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// Duration used when nothing better is known, in seconds.
    pub fn default_duration(self) -> u32 {
        match self {
            Mode::Solo => 90,
            Mode::Duo => 150,
            Mode::Group => 240,
        }
    }

    /// Suggested duration range, rendered for instruction text.
    pub fn duration_range(self) -> &'static str {
        match self {
            Mode::Solo => "60-120",
            Mode::Duo => "120-200",
            Mode::Group => "180-300",
        }
    }

    pub fn all() -> impl Iterator<Item = Mode> {
        Mode::iter()
    }
}

/// Difficulty rating of a scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    /// Scenes assembled from a user prompt or from local templates.
    Custom,
}

impl Difficulty {
    /// Parses a difficulty name, falling back to [`Difficulty::Intermediate`].
    pub fn parse_lossy(value: &str) -> Self {
        value.trim().parse().unwrap_or(Difficulty::Intermediate)
    }
}

/// A performance prompt.
///
/// Scenes are values: a new generation always produces a new `Scene`, and
/// nothing in the workspace mutates one after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<String>,
    /// Seconds, always positive.
    pub duration: u32,
    pub difficulty: Difficulty,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    /// Produced (by the generative service or local templates) rather than picked from the catalog.
    #[serde(default)]
    pub generated: bool,
    /// Seeded by a user-supplied prompt.
    #[serde(default)]
    pub custom: bool,
    /// One of the hardcoded last-resort scenes.
    #[serde(default)]
    pub fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl Scene {
    /// Creates a scene with a fresh `<prefix>_<uuid>` identifier.
    ///
    /// A zero duration is replaced by the mode default.
    pub fn new(
        id_prefix: &str,
        title: impl Into<String>,
        prompt: impl Into<String>,
        mode: Mode,
        duration: u32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: new_scene_id(id_prefix),
            title: title.into(),
            prompt: prompt.into(),
            characters: Vec::new(),
            duration: if duration == 0 {
                mode.default_duration()
            } else {
                duration
            },
            difficulty,
            mode,
            theme: None,
            emotion: None,
            generated: false,
            custom: false,
            fallback: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_characters(mut self, characters: Vec<String>) -> Self {
        self.characters = characters;
        self
    }

    pub fn with_theme(mut self, theme: Option<String>) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_emotion(mut self, emotion: Option<String>) -> Self {
        self.emotion = emotion;
        self
    }

    pub fn with_generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    pub fn with_custom(mut self, custom: bool) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// True when every required field is populated.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty()
            && !self.title.trim().is_empty()
            && !self.prompt.trim().is_empty()
            && self.duration > 0
    }
}

pub(crate) fn new_scene_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}
