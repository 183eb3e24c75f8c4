//! Scene requests and the seam the store generates through.

use super::model::{Mode, Scene};
use crate::challenge::{DailyChallenge, daily_challenge_for};
use crate::error::GenerationError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the caller asked for. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRequest {
    pub mode: Mode,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl SceneRequest {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }

    pub fn theme(&self) -> Option<&str> {
        non_blank(self.theme.as_deref())
    }

    pub fn emotion(&self) -> Option<&str> {
        non_blank(self.emotion.as_deref())
    }

    pub fn custom_prompt(&self) -> Option<&str> {
        non_blank(self.custom_prompt.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Where the store gets its practice content from.
///
/// The production implementation never fails; the `Result` exists so the
/// store can model the rejected branch of a request.
#[async_trait]
pub trait SceneSource: Send + Sync {
    async fn generate(&self, request: &SceneRequest) -> Result<Scene, GenerationError>;

    /// The challenge for `date`.
    async fn daily_challenge(&self, date: NaiveDate) -> Result<DailyChallenge, GenerationError> {
        Ok(daily_challenge_for(date, &mut rand::thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let request = SceneRequest::new(Mode::Duo)
            .with_theme("  ")
            .with_emotion(" joy ")
            .with_custom_prompt("");
        assert_eq!(request.theme(), None);
        assert_eq!(request.emotion(), Some("joy"));
        assert_eq!(request.custom_prompt(), None);
    }
}
