//! Static phrase tables and the scenes built from them without any network.

use super::model::{Difficulty, Mode, Scene};

pub const EMOTIONS: [&str; 12] = [
    "joy",
    "anger",
    "sadness",
    "fear",
    "surprise",
    "disgust",
    "love",
    "excitement",
    "nervousness",
    "confidence",
    "curiosity",
    "frustration",
];

pub const THEMES: [&str; 12] = [
    "family",
    "work",
    "romance",
    "mystery",
    "comedy",
    "drama",
    "adventure",
    "friendship",
    "conflict",
    "celebration",
    "loss",
    "discovery",
];

pub const CHARACTER_TYPES: [&str; 10] = [
    "hero",
    "villain",
    "mentor",
    "comic relief",
    "mysterious stranger",
    "best friend",
    "rival",
    "wise elder",
    "rebel",
    "innocent",
];

const DEFAULT_EMOTION_PHRASE: &str = "experiencing strong emotions";

pub fn theme_phrase(theme: &str) -> Option<&'static str> {
    match theme.trim().to_lowercase().as_str() {
        "family" => Some("involving family dynamics and relationships"),
        "work" => Some("set in a workplace environment"),
        "romance" => Some("with romantic tension and connection"),
        "mystery" => Some("with mysterious and intriguing elements"),
        "comedy" => Some("that's humorous and light-hearted"),
        "drama" => Some("with emotional depth and intensity"),
        _ => None,
    }
}

pub fn emotion_phrase(emotion: &str) -> Option<&'static str> {
    match emotion.trim().to_lowercase().as_str() {
        "joy" => Some("celebrating something wonderful"),
        "anger" => Some("dealing with frustration or injustice"),
        "sadness" => Some("processing loss or disappointment"),
        "fear" => Some("facing something scary or unknown"),
        "love" => Some("expressing deep affection and connection"),
        "excitement" => Some("anticipating something amazing"),
        _ => None,
    }
}

/// Builds a scene from the phrase tables alone.
///
/// Used when theme/emotion generation cannot reach the generative service.
pub fn templated_scene(mode: Mode, theme: Option<&str>, emotion: Option<&str>) -> Scene {
    let mut prompt = String::from("Create a scene");
    if let Some(phrase) = theme.and_then(theme_phrase) {
        prompt.push(' ');
        prompt.push_str(phrase);
    }
    prompt.push_str(" where characters are ");
    prompt.push_str(
        emotion
            .and_then(emotion_phrase)
            .unwrap_or(DEFAULT_EMOTION_PHRASE),
    );
    prompt.push('.');

    let label = theme.or(emotion).unwrap_or("Scene");

    Scene::new(
        "custom",
        format!("Custom {label}"),
        prompt,
        mode,
        mode.default_duration(),
        Difficulty::Custom,
    )
    .with_theme(theme.map(str::to_string))
    .with_emotion(emotion.map(str::to_string))
    .with_generated(true)
}

/// Wraps a user prompt verbatim; the degraded path for custom-prompt requests.
pub fn simple_custom_scene(mode: Mode, custom_prompt: &str) -> Scene {
    Scene::new(
        "simple",
        "Custom Scene",
        custom_prompt,
        mode,
        mode.default_duration(),
        Difficulty::Custom,
    )
    .with_custom(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templated_scene_with_known_phrases() {
        let scene = templated_scene(Mode::Duo, Some("comedy"), Some("joy"));
        assert_eq!(scene.title, "Custom comedy");
        assert_eq!(
            scene.prompt,
            "Create a scene that's humorous and light-hearted where characters are celebrating something wonderful."
        );
        assert_eq!(scene.duration, 150);
        assert_eq!(scene.difficulty, Difficulty::Custom);
        assert!(scene.generated);
        assert_eq!(scene.theme.as_deref(), Some("comedy"));
    }

    #[test]
    fn test_templated_scene_with_unknown_theme_reads_cleanly() {
        let scene = templated_scene(Mode::Solo, Some("space"), None);
        assert_eq!(scene.title, "Custom space");
        assert_eq!(
            scene.prompt,
            "Create a scene where characters are experiencing strong emotions."
        );
    }

    #[test]
    fn test_templated_scene_titled_by_emotion_when_no_theme() {
        let scene = templated_scene(Mode::Group, None, Some("fear"));
        assert_eq!(scene.title, "Custom fear");
        assert!(scene.prompt.contains("facing something scary"));
    }

    #[test]
    fn test_simple_custom_scene_keeps_prompt_verbatim() {
        let scene = simple_custom_scene(Mode::Solo, "A dog learns to talk");
        assert_eq!(scene.prompt, "A dog learns to talk");
        assert!(!scene.generated);
        assert!(scene.custom);
        assert_eq!(scene.duration, 90);
    }

    #[test]
    fn test_every_phrase_table_entry_is_known() {
        for theme in ["family", "work", "romance", "mystery", "comedy", "drama"] {
            assert!(THEMES.contains(&theme));
            assert!(theme_phrase(theme).is_some());
        }
        assert!(emotion_phrase("Joy").is_some());
    }
}
