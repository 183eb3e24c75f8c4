//! Parsing of generative-service replies into scenes.
//!
//! The far end is asked for a JSON object but nothing enforces it, so the
//! reply is first tried as structured data and otherwise mined line by line.

use super::model::{Difficulty, Mode, Scene};
use crate::error::GenerationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

const PROMPT_SNIPPET_CHARS: usize = 200;
const LONG_LINE_CHARS: usize = 50;

static TITLE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)title:?").expect("valid regex"));
static PROMPT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)prompt:?").expect("valid regex"));
static TITLE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][^.!?]*$").expect("valid regex"));

/// Scene fields recovered from a reply, before ids and flags are assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDraft {
    pub title: String,
    pub prompt: String,
    pub duration: Option<u32>,
    pub characters: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub theme: Option<String>,
    pub emotion: Option<String>,
}

impl SceneDraft {
    /// Turns the draft into a generated scene, filling mode defaults.
    pub fn into_scene(self, mode: Mode, custom: bool) -> Scene {
        Scene::new(
            "ai",
            self.title,
            self.prompt,
            mode,
            self.duration.unwrap_or_else(|| mode.default_duration()),
            self.difficulty.unwrap_or(Difficulty::Intermediate),
        )
        .with_characters(self.characters)
        .with_theme(self.theme)
        .with_emotion(self.emotion)
        .with_generated(true)
        .with_custom(custom)
    }
}

/// Outcome of the structured parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Parsed(SceneDraft),
    Unparseable(String),
}

/// Attempts to read `raw` as a JSON scene object, optionally inside a code fence.
///
/// Both `title` and `prompt` must be non-empty strings.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let body = strip_code_fence(raw);
    let object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => return ParsedResponse::Unparseable(raw.to_string()),
    };

    match draft_from_object(&object) {
        Some(draft) => ParsedResponse::Parsed(draft),
        None => ParsedResponse::Unparseable(raw.to_string()),
    }
}

/// Structured parse first, heuristic extraction second.
pub fn scene_from_response(raw: &str, mode: Mode, custom: bool) -> Result<Scene, GenerationError> {
    let draft = match parse_response(raw) {
        ParsedResponse::Parsed(draft) => draft,
        ParsedResponse::Unparseable(text) => heuristic_draft(&text, mode)?,
    };
    Ok(draft.into_scene(mode, custom))
}

/// Line-based extraction for replies that are not JSON.
///
/// Only title and prompt are recovered; duration and difficulty are left for
/// the mode defaults.
pub fn heuristic_draft(raw: &str, mode: Mode) -> Result<SceneDraft, GenerationError> {
    let lines: Vec<&str> = raw.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(GenerationError::malformed("response contained no text"));
    }

    let title = extract_title(&lines).unwrap_or_else(|| format!("Custom {mode} Scene"));
    let prompt = match extract_prompt(&lines) {
        Some(prompt) => prompt,
        None => raw.trim().chars().take(PROMPT_SNIPPET_CHARS).collect(),
    };

    Ok(SceneDraft {
        title,
        prompt,
        ..SceneDraft::default()
    })
}

/// First line mentioning "title", else the first capitalized line without
/// sentence punctuation.
pub fn extract_title(lines: &[&str]) -> Option<String> {
    let mut candidates = lines.iter().map(|line| strip_decoration(line));
    let line = candidates
        .clone()
        .find(|line| line.to_lowercase().contains("title"))
        .or_else(|| candidates.find(|line| TITLE_SHAPE.is_match(line)))?;

    Some(strip_decoration(&TITLE_LABEL.replace(line, "")).to_string()).filter(|t| !t.is_empty())
}

/// First line mentioning "prompt", else the first line longer than 50 characters.
pub fn extract_prompt(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|line| strip_decoration(line))
        .find(|line| {
            line.to_lowercase().contains("prompt") || line.chars().count() > LONG_LINE_CHARS
        })
        .map(|line| strip_decoration(&PROMPT_LABEL.replace(line, "")).to_string())
        .filter(|prompt| !prompt.is_empty())
}

fn strip_decoration(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '#' | '-' | '"' | '`'))
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn draft_from_object(object: &Map<String, Value>) -> Option<SceneDraft> {
    let title = non_empty_str(object.get("title"))?;
    let prompt = non_empty_str(object.get("prompt"))?;

    Some(SceneDraft {
        title,
        prompt,
        duration: object.get("duration").and_then(duration_value),
        characters: object
            .get("characters")
            .map(character_values)
            .unwrap_or_default(),
        difficulty: object
            .get("difficulty")
            .and_then(Value::as_str)
            .map(Difficulty::parse_lossy),
        theme: non_empty_str(object.get("theme")),
        emotion: non_empty_str(object.get("emotion")),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn duration_value(value: &Value) -> Option<u32> {
    let seconds = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64)),
        Value::String(text) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse::<u64>().ok()
        }
        _ => None,
    }?;

    u32::try_from(seconds).ok().filter(|s| *s > 0)
}

fn character_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => vec![text.trim().to_string()],
        Value::Array(items) => items.iter().filter_map(character_entry).collect(),
        _ => Vec::new(),
    }
}

fn character_entry(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Object(fields) => {
            let name = non_empty_str(fields.get("name"));
            let description = non_empty_str(fields.get("description"));
            match (name, description) {
                (Some(name), Some(description)) => Some(format!("{name}: {description}")),
                (name, description) => name.or(description),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json_object() {
        let raw = r#"{"title":"Lost Keys","prompt":"You cannot find your keys and the taxi is waiting.","duration":100,"difficulty":"beginner","theme":"comedy","emotion":"frustration"}"#;
        let ParsedResponse::Parsed(draft) = parse_response(raw) else {
            panic!("expected structured parse");
        };
        assert_eq!(draft.title, "Lost Keys");
        assert_eq!(draft.duration, Some(100));
        assert_eq!(draft.difficulty, Some(Difficulty::Beginner));
        assert_eq!(draft.emotion.as_deref(), Some("frustration"));
    }

    #[test]
    fn test_parse_fenced_json_with_loose_fields() {
        let raw = "```json\n{\n  \"title\": \"Night Shift\",\n  \"prompt\": \"Two nurses swap secrets.\",\n  \"duration\": \"150 seconds\",\n  \"characters\": [{\"name\": \"Ana\", \"description\": \"veteran\"}, \"Ben: rookie\"]\n}\n```";
        let ParsedResponse::Parsed(draft) = parse_response(raw) else {
            panic!("expected structured parse");
        };
        assert_eq!(draft.duration, Some(150));
        assert_eq!(draft.characters, vec!["Ana: veteran", "Ben: rookie"]);
        assert_eq!(draft.difficulty, None);
    }

    #[test]
    fn test_json_without_prompt_is_unparseable() {
        let raw = r#"{"title":"Only a title"}"#;
        assert_eq!(
            parse_response(raw),
            ParsedResponse::Unparseable(raw.to_string())
        );
    }

    #[test]
    fn test_heuristic_extracts_labelled_lines() {
        let raw = "Here is your scene!\n\n**Title:** The Lighthouse\nPrompt: A keeper hears a knock at midnight and must decide whether to open the door.\n";
        let scene = scene_from_response(raw, Mode::Duo, false).unwrap();
        assert_eq!(scene.title, "The Lighthouse");
        assert_eq!(
            scene.prompt,
            "A keeper hears a knock at midnight and must decide whether to open the door."
        );
        assert_eq!(scene.duration, 150);
        assert_eq!(scene.difficulty, Difficulty::Intermediate);
        assert!(scene.generated);
    }

    #[test]
    fn test_labelled_title_beats_earlier_capitalized_line() {
        let draft = heuristic_draft(
            "Scene Concept\nTitle: The Lighthouse\nPrompt: Keep the light burning through the storm.",
            Mode::Solo,
        )
        .unwrap();
        assert_eq!(draft.title, "The Lighthouse");
    }

    #[test]
    fn test_heuristic_uses_capitalized_line_and_long_line() {
        let lines = [
            "Rooftop Farewell",
            "Two old friends meet on a rooftop the night before one of them moves abroad.",
        ];
        assert_eq!(extract_title(&lines).as_deref(), Some("Rooftop Farewell"));
        assert_eq!(
            extract_prompt(&lines).as_deref(),
            Some("Two old friends meet on a rooftop the night before one of them moves abroad.")
        );
    }

    #[test]
    fn test_heuristic_defaults_when_nothing_matches() {
        let raw = "oops. short.";
        let draft = heuristic_draft(raw, Mode::Group).unwrap();
        assert_eq!(draft.title, "Custom group Scene");
        assert_eq!(draft.prompt, "oops. short.");
    }

    #[test]
    fn test_heuristic_prompt_snippet_is_truncated() {
        let raw = "x".repeat(40) + ".\n" + &"y. ".repeat(10);
        let long = "z".repeat(300);
        let draft = heuristic_draft(&format!("{raw}\n{long}"), Mode::Solo).unwrap();
        assert_eq!(draft.prompt, long);

        let only_short = "ok.\n".repeat(80);
        let draft = heuristic_draft(&only_short, Mode::Solo).unwrap();
        assert_eq!(draft.prompt.chars().count(), 200);
    }

    #[test]
    fn test_blank_response_is_malformed() {
        let err = scene_from_response("  \n \n", Mode::Solo, true).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_zero_duration_uses_mode_default() {
        let raw = r#"{"title":"T","prompt":"P","duration":0}"#;
        let scene = scene_from_response(raw, Mode::Group, true).unwrap();
        assert_eq!(scene.duration, 240);
        assert!(scene.custom);
    }
}
