//! Practice content outside the scene flow: daily challenges and voice exercises.

use crate::scene::Difficulty;
use crate::scene::phrases::{CHARACTER_TYPES, EMOTIONS};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CHALLENGE_REWARD: &str = "Featured in community showcase";

struct ChallengeTemplate {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    hashtag: &'static str,
    duration: u32,
    difficulty: Difficulty,
}

/// The challenge of the day, resolved for a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub hashtag: String,
    pub duration: u32,
    pub difficulty: Difficulty,
    pub date: NaiveDate,
    pub participant_count: u32,
    pub reward: String,
}

fn challenge_template(weekday: Weekday) -> ChallengeTemplate {
    match weekday {
        Weekday::Mon => ChallengeTemplate {
            id: "monday_monologue",
            title: "Monologue Monday",
            description: "Perform a 60-second monologue about your morning routine",
            hashtag: "#ACTMon",
            duration: 60,
            difficulty: Difficulty::Beginner,
        },
        Weekday::Tue => ChallengeTemplate {
            id: "two_line_tuesday",
            title: "Two-Line Tuesday",
            description: "Create a complete scene using only two lines of dialogue",
            hashtag: "#ACTTue",
            duration: 90,
            difficulty: Difficulty::Intermediate,
        },
        Weekday::Wed => ChallengeTemplate {
            id: "wordless_wednesday",
            title: "Wordless Wednesday",
            description: "Tell a story without speaking - use only gestures and expressions",
            hashtag: "#ACTWed",
            duration: 120,
            difficulty: Difficulty::Advanced,
        },
        Weekday::Thu => ChallengeTemplate {
            id: "throwback_thursday",
            title: "Throwback Thursday",
            description: "Recreate a scene from your favorite movie or show",
            hashtag: "#ACTThu",
            duration: 150,
            difficulty: Difficulty::Intermediate,
        },
        Weekday::Fri => ChallengeTemplate {
            id: "freestyle_friday",
            title: "Freestyle Friday",
            description: "Improvise based on three random words: Dream, Bicycle, Storm",
            hashtag: "#ACTFri",
            duration: 120,
            difficulty: Difficulty::Advanced,
        },
        Weekday::Sat => ChallengeTemplate {
            id: "story_saturday",
            title: "Story Saturday",
            description: "Collaborate on a group story - each person adds one sentence",
            hashtag: "#ACTSat",
            duration: 180,
            difficulty: Difficulty::Beginner,
        },
        Weekday::Sun => ChallengeTemplate {
            id: "silly_sunday",
            title: "Silly Sunday",
            description: "Make us laugh with your best comedy bit or funny character",
            hashtag: "#ACTSun",
            duration: 90,
            difficulty: Difficulty::Beginner,
        },
    }
}

/// Resolves the challenge for `date`. The participant count is in `[50, 550)`.
pub fn daily_challenge_for<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> DailyChallenge {
    let template = challenge_template(date.weekday());
    DailyChallenge {
        id: template.id.to_string(),
        title: template.title.to_string(),
        description: template.description.to_string(),
        hashtag: template.hashtag.to_string(),
        duration: template.duration,
        difficulty: template.difficulty,
        date,
        participant_count: rng.gen_range(50..550),
        reward: CHALLENGE_REWARD.to_string(),
    }
}

/// What the performer varies during a voice exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseFocus {
    Emotions { emotions: Vec<String> },
    Levels { levels: Vec<String> },
    Characters { line: String, characters: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceExercise {
    pub id: String,
    pub name: String,
    pub instruction: String,
    pub focus: ExerciseFocus,
    pub duration: u32,
    pub difficulty: Difficulty,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn voice_exercises() -> Vec<VoiceExercise> {
    vec![
        VoiceExercise {
            id: "emotion_spectrum".into(),
            name: "Emotion Spectrum".into(),
            instruction: "Say \"Hello, how are you?\" in 5 different emotions".into(),
            focus: ExerciseFocus::Emotions {
                emotions: owned(&EMOTIONS[..5]),
            },
            duration: 60,
            difficulty: Difficulty::Beginner,
        },
        VoiceExercise {
            id: "volume_control".into(),
            name: "Volume Control".into(),
            instruction:
                "Deliver this line from whisper to shout: \"I can't believe this is happening\""
                    .into(),
            focus: ExerciseFocus::Levels {
                levels: owned(&["whisper", "normal", "loud", "shout"]),
            },
            duration: 45,
            difficulty: Difficulty::Beginner,
        },
        VoiceExercise {
            id: "character_voice".into(),
            name: "Character Voice".into(),
            instruction: "Say this line as different character types".into(),
            focus: ExerciseFocus::Characters {
                line: "The treasure is hidden behind the old oak tree".into(),
                characters: owned(&CHARACTER_TYPES[..3]),
            },
            duration: 90,
            difficulty: Difficulty::Intermediate,
        },
    ]
}

/// Picks one exercise uniformly at random.
pub fn random_voice_exercise<R: Rng + ?Sized>(rng: &mut R) -> VoiceExercise {
    let mut exercises = voice_exercises();
    let index = rng.gen_range(0..exercises.len());
    exercises.swap_remove(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_challenge_follows_weekday() {
        let mut rng = StdRng::seed_from_u64(3);
        // 2026-10-18 is a Sunday.
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let challenge = daily_challenge_for(sunday, &mut rng);
        assert_eq!(challenge.id, "silly_sunday");
        assert_eq!(challenge.hashtag, "#ACTSun");
        assert_eq!(challenge.date, sunday);
        assert_eq!(challenge.reward, CHALLENGE_REWARD);

        let monday = sunday.succ_opt().unwrap();
        assert_eq!(daily_challenge_for(monday, &mut rng).id, "monday_monologue");
    }

    #[test]
    fn test_participant_count_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let date = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        for _ in 0..100 {
            let count = daily_challenge_for(date, &mut rng).participant_count;
            assert!((50..550).contains(&count));
        }
    }

    #[test]
    fn test_voice_exercises_draw_from_phrase_tables() {
        let exercises = voice_exercises();
        assert_eq!(exercises.len(), 3);
        match &exercises[0].focus {
            ExerciseFocus::Emotions { emotions } => {
                assert_eq!(emotions, &["joy", "anger", "sadness", "fear", "surprise"]);
            }
            other => panic!("unexpected focus: {other:?}"),
        }
        match &exercises[2].focus {
            ExerciseFocus::Characters { characters, .. } => {
                assert_eq!(characters, &["hero", "villain", "mentor"]);
            }
            other => panic!("unexpected focus: {other:?}"),
        }
    }

    #[test]
    fn test_random_voice_exercise_is_from_table() {
        let mut rng = StdRng::seed_from_u64(5);
        let ids: Vec<String> = voice_exercises().into_iter().map(|e| e.id).collect();
        for _ in 0..10 {
            assert!(ids.contains(&random_voice_exercise(&mut rng).id));
        }
    }
}
