//! Hardcoded last-resort scenes, one per mode.

use super::model::{Difficulty, Mode, Scene};

/// Returns the always-available scene for `mode`, flagged `fallback`.
pub fn fallback_scene(mode: Mode) -> Scene {
    let (title, prompt, duration) = match mode {
        Mode::Solo => (
            "The Moment",
            "You've just experienced something that changed your perspective. Share that moment with us.",
            90,
        ),
        Mode::Duo => (
            "The Conversation",
            "Two people need to have an important conversation they've been avoiding.",
            150,
        ),
        Mode::Group => (
            "The Decision",
            "A group must make an important choice together, but everyone has different opinions.",
            240,
        ),
    };

    Scene::new("fallback", title, prompt, mode, duration, Difficulty::Beginner).with_fallback(true)
}
