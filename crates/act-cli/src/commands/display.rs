use act_core::challenge::{DailyChallenge, ExerciseFocus, VoiceExercise};
use act_core::{Preferences, Scene};

pub fn print_scene(scene: &Scene) {
    println!("🎭 {} [{} · {} · {}s]", scene.title, scene.mode, scene.difficulty, scene.duration);
    println!();
    println!("{}", scene.prompt);
    if !scene.characters.is_empty() {
        println!();
        println!("Characters:");
        for character in &scene.characters {
            println!("  - {character}");
        }
    }

    let mut tags = Vec::new();
    if let Some(theme) = &scene.theme {
        tags.push(format!("theme: {theme}"));
    }
    if let Some(emotion) = &scene.emotion {
        tags.push(format!("emotion: {emotion}"));
    }
    if scene.fallback {
        tags.push("offline fallback".to_string());
    }
    if !tags.is_empty() {
        println!();
        println!("({})", tags.join(", "));
    }
    println!();
    println!("id: {}", scene.id);
}

pub fn print_scene_line(index: usize, scene: &Scene) {
    println!(
        "{:>3}. {} [{} · {}s] {}",
        index + 1,
        scene.title,
        scene.mode,
        scene.duration,
        scene.id
    );
}

pub fn print_challenge(challenge: &DailyChallenge) {
    println!("📅 {} {}", challenge.title, challenge.hashtag);
    println!();
    println!("{}", challenge.description);
    println!();
    println!(
        "{}s · {} · {} performers so far",
        challenge.duration, challenge.difficulty, challenge.participant_count
    );
    println!("Reward: {}", challenge.reward);
}

pub fn print_exercise(exercise: &VoiceExercise) {
    println!("🎙️ {} [{}s · {}]", exercise.name, exercise.duration, exercise.difficulty);
    println!();
    println!("{}", exercise.instruction);
    match &exercise.focus {
        ExerciseFocus::Emotions { emotions } => println!("Emotions: {}", emotions.join(", ")),
        ExerciseFocus::Levels { levels } => println!("Levels: {}", levels.join(" → ")),
        ExerciseFocus::Characters { line, characters } => {
            println!("Line: \"{line}\"");
            println!("As: {}", characters.join(", "));
        }
    }
}

pub fn print_preferences(preferences: &Preferences) {
    println!("mode:       {}", preferences.mode);
    println!("difficulty: {}", preferences.difficulty);
    println!("duration:   {}s", preferences.duration);
    if preferences.themes.is_empty() {
        println!("themes:     (none)");
    } else {
        let themes: Vec<&str> = preferences.themes.iter().map(String::as_str).collect();
        println!("themes:     {}", themes.join(", "));
    }
}
