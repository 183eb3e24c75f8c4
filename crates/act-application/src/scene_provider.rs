//! Scene Provider
//!
//! Resolves a [`SceneRequest`] into a [`Scene`], either from the catalog or
//! through the generative service, degrading step by step when the service
//! fails. `generate` always returns a usable scene.

use act_core::GenerationError;
use act_core::challenge::{
    DailyChallenge, VoiceExercise, daily_challenge_for, random_voice_exercise,
};
use act_core::config::GenerationConfig;
use act_core::generation::{CompletionRequest, GenerativeService};
use act_core::scene::{
    Mode, Scene, SceneCatalog, SceneRequest, SceneSource, fallback_scene, scene_from_response,
    simple_custom_scene, templated_scene,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

const THEMED_MAX_TOKENS: u32 = 400;
const THEMED_TEMPERATURE: f32 = 0.8;
const CUSTOM_MAX_TOKENS: u32 = 300;
const CUSTOM_TEMPERATURE: f32 = 0.7;

const DIRECTOR_SYSTEM_PROMPT: &str = "You are a creative theatre director helping people create engaging, accessible performance scenes.
Generate scenes that are fun, emotionally engaging, and suitable for all skill levels.
Always respond with a JSON object containing: title, prompt, duration, characters (if applicable), difficulty, theme, emotion.";

/// Instruction for theme/emotion generation.
pub fn build_themed_instruction(mode: Mode, theme: Option<&str>, emotion: Option<&str>) -> String {
    let mut instruction = format!("Create a {mode} theatre scene");
    if let Some(theme) = theme {
        instruction.push_str(&format!(" with a {theme} theme"));
    }
    if let Some(emotion) = emotion {
        instruction.push_str(&format!(" that explores the emotion of {emotion}"));
    }

    instruction.push_str(&format!(
        ". Requirements:
- Compelling title (2-4 words)
- Clear, engaging prompt (2-3 sentences)
- Appropriate duration ({} seconds)
- Difficulty level (beginner/intermediate/advanced)",
        mode.duration_range()
    ));

    if mode != Mode::Solo {
        instruction.push_str("\n- Character descriptions for each performer");
    }

    instruction.push_str(
        "
- Make it accessible for beginners but engaging for experienced performers
- Focus on emotional truth and authentic moments
- Provide specific actions or moments to focus on",
    );

    instruction
}

/// System framing for custom-prompt generation.
pub fn build_custom_system_prompt(mode: Mode) -> String {
    format!(
        "Create a {mode} theatre scene based on the user's custom prompt.
Make it engaging and performable. Respond with JSON containing: title, prompt, duration, characters (if applicable), difficulty."
    )
}

/// Log text for a failed generation step, with the rate-limit hint when present.
fn describe_failure(err: &GenerationError) -> String {
    if !err.is_rate_limited() {
        return err.to_string();
    }
    match err.retry_after() {
        Some(wait) => format!("{} (rate limited, retry after {}s)", err, wait.as_secs()),
        None => format!("{} (rate limited)", err),
    }
}

/// Produces scenes for the store.
///
/// The catalog is injected at construction; the generative service is
/// optional and, when absent, every external path degrades to its local
/// fallback.
pub struct SceneProvider {
    catalog: SceneCatalog,
    service: Option<Arc<dyn GenerativeService>>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    rng: Mutex<StdRng>,
}

impl SceneProvider {
    pub fn new(catalog: SceneCatalog) -> Self {
        Self {
            catalog,
            service: None,
            max_tokens: None,
            temperature: None,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_service(mut self, service: Arc<dyn GenerativeService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Applies the configured reply-size and temperature overrides.
    pub fn with_generation_config(mut self, config: &GenerationConfig) -> Self {
        self.max_tokens = config.max_tokens;
        self.temperature = config.temperature;
        self
    }

    /// Makes catalog picks and challenge counts reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Resolves `request` into a scene. Never fails.
    pub async fn generate(&self, request: &SceneRequest) -> Scene {
        match self.try_generate(request).await {
            Ok(scene) => scene,
            Err(err) => {
                tracing::warn!(
                    "[SceneProvider] Scene generation failed, using fallback scene for {}: {}",
                    request.mode,
                    describe_failure(&err)
                );
                fallback_scene(request.mode)
            }
        }
    }

    async fn try_generate(&self, request: &SceneRequest) -> Result<Scene, GenerationError> {
        let mode = request.mode;

        if let Some(prompt) = request.custom_prompt() {
            return Ok(self.custom_scene(mode, prompt).await);
        }

        if request.theme().is_some() || request.emotion().is_some() {
            return Ok(self
                .themed_scene(mode, request.theme(), request.emotion())
                .await);
        }

        self.catalog_scene(mode)
    }

    async fn custom_scene(&self, mode: Mode, prompt: &str) -> Scene {
        let completion = CompletionRequest::new(
            build_custom_system_prompt(mode),
            format!("Create a scene: {prompt}"),
            self.max_tokens.unwrap_or(CUSTOM_MAX_TOKENS),
            self.temperature.unwrap_or(CUSTOM_TEMPERATURE),
        );

        match self.complete_scene(&completion, mode, true).await {
            Ok(scene) => scene,
            Err(err) => {
                tracing::warn!(
                    "[SceneProvider] Custom scene generation failed, wrapping prompt verbatim: {}",
                    describe_failure(&err)
                );
                simple_custom_scene(mode, prompt)
            }
        }
    }

    async fn themed_scene(&self, mode: Mode, theme: Option<&str>, emotion: Option<&str>) -> Scene {
        let completion = CompletionRequest::new(
            DIRECTOR_SYSTEM_PROMPT,
            build_themed_instruction(mode, theme, emotion),
            self.max_tokens.unwrap_or(THEMED_MAX_TOKENS),
            self.temperature.unwrap_or(THEMED_TEMPERATURE),
        );

        match self.complete_scene(&completion, mode, false).await {
            Ok(mut scene) => {
                if scene.theme.is_none() {
                    scene.theme = theme.map(str::to_string);
                }
                if scene.emotion.is_none() {
                    scene.emotion = emotion.map(str::to_string);
                }
                scene
            }
            Err(err) => {
                tracing::warn!(
                    "[SceneProvider] Themed scene generation failed, using local template: {}",
                    describe_failure(&err)
                );
                templated_scene(mode, theme, emotion)
            }
        }
    }

    async fn complete_scene(
        &self,
        completion: &CompletionRequest,
        mode: Mode,
        custom: bool,
    ) -> Result<Scene, GenerationError> {
        let service = self.service.as_ref().ok_or_else(|| {
            GenerationError::ServiceUnavailable("no generative service configured".into())
        })?;

        tracing::info!(
            "[SceneProvider] Requesting {} scene from {}",
            mode,
            service.name()
        );
        let reply = service.complete(completion).await?;
        scene_from_response(&reply, mode, custom)
    }

    fn catalog_scene(&self, mode: Mode) -> Result<Scene, GenerationError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let scene = self.catalog.pick(mode, &mut *rng)?;
        if scene.mode != mode {
            tracing::info!(
                "[SceneProvider] No catalog entries for {}, picked from {}",
                mode,
                scene.mode
            );
        }
        Ok(scene)
    }

    pub fn daily_challenge_on(&self, date: NaiveDate) -> DailyChallenge {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        daily_challenge_for(date, &mut *rng)
    }

    pub fn voice_exercise(&self) -> VoiceExercise {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        random_voice_exercise(&mut *rng)
    }
}

#[async_trait]
impl SceneSource for SceneProvider {
    async fn generate(&self, request: &SceneRequest) -> Result<Scene, GenerationError> {
        Ok(SceneProvider::generate(self, request).await)
    }

    async fn daily_challenge(&self, date: NaiveDate) -> Result<DailyChallenge, GenerationError> {
        Ok(self.daily_challenge_on(date))
    }
}
