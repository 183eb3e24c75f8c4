//! Scene Store
//!
//! Single source of truth for scene and session state. Mutations go through
//! the methods below; observers either read snapshots or `subscribe()` to a
//! watch channel that is notified on every change.

use act_core::challenge::DailyChallenge;
use act_core::config::{StalePolicy, StoreConfig};
use act_core::profile::Profile;
use act_core::scene::{Scene, SceneRequest, SceneSource};
use act_core::{GenerationError, Preferences, PreferencesPatch};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Lifecycle of the tracked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneState {
    pub current_scene: Option<Scene>,
    /// Most recent first.
    pub history: Vec<Scene>,
    pub favorites: Vec<Scene>,
    pub daily_challenge: Option<DailyChallenge>,
    pub preferences: Preferences,
    pub status: RequestStatus,
    pub error: Option<String>,
    pub generation_count: u64,
    pub last_generated: Option<DateTime<Utc>>,
}

impl SceneState {
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

pub struct SceneStore {
    source: Arc<dyn SceneSource>,
    config: StoreConfig,
    state: watch::Sender<SceneState>,
    latest_ticket: AtomicU64,
}

impl SceneStore {
    pub fn new(source: Arc<dyn SceneSource>) -> Self {
        Self::with_config(source, StoreConfig::default())
    }

    pub fn with_config(source: Arc<dyn SceneSource>, config: StoreConfig) -> Self {
        if config.effective_history_limit() != config.history_limit {
            tracing::warn!(
                "[SceneStore] history_limit {} out of range, using {}",
                config.history_limit,
                config.effective_history_limit()
            );
        }
        let (state, _) = watch::channel(SceneState::default());
        Self {
            source,
            config,
            state,
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Requests a scene and applies the outcome to the state.
    ///
    /// The returned result is the source's own; whether it was applied
    /// depends on the stale policy when requests overlap.
    pub async fn request_scene(&self, request: SceneRequest) -> Result<Scene, GenerationError> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.status = RequestStatus::Pending;
            state.error = None;
        });
        tracing::debug!(
            "[SceneStore] Request #{} pending (mode={})",
            ticket,
            request.mode
        );

        let result = self.source.generate(&request).await;

        if !self.should_apply(ticket) {
            return result;
        }

        match &result {
            Ok(scene) => {
                let limit = self.config.effective_history_limit();
                self.state.send_modify(|state| {
                    state.current_scene = Some(scene.clone());
                    push_history(&mut state.history, scene.clone(), limit);
                    state.generation_count += 1;
                    state.last_generated = Some(Utc::now());
                    state.status = RequestStatus::Fulfilled;
                });
                tracing::info!(
                    "[SceneStore] Request #{} fulfilled: {} ({})",
                    ticket,
                    scene.title,
                    scene.id
                );
            }
            Err(err) => {
                let message = err.to_string();
                self.state.send_modify(|state| {
                    state.status = RequestStatus::Rejected;
                    state.error = Some(message);
                });
                tracing::warn!("[SceneStore] Request #{} rejected: {}", ticket, err);
            }
        }

        result
    }

    /// Requests a scene for the stored preference mode.
    pub async fn request_scene_from_preferences(&self) -> Result<Scene, GenerationError> {
        let mode = self.state.borrow().preferences.mode;
        self.request_scene(SceneRequest::new(mode)).await
    }

    /// Loads the challenge for `date` through the same lifecycle.
    pub async fn load_daily_challenge(
        &self,
        date: NaiveDate,
    ) -> Result<DailyChallenge, GenerationError> {
        self.state.send_modify(|state| {
            state.status = RequestStatus::Pending;
            state.error = None;
        });

        let result = self.source.daily_challenge(date).await;
        match &result {
            Ok(challenge) => {
                self.state.send_modify(|state| {
                    state.daily_challenge = Some(challenge.clone());
                    state.status = RequestStatus::Fulfilled;
                });
                tracing::info!("[SceneStore] Daily challenge loaded: {}", challenge.id);
            }
            Err(err) => {
                let message = err.to_string();
                self.state.send_modify(|state| {
                    state.status = RequestStatus::Rejected;
                    state.error = Some(message);
                });
                tracing::warn!("[SceneStore] Daily challenge failed: {}", err);
            }
        }
        result
    }

    fn should_apply(&self, ticket: u64) -> bool {
        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket == latest {
            return true;
        }

        match self.config.stale_policy {
            StalePolicy::LastResponseWins => {
                tracing::warn!(
                    "[SceneStore] Applying stale response #{} (latest is #{})",
                    ticket,
                    latest
                );
                true
            }
            StalePolicy::DiscardStale => {
                tracing::info!(
                    "[SceneStore] Discarding stale response #{} (latest is #{})",
                    ticket,
                    latest
                );
                false
            }
        }
    }

    /// Shallow-merges `patch` into the preferences. Never triggers generation.
    pub fn set_preferences(&self, patch: PreferencesPatch) {
        self.state.send_modify(|state| state.preferences.merge(patch));
    }

    /// Adds the scene to favorites when absent, removes it when present.
    ///
    /// Returns whether the scene is a favorite afterwards.
    pub fn toggle_favorite(&self, scene: &Scene) -> bool {
        let mut favorited = false;
        self.state.send_modify(|state| {
            if let Some(index) = state.favorites.iter().position(|f| f.id == scene.id) {
                state.favorites.remove(index);
            } else {
                state.favorites.push(scene.clone());
                favorited = true;
            }
        });
        favorited
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    pub fn set_current_scene(&self, scene: Option<Scene>) {
        self.state.send_modify(|state| state.current_scene = scene);
    }

    pub fn add_to_history(&self, scene: Scene) {
        let limit = self.config.effective_history_limit();
        self.state
            .send_modify(|state| push_history(&mut state.history, scene, limit));
    }

    pub fn add_to_favorites(&self, scene: Scene) {
        self.state.send_modify(|state| {
            if !state.favorites.iter().any(|f| f.id == scene.id) {
                state.favorites.push(scene);
            }
        });
    }

    /// Returns whether a favorite was removed.
    pub fn remove_from_favorites(&self, id: &str) -> bool {
        let mut removed = false;
        self.state.send_modify(|state| {
            let before = state.favorites.len();
            state.favorites.retain(|f| f.id != id);
            removed = state.favorites.len() != before;
        });
        removed
    }

    pub fn increment_generation_count(&self) {
        self.state.send_modify(|state| {
            state.generation_count += 1;
            state.last_generated = Some(Utc::now());
        });
    }

    /// Replaces preferences, favorites and history with a persisted profile.
    ///
    /// Favorites keep the first entry per id.
    pub fn hydrate(&self, profile: Profile) {
        let limit = self.config.effective_history_limit();
        let mut favorites: Vec<Scene> = Vec::with_capacity(profile.favorites.len());
        for scene in profile.favorites {
            if !favorites.iter().any(|f| f.id == scene.id) {
                favorites.push(scene);
            }
        }
        self.state.send_modify(|state| {
            state.preferences = profile.preferences;
            state.favorites = favorites;
            state.history = profile.history;
            state.history.truncate(limit);
        });
    }

    /// The persisted subset of the current state.
    pub fn profile(&self) -> Profile {
        let state = self.state.borrow();
        Profile {
            preferences: state.preferences.clone(),
            favorites: state.favorites.clone(),
            history: state.history.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SceneState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SceneState {
        self.state.borrow().clone()
    }

    pub fn current_scene(&self) -> Option<Scene> {
        self.state.borrow().current_scene.clone()
    }

    pub fn history(&self) -> Vec<Scene> {
        self.state.borrow().history.clone()
    }

    pub fn favorites(&self) -> Vec<Scene> {
        self.state.borrow().favorites.clone()
    }

    pub fn preferences(&self) -> Preferences {
        self.state.borrow().preferences.clone()
    }

    pub fn daily_challenge(&self) -> Option<DailyChallenge> {
        self.state.borrow().daily_challenge.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn status(&self) -> RequestStatus {
        self.state.borrow().status
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn generation_count(&self) -> u64 {
        self.state.borrow().generation_count
    }

    pub fn last_generated(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().last_generated
    }
}

fn push_history(history: &mut Vec<Scene>, scene: Scene, limit: usize) {
    history.insert(0, scene);
    history.truncate(limit);
}
