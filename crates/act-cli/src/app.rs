use act_application::{SceneProvider, SceneStore};
use act_core::profile::ProfileRepository;
use act_infrastructure::{ConfigService, TomlProfileRepository};
use act_interaction::OpenAIApiAgent;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Everything a command needs, wired from the user's config directory.
pub struct App {
    pub store: SceneStore,
    pub provider: Arc<SceneProvider>,
    repository: TomlProfileRepository,
}

impl App {
    /// Builds the provider and store, then hydrates the store from the saved profile.
    pub async fn load() -> Result<Self> {
        let config_service = ConfigService::new().context("Failed to resolve config path")?;
        let config = config_service.get_config();
        let catalog = config_service
            .load_catalog(&config)
            .context("Failed to load scene catalog")?;

        let mut provider = SceneProvider::new(catalog).with_generation_config(&config.generation);
        match OpenAIApiAgent::try_from_env(&config.generation) {
            Ok(agent) => {
                tracing::debug!("[act] Using OpenAI model {}", agent.model());
                provider = provider.with_service(Arc::new(agent));
            }
            Err(err) => {
                tracing::info!("[act] Generative service disabled: {}", err);
            }
        }
        let provider = Arc::new(provider);

        let store = SceneStore::with_config(provider.clone(), config.store.clone());
        let repository =
            TomlProfileRepository::new().context("Failed to resolve profile path")?;
        let profile = repository.load().await.context("Failed to load profile")?;
        store.hydrate(profile);

        Ok(Self {
            store,
            provider,
            repository,
        })
    }

    /// Persists preferences, favorites and history.
    pub async fn save(&self) -> Result<()> {
        self.repository
            .save(&self.store.profile())
            .await
            .context("Failed to save profile")
    }
}
