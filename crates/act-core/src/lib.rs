//! Domain layer for ACT.
//!
//! Holds the scene model, the seeded catalog and phrase tables, response
//! parsing, preferences, practice challenges, and the traits the outer layers
//! implement (`GenerativeService`, `SceneSource`, `ProfileRepository`).

pub mod challenge;
pub mod config;
pub mod error;
pub mod generation;
pub mod preferences;
pub mod profile;
pub mod scene;

pub use error::{ActError, GenerationError};
pub use preferences::{Preferences, PreferencesPatch};
pub use scene::{Difficulty, Mode, Scene, SceneCatalog, SceneRequest};
