//! Scenes: the model, the seeded catalog, local fallbacks, and reply parsing.

pub mod catalog;
pub mod fallback;
pub mod model;
pub mod parse;
pub mod phrases;
pub mod request;

pub use catalog::{SceneCatalog, SceneTemplate};
pub use fallback::fallback_scene;
pub use model::{Difficulty, Mode, Scene};
pub use parse::{ParsedResponse, SceneDraft, parse_response, scene_from_response};
pub use phrases::{simple_custom_scene, templated_scene};
pub use request::{SceneRequest, SceneSource};
