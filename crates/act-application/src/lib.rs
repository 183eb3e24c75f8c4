//! Application layer for ACT.
//!
//! `SceneProvider` turns requests into scenes (catalog, generative service,
//! local fallbacks); `SceneStore` owns the session state built from them.

pub mod scene_provider;
pub mod scene_store;

pub use scene_provider::SceneProvider;
pub use scene_store::{RequestStatus, SceneState, SceneStore};
