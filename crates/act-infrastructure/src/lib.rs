//! Infrastructure layer for ACT: config paths, atomic TOML files, secrets,
//! configuration loading, and profile persistence.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_profile_repository;

pub use crate::config_service::ConfigService;
pub use crate::toml_profile_repository::TomlProfileRepository;
