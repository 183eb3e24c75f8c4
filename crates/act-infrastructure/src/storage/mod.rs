//! Storage layer for atomic file operations and secrets.

mod atomic_toml;
mod secret_storage;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use secret_storage::{SecretStorage, SecretStorageError};
