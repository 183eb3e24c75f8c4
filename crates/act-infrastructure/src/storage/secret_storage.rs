//! secret.json access.
//!
//! The file is optional: without it the OpenAI agent reads the environment.

use crate::paths::ActPaths;
use act_core::config::{OpenAIConfig, SecretConfig};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SecretStorageError {
    ConfigDirNotFound,
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
            SecretStorageError::Read(path, e) => {
                write!(f, "Cannot read {}: {}", path.display(), e)
            }
            SecretStorageError::Parse(path, e) => {
                write!(f, "{} is not valid secret JSON: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

/// Read-only view of secret.json. Keys are never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = ActPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses the file. A missing file is an empty config, not an error.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SecretConfig::default()),
            Err(e) => return Err(SecretStorageError::Read(self.path.clone(), e)),
        };

        serde_json::from_str(&content).map_err(|e| SecretStorageError::Parse(self.path.clone(), e))
    }

    /// OpenAI credentials with a usable key, if the file has any.
    pub fn openai_credentials(&self) -> Result<Option<OpenAIConfig>, SecretStorageError> {
        Ok(self
            .load()?
            .openai
            .filter(|openai| !openai.api_key.trim().is_empty()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
