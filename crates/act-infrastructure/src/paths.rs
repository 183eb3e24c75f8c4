//! Path management for act configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/act/              # Config directory (platform config dir + "act")
//! ├── config.toml             # Application configuration
//! ├── secret.json             # API keys
//! └── profile.toml            # Preferences, favorites, history
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "act";

#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct ActPaths;

impl ActPaths {
    /// Returns the act configuration directory (e.g. `~/.config/act/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// API keys live here; the file should be mode 600.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    pub fn profile_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("profile.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_share_the_act_directory() {
        let Ok(dir) = ActPaths::config_dir() else {
            // No home directory in this environment.
            return;
        };
        assert!(dir.ends_with("act"));
        assert_eq!(ActPaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(ActPaths::secret_file().unwrap(), dir.join("secret.json"));
        assert_eq!(ActPaths::profile_file().unwrap(), dir.join("profile.toml"));
    }
}
