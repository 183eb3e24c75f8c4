//! TOML files replaced atomically on save.
//!
//! A save writes `<name>.tmp` next to the target, fsyncs it and renames it
//! over the target. Readers see either the old file or the new one.

use act_core::ActError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum AtomicTomlError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Encode(toml::ser::Error),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            AtomicTomlError::Parse { path, source } => {
                write!(f, "Invalid TOML in {}: {}", path.display(), source)
            }
            AtomicTomlError::Encode(e) => write!(f, "TOML serialization error: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<AtomicTomlError> for ActError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::Io { path, source } => {
                ActError::io(format!("{}: {}", path.display(), source))
            }
            AtomicTomlError::Parse { path, source } => ActError::Serialization {
                format: "TOML".into(),
                message: format!("{}: {}", path.display(), source),
            },
            AtomicTomlError::Encode(e) => e.into(),
        }
    }
}

/// A typed TOML file.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| AtomicTomlError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub fn load_or_default(&self) -> Result<T, AtomicTomlError>
    where
        T: Default,
    {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let encoded = toml::to_string_pretty(data).map_err(AtomicTomlError::Encode)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp_path = self.tmp_path();
        let write_tmp = || -> std::io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(encoded.as_bytes())?;
            file.sync_all()
        };
        write_tmp().map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> AtomicTomlError {
        AtomicTomlError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
