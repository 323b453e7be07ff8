//! Customer identifier store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// File-backed customer identifier
#[derive(Debug, Clone)]
pub struct CustomerIdStore {
    path: PathBuf,
}

impl CustomerIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored identifier, `None` if the file is missing or blank
    pub fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub fn save(&self, customer_id: &str) -> Result<(), PersistenceError> {
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, customer_id).map_err(write_err)
    }

    /// Load the identifier, generating and persisting a UUID v4 on first use
    pub fn load_or_create(&self) -> Result<String, PersistenceError> {
        if let Some(id) = self.load()? {
            tracing::debug!(customer_id = %id, "Loaded customer id");
            return Ok(id);
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.save(&id)?;
        tracing::info!(customer_id = %id, path = %self.path.display(), "Created customer id");
        Ok(id)
    }
}
