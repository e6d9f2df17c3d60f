//! Fixtures
//!
//! Raw menu payloads stored as JSON under `fixtures/menus/`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;

use crate::menu::{Menu, MenuError, normalize};

/// Fixture loading errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload does not normalise into a menu
    #[error("Fixture is not a ready menu: {0}")]
    Menu(#[from] MenuError),
}

/// Fixture set rooted at a directory.
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Fixture {
    /// Fixtures shipped with this crate.
    pub fn new() -> Self {
        Self::with_base_path(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
    }

    /// Fixtures under a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of a named menu payload.
    pub fn menu_path(&self, name: &str) -> PathBuf {
        self.base_path.join("menus").join(format!("{name}.json"))
    }

    /// Load a named raw menu payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn payload(&self, name: &str) -> Result<Value, FixtureError> {
        load_payload(self.menu_path(name))
    }

    /// Load and normalise a named menu payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be loaded or has no restaurant info card.
    pub fn menu(&self, name: &str) -> Result<Menu, FixtureError> {
        Ok(normalize(&self.payload(name)?)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a raw payload document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_payload(path: impl AsRef<Path>) -> Result<Value, FixtureError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_json::from_str(&contents)?)
}
