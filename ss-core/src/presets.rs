//! Preset configuration loader.
//!
//! Loads stones, launches and environments from YAML files, so throws can be
//! described without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! ├── stones/
//! │   ├── flat_pebble.yaml
//! │   └── ...
//! ├── launches/
//! │   └── sidearm.yaml
//! └── environments/
//!     └── calm_lake.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{SkipError, SkipResult};
use crate::types::{Environment, Launch, StoneProperties};

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `stones/`, `launches/` and `environments/`
    /// subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a stone by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let pebble = loader.load_stone("flat_pebble")?;
    /// ```
    pub fn load_stone(&self, name: &str) -> SkipResult<StoneProperties> {
        let stone: StoneProperties = self.load("stones", name)?;
        stone.validate()?;
        Ok(stone)
    }

    pub fn load_launch(&self, name: &str) -> SkipResult<Launch> {
        let launch: Launch = self.load("launches", name)?;
        launch.validate()?;
        Ok(launch)
    }

    pub fn load_environment(&self, name: &str) -> SkipResult<Environment> {
        let env: Environment = self.load("environments", name)?;
        env.validate()?;
        Ok(env)
    }

    pub fn list_stones(&self) -> SkipResult<Vec<String>> {
        self.list("stones")
    }

    pub fn list_launches(&self) -> SkipResult<Vec<String>> {
        self.list("launches")
    }

    pub fn list_environments(&self) -> SkipResult<Vec<String>> {
        self.list("environments")
    }

    fn load<T: DeserializeOwned>(&self, subdir: &str, name: &str) -> SkipResult<T> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SkipError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let value = serde_yaml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "preset loaded");
        Ok(value)
    }

    fn list(&self, subdir: &str) -> SkipResult<Vec<String>> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
