use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{WipeError, WipeResult};

/// Published list of named mask images, in the order the file lists them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaskLibrary {
    base_dir: PathBuf,
    entries: Vec<(String, PathBuf)>,
}

impl MaskLibrary {
    /// Load a `{"name": "path", ...}` JSON file. Relative paths resolve against its directory.
    pub fn load(path: &Path) -> WipeResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read mask library '{}'", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_json(&json, base_dir)
    }

    pub fn from_json(json: &str, base_dir: impl Into<PathBuf>) -> WipeResult<Self> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| WipeError::serde(e.to_string()))?;

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let Some(path) = value.as_str() else {
                return Err(WipeError::validation(format!(
                    "mask library entry '{name}' must be a path string"
                )));
            };
            if path.is_empty() {
                return Err(WipeError::validation(format!(
                    "mask library entry '{name}' has an empty path"
                )));
            }
            entries.push((name, PathBuf::from(path)));
        }

        Ok(Self {
            base_dir: base_dir.into(),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, resolved path)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, PathBuf)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), self.absolutize(path)))
    }

    /// Resolved path of `name`.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, path)| self.absolutize(path))
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
