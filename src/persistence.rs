use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::variables::{Snapshot, VariableStore};

const AUTOSAVE_FILE: &str = "autosave.json";
const WORKSPACE_DIR: &str = "workspaces";
const HISTORY_FILE: &str = "history.txt";

/// Failures while reading or writing saved state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A file or directory could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path:   PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A saved file is not a valid snapshot, or a snapshot could not be
    /// encoded.
    #[error("invalid workspace data in {}: {source}", path.display())]
    Serialization {
        /// The file involved.
        path:   PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A workspace name that cannot be used as a file name.
    #[error("invalid workspace name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

/// Saved variable stores under one data directory.
///
/// ```text
/// <root>/autosave.json
/// <root>/history.txt
/// <root>/workspaces/<name>.json
/// ```
#[derive(Debug, Clone)]
pub struct Workspaces {
    root: PathBuf,
}

impl Workspaces {
    /// Uses `root` as the data directory. Nothing is created until the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the line editor keeps its history.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    /// Writes the session state to the autosave file.
    pub fn autosave(&self, store: &VariableStore) -> Result<(), PersistenceError> {
        write_snapshot(&self.root.join(AUTOSAVE_FILE), &store.snapshot())
    }

    /// Loads the autosave file into `store`.
    ///
    /// Returns `false` if there is no autosave file. A file that cannot be
    /// read or decoded is reported as a warning and leaves `store` as it
    /// was; a broken autosave never prevents a session from starting.
    pub fn autoload(&self, store: &mut VariableStore) -> bool {
        let path = self.root.join(AUTOSAVE_FILE);
        if !path.exists() {
            return false;
        }
        match read_snapshot(&path) {
            Ok(snapshot) => {
                store.restore(snapshot);
                debug!(path = %path.display(), variables = store.len(), "autosave loaded");
                true
            },
            Err(error) => {
                warn!(%error, "ignoring unreadable autosave");
                false
            },
        }
    }

    /// Saves `store` as the workspace `name`, replacing any earlier save.
    pub fn save(&self, name: &str, store: &VariableStore) -> Result<(), PersistenceError> {
        let path = self.workspace_path(name)?;
        write_snapshot(&path, &store.snapshot())
    }

    /// Replaces the contents of `store` with the workspace `name`.
    ///
    /// Returns `false` and leaves `store` untouched if there is no such
    /// workspace.
    pub fn restore(&self, name: &str, store: &mut VariableStore) -> Result<bool, PersistenceError> {
        let path = self.workspace_path(name)?;
        if !path.exists() {
            return Ok(false);
        }
        store.restore(read_snapshot(&path)?);
        Ok(true)
    }

    /// Deletes the workspace `name`. Returns `false` if it does not exist.
    pub fn delete(&self, name: &str) -> Result<bool, PersistenceError> {
        let path = self.workspace_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }

    /// Names of all saved workspaces, sorted.
    pub fn list(&self) -> Result<Vec<String>, PersistenceError> {
        let dir = self.root.join(WORKSPACE_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(&dir)(source)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(io_error(&dir))?.path();
            if path.extension().is_some_and(|ext| ext == "json")
               && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn workspace_path(&self, name: &str) -> Result<PathBuf, PersistenceError> {
        if !is_valid_name(name) {
            return Err(PersistenceError::InvalidName { name: name.to_string() });
        }
        Ok(self.root.join(WORKSPACE_DIR).join(format!("{name}.json")))
    }
}

/// Workspace names must be plain file names.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
    && !name.starts_with('.')
    && !name.chars().any(|c| matches!(c, '/' | '\\' | ':' | '\0'))
}

fn read_snapshot(path: &Path) -> Result<Snapshot, PersistenceError> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&text).map_err(json_error(path))
}

fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let json = serde_json::to_string_pretty(snapshot).map_err(json_error(path))?;
    fs::write(path, json).map_err(io_error(path))
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistenceError + use<> {
    let path = path.to_path_buf();
    move |source| PersistenceError::Io { path, source }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> PersistenceError + use<> {
    let path = path.to_path_buf();
    move |source| PersistenceError::Serialization { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert!(is_valid_name("project-1"));
        assert!(is_valid_name("taxes 2026"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(".hidden"));
        assert!(!is_valid_name("../escape"));
        assert!(!is_valid_name("a\\b"));
    }

    #[test]
    fn invalid_names_are_rejected_before_touching_disk() {
        let workspaces = Workspaces::new("/nonexistent/figya");
        let err = workspaces.save("../x", &VariableStore::new()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidName { .. }));
    }
}
