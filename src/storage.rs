//! Snapshot persistence for tasks.
//!
//! The store talks to a [`TaskRepository`] so the backend is swappable: a
//! JSON file in the user's data directory for the real application, an
//! in-memory vector for tests. The snapshot is the whole collection, not an
//! incremental log; last writer wins.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::error::Result;
use crate::task::Task;

/// File name of the snapshot inside the data directory.
pub const SNAPSHOT_FILE: &str = "tasks.json";

/// Storage backend for the full-collection task snapshot.
pub trait TaskRepository {
    /// Load the persisted collection. Absent or unreadable storage yields an
    /// empty collection rather than an error; only real IO failures propagate.
    fn load(&self) -> Result<Vec<Task>>;

    /// Replace the persisted collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// JSON-file repository holding one serialized array of task records.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&content) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                // Unparseable content is treated as absent, not fatal.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "task snapshot is malformed; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// In-memory repository for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.lock().expect("repository lock").clone())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.lock().expect("repository lock") = tasks.to_vec();
        Ok(())
    }
}

/// Write data atomically using temp file + rename.
///
/// Readers never see a partial snapshot; the file is either fully written or
/// unchanged.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Default snapshot location in the platform data directory.
pub fn default_data_file() -> PathBuf {
    match ProjectDirs::from("", "", "taskdeck") {
        Some(dirs) => dirs.data_dir().join(SNAPSHOT_FILE),
        None => PathBuf::from(SNAPSHOT_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        assert!(repo.load().expect("load").is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{not json").expect("write");

        let repo = JsonFileRepository::new(path);
        assert!(repo.load().expect("load").is_empty());
    }
}
