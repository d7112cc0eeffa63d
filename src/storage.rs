// File: ./src/storage.rs
// Local JSON snapshot of the planning records the weekly view works on
use crate::model::Snapshot;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE_NAME: &str = "snapshot.json";

pub struct LocalStorage;

impl LocalStorage {
    pub fn default_path() -> Option<PathBuf> {
        if let Some(proj) = ProjectDirs::from("com", "cwplan", "cwplan") {
            let data_dir = proj.data_dir();
            Self::ensure_dir(data_dir);
            return Some(data_dir.join(SNAPSHOT_FILE_NAME));
        }
        None
    }

    /// Creates `dir` if needed. Failure is logged, the caller hits it again on first write.
    pub fn ensure_dir(dir: &Path) -> bool {
        if dir.exists() {
            return true;
        }
        match fs::create_dir_all(dir) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to create data directory {}: {}", dir.display(), e);
                false
            }
        }
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive lock on a `.lock` file next to `path`.
    pub fn with_lock<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;
        FileExt::lock_exclusive(&lock_file)?;
        let result = f();
        FileExt::unlock(&lock_file)?;
        result
    }

    /// Missing file reads as an empty snapshot. A file that does not parse is an error.
    pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            log::warn!("No snapshot at {}, using an empty one", path.display());
            return Ok(Snapshot::default());
        }
        Self::with_lock(path, || {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            let snapshot: Snapshot = serde_json::from_str(&json)
                .with_context(|| format!("Corrupt snapshot {}", path.display()))?;
            log::debug!("Loaded snapshot from {}", path.display());
            Ok(snapshot)
        })
    }

    pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
        Self::with_lock(path, || {
            let json = serde_json::to_string_pretty(snapshot)?;
            Self::atomic_write(path, json)?;
            log::debug!("Saved snapshot to {}", path.display());
            Ok(())
        })
    }
}
