// ============================================================
// FILE DISCOVERY
// ============================================================
// Locate candidate data files in the data directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::error::Result;

const CSV_EXTENSION: &str = "csv";

/// Finds `*.csv` files, preferring names that contain a hint token
pub struct FileDiscovery {
    dir: PathBuf,
    hint: String,
}

impl FileDiscovery {
    pub fn new(dir: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            hint: hint.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Candidate files sorted by name. When any name contains the hint, only
    /// those are returned. A missing directory yields no candidates.
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            // Hidden files are not matched by a `*.csv` glob
            if name.starts_with('.') {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(CSV_EXTENSION) {
                continue;
            }
            files.push((name, path));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));

        let hinted: Vec<PathBuf> = if self.hint.is_empty() {
            Vec::new()
        } else {
            files
                .iter()
                .filter(|(name, _)| name.contains(&self.hint))
                .map(|(_, path)| path.clone())
                .collect()
        };

        if hinted.is_empty() {
            Ok(files.into_iter().map(|(_, path)| path).collect())
        } else {
            Ok(hinted)
        }
    }
}
