// ============================================================
// DATASET LOADER
// ============================================================
// Find the data file, decode it with the first encoding that works,
// and memoize the normalized session for the process lifetime

use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::use_cases::schema_normalizer::SchemaNormalizer;
use crate::domain::dashboard_config::DashboardConfig;
use crate::domain::dataset::{RawTable, Session, SourceEncoding};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::{decode, CsvParser, FileDiscovery};

/// A decoded and parsed data file
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub file_name: String,
    pub encoding: SourceEncoding,
    pub table: RawTable,
}

/// File discovery plus encoding fallback
pub struct DatasetLoader {
    discovery: FileDiscovery,
    parser: CsvParser,
}

impl DatasetLoader {
    pub fn new(dir: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        Self {
            discovery: FileDiscovery::new(dir, hint),
            parser: CsvParser::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.data_dir.clone(), config.file_hint.clone())
    }

    /// First candidate file and encoding that parse as a header-having table
    pub fn load(&self) -> Result<LoadedFile> {
        let candidates = self.discovery.candidates()?;
        if candidates.is_empty() {
            return Err(AppError::NoFileFound(format!(
                "no *.csv file in {}",
                self.discovery.dir().display()
            )));
        }

        for path in &candidates {
            let raw = match fs::read(path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Failed to read candidate file");
                    continue;
                }
            };

            for encoding in SourceEncoding::ATTEMPT_ORDER {
                match self.parse_with(&raw, encoding) {
                    Ok(table) => {
                        info!(
                            file = %path.display(),
                            encoding = %encoding,
                            rows = table.row_count(),
                            columns = table.column_count(),
                            "Loaded data file"
                        );
                        return Ok(LoadedFile {
                            file_name: file_name_of(path),
                            encoding,
                            table,
                        });
                    }
                    Err(e) => {
                        debug!(file = %path.display(), encoding = %encoding, error = %e, "Attempt failed");
                    }
                }
            }

            warn!(file = %path.display(), "No encoding could parse file");
        }

        Err(AppError::NoDecodableEncoding(format!(
            "{} candidate file(s) in {} failed with every encoding ({})",
            candidates.len(),
            self.discovery.dir().display(),
            SourceEncoding::ATTEMPT_ORDER
                .iter()
                .map(|e| e.label())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    fn parse_with(&self, raw: &[u8], encoding: SourceEncoding) -> Result<RawTable> {
        let text = decode(raw, encoding)
            .ok_or_else(|| AppError::ParseError(format!("bytes are not valid {}", encoding)))?;
        self.parser.parse_content(&text)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Memoized load + normalize. The first access does the work; later
/// accesses return the same session, or the same fatal error.
pub struct DatasetCache {
    loader: DatasetLoader,
    normalizer: SchemaNormalizer,
    cell: OnceCell<Result<Arc<Session>>>,
}

impl DatasetCache {
    pub fn new(loader: DatasetLoader, normalizer: SchemaNormalizer) -> Self {
        Self {
            loader,
            normalizer,
            cell: OnceCell::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            DatasetLoader::from_config(config),
            SchemaNormalizer::new(config.headers.clone()),
        )
    }

    pub fn session(&self) -> Result<Arc<Session>> {
        self.cell.get_or_init(|| self.load_session()).clone()
    }

    #[cfg(test)]
    fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    fn load_session(&self) -> Result<Arc<Session>> {
        let loaded = self.loader.load()?;
        let normalized = self.normalizer.normalize(loaded.table)?;
        Ok(Arc::new(Session::new(
            loaded.file_name,
            loaded.encoding,
            normalized.dataset,
            normalized.roles,
        )))
    }
}
