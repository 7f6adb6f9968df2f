use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates `dir` (and its parents) when missing. Fails if the path exists
/// but is not a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir)
        .map_err(|err| PersistError::OutputDir(format!("{}: {err}", dir.display())))?;
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) => Err(PersistError::OutputDir(format!("{}: {err}", dir.display()))),
    }
}

/// Saves documents under one directory. Bytes land in a sibling temp file
/// that is renamed onto the final name, replacing any earlier export.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;
        let target = self.dir.join(filename);

        let staged = NamedTempFile::new_in(&self.dir).and_then(|mut tmp| {
            tmp.write_all(content)?;
            tmp.as_file().sync_all()?;
            Ok(tmp)
        });
        let staged = staged.map_err(|source| PersistError::Io {
            path: target.clone(),
            source,
        })?;

        staged.persist(&target).map_err(|err| PersistError::Io {
            path: target.clone(),
            source: err.error,
        })?;
        Ok(target)
    }
}
