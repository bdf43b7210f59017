//! Writes export artifacts to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::QuoteDocument;
use crate::spreadsheet::QuoteSheet;

/// Errors that can occur while saving an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode spreadsheet '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    fn io(
        path: &Path,
        source: std::io::Error,
    ) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the failed export was aimed at.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } => path,
        }
    }
}

fn prepare(
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    Ok(dir.join(file_name))
}

/// Saves `sheet` as CSV inside `dir`, creating the directory if needed.
///
/// Returns the path of the written file.
pub fn save_spreadsheet(
    dir: &Path,
    sheet: &QuoteSheet,
) -> Result<PathBuf, ExportError> {
    let path = prepare(dir, &sheet.file_name())?;
    let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;

    sheet
        .write_csv(BufWriter::new(file))
        .map_err(|source| ExportError::Csv {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), "spreadsheet saved");
    Ok(path)
}

/// Saves `document` as fixed-width text inside `dir`, creating the
/// directory if needed.
pub fn save_document(
    dir: &Path,
    document: &QuoteDocument,
) -> Result<PathBuf, ExportError> {
    let path = prepare(dir, &document.file_name())?;
    let mut writer = File::create(&path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::io(&path, e))?;

    writer
        .write_all(document.render_text().as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::io(&path, e))?;

    tracing::info!(
        path = %path.display(),
        title = document.properties.title,
        "document saved"
    );
    Ok(path)
}
