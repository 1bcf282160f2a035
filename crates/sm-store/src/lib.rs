//! Storage layer for the splits manager.
//!
//! Reads and writes a [`RunDocument`] as JSON (`.json`) or as a LiveSplit
//! splits file (`.lss`), picking the format from the file extension.
//!
//! # JSON layout
//!
//! ```json
//! { "Title": "1 Year 1 Game", "Games": [
//!   { "Name": "Outer Wilds", "Estimate": "20:00:00", "State": "Playing",
//!     "Sessions": ["01:30:00, 2024-01-01", "02:00:00"] } ] }
//! ```
//!
//! `State` is omitted for untouched games and `Sessions` when empty.

mod lss;

use std::fmt;
use std::path::{Path, PathBuf};

use sm_core::RunDocument;
use thiserror::Error;
use tracing::debug;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid LiveSplit document: {0}")]
    XmlDe(#[from] quick_xml::DeError),
    #[error("cannot write LiveSplit document: {0}")]
    XmlSe(#[from] quick_xml::SeError),
    /// The extension names no known format.
    #[error("unknown document format for {} (expected .json or .lss)", .0.display())]
    UnknownFormat(PathBuf),
}

/// On-disk format of a run document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    /// LiveSplit splits file.
    Lss,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("lss") => Ok(Self::Lss),
            _ => Err(StoreError::UnknownFormat(path.to_path_buf())),
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Lss => "lss",
        }
    }

    pub fn parse(self, text: &str) -> Result<RunDocument, StoreError> {
        match self {
            Self::Json => Ok(serde_json::from_str(text)?),
            Self::Lss => lss::from_str(text),
        }
    }

    pub fn render(self, doc: &RunDocument) -> Result<String, StoreError> {
        match self {
            Self::Json => {
                let mut text = serde_json::to_string_pretty(doc)?;
                text.push('\n');
                Ok(text)
            }
            Self::Lss => lss::to_string(doc),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Reads a run document, its format given by the extension.
pub fn load(path: &Path) -> Result<RunDocument, StoreError> {
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = format.parse(&text)?;
    debug!(path = %path.display(), %format, games = doc.games.len(), "document loaded");
    Ok(doc)
}

/// Writes a run document, creating parent directories as needed.
pub fn save(path: &Path, doc: &RunDocument) -> Result<(), StoreError> {
    let format = DocumentFormat::from_path(path)?;
    let text = format.render(doc)?;
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, text).map_err(io_error)?;
    debug!(path = %path.display(), %format, games = doc.games.len(), "document saved");
    Ok(())
}
