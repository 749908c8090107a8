//! Knowledge file loading.
//!
//! A knowledge file is either JSON or TOML, picked by extension. Its shape
//! decides what it becomes:
//!
//! | Format | Pairs                        | Keywords                  |
//! |--------|------------------------------|---------------------------|
//! | JSON   | `[{"question", "answer"}]`   | `{"keyword": "answer"}`   |
//! | TOML   | `[[entry]]` tables           | a `[keywords]` table      |

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::knowledge::{KeywordTable, KnowledgeBase, KnowledgeSource};

/// Errors raised while reading knowledge files.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON knowledge: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML knowledge: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported knowledge file format: {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("knowledge file {path} is neither question/answer pairs nor keyword rules")]
    UnrecognizedShape { path: PathBuf },
}

/// Knowledge file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeFormat {
    Json,
    Toml,
}

impl KnowledgeFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(KnowledgeFormat::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(KnowledgeFormat::Toml)
        } else {
            None
        }
    }
}

/// Load a knowledge file from disk.
pub fn load_knowledge(path: impl AsRef<Path>) -> Result<KnowledgeSource, KnowledgeError> {
    let path = path.as_ref();
    let format = KnowledgeFormat::from_path(path).ok_or_else(|| {
        KnowledgeError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let source = parse_knowledge(&content, format)?.ok_or_else(|| {
        KnowledgeError::UnrecognizedShape {
            path: path.to_path_buf(),
        }
    })?;

    tracing::info!(
        path = %path.display(),
        shape = source.shape(),
        entries = source.len(),
        "Loaded knowledge file"
    );
    Ok(source)
}

/// Parse knowledge text in a known format.
///
/// Returns `Ok(None)` when the text is well-formed but has neither shape.
pub fn parse_knowledge(
    content: &str,
    format: KnowledgeFormat,
) -> Result<Option<KnowledgeSource>, KnowledgeError> {
    match format {
        KnowledgeFormat::Json => parse_json(content),
        KnowledgeFormat::Toml => parse_toml(content),
    }
}

fn parse_json(content: &str) -> Result<Option<KnowledgeSource>, KnowledgeError> {
    // Deserialize straight from the text: going through `serde_json::Value`
    // would sort object keys and lose keyword order.
    match content.trim_start().chars().next() {
        Some('[') => Ok(Some(KnowledgeBase::from_json_str(content)?.into())),
        Some('{') => Ok(Some(KeywordTable::from_json_str(content)?.into())),
        Some(_) => {
            // Let serde_json report what is wrong with it
            serde_json::from_str::<serde_json::Value>(content)?;
            Ok(None)
        }
        None => Ok(None),
    }
}

fn parse_toml(content: &str) -> Result<Option<KnowledgeSource>, KnowledgeError> {
    let table: toml::Table = toml::from_str(content)?;

    if table.contains_key("entry") {
        Ok(Some(KnowledgeBase::from_toml_str(content)?.into()))
    } else if table.contains_key("keywords") {
        Ok(Some(KeywordTable::from_toml_str(content)?.into()))
    } else {
        Ok(None)
    }
}
