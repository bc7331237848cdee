//! Suite file loading.
//!
//! A suite file is YAML (`.yaml`/`.yml`) or JSON (`.json`) holding an
//! optional suite name and a list of cases in the same shape as the
//! built-in table.

use std::path::{Path, PathBuf};

use reqcheck_domain::{DomainError, TestCase, TestSuite};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::serialization::{SerializationError, from_json, from_yaml};

/// Errors that can occur while loading a suite file.
#[derive(Debug, Error)]
pub enum SuiteFileError {
    /// File extension is not one of the supported formats.
    #[error("unsupported suite file extension for {path}: expected .yaml, .yml or .json")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The content could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SerializationError,
    },

    /// The parsed suite failed validation.
    #[error("invalid suite in {path}: {source}")]
    Invalid {
        /// Path that was validated.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: DomainError,
    },
}

/// Supported suite file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl SuiteFormat {
    /// Detects the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// On-disk shape of a suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteFile {
    /// Suite name; defaults to the file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cases in execution order.
    pub cases: Vec<TestCase>,
}

/// Parses suite content already read from `path`.
///
/// # Errors
///
/// Returns an error for an unknown extension, malformed content, an empty
/// case list or duplicate case names.
pub fn parse_suite(path: &Path, content: &str) -> Result<TestSuite, SuiteFileError> {
    let format = SuiteFormat::from_path(path).ok_or_else(|| SuiteFileError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let file: SuiteFile = match format {
        SuiteFormat::Yaml => from_yaml(content),
        SuiteFormat::Json => from_json(content),
    }
    .map_err(|source| SuiteFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let name = file.name.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("suite")
            .to_string()
    });

    TestSuite::new(name, file.cases).map_err(|source| SuiteFileError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a suite file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails [`parse_suite`].
pub async fn load_suite(path: &Path) -> Result<TestSuite, SuiteFileError> {
    if SuiteFormat::from_path(path).is_none() {
        return Err(SuiteFileError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SuiteFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let suite = parse_suite(path, &content)?;
    debug!(path = %path.display(), cases = suite.len(), "suite file loaded");
    Ok(suite)
}
