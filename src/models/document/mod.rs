// Host document model
// Elements carrying string attributes plus their declared output slots

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a document file. Loading is the only fallible
/// boundary before ticking begins.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to parse TOML document: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output slots declared beneath an element. Absent slots are never written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSet {
    pub days: bool,
    pub hours: bool,
    pub minutes: bool,
    pub seconds: bool,
    pub status: bool,
}

impl SlotSet {
    pub const fn all() -> Self {
        Self {
            days: true,
            hours: true,
            minutes: true,
            seconds: true,
            status: true,
        }
    }
}

/// One node of the host document: an attribute map plus the output slots
/// present beneath it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub slots: SlotSet,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute presence, independent of its value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// The host document: a flat list of elements in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Document {
    /// Loads a document from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&contents)?),
            Some("json") => Ok(serde_json::from_str(&contents)?),
            other => Err(DocumentError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
