//! Error type shared by the planner library and its binaries.

use thiserror::Error;

/// Errors that can occur while planning a settlement.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Grid arrays of unequal shape, or ragged rows within one array.
    #[error("grid shape mismatch: {what} is {found:?}, expected {expected:?} (width, height)")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("grid is empty")]
    EmptyGrid,

    #[error("ragged rows in {0}")]
    RaggedRows(&'static str),

    /// The selector accepted no site at all.
    #[error("no viable sites found among {candidates} candidates")]
    NoViableSites { candidates: usize },

    #[error("style table has no profile for style '{0}'")]
    MissingStyleProfile(String),

    #[error("renderer failed: {0}")]
    Render(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PlannerError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        PlannerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        PlannerError::Parse {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| PlannerError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| PlannerError::parse(path, e))
}

/// Serialize a value as pretty JSON and write it to `path`.
pub fn write_json<T: serde::Serialize>(path: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| PlannerError::parse(path, e))?;
    std::fs::write(path, text).map_err(|e| PlannerError::io(path, e))
}
