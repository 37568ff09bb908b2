use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::dict::Kind;
use crate::parse::NumericFailure;

/// Where in the input a line came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path, or `<stream>` for stream reads.
    pub origin: String,
    /// 1-based line number.
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("config source cannot be opened: {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config source '{origin}': {source}")]
    Io {
        origin: String,
        source: std::io::Error,
    },

    #[error("{location}: key '{name}' has no value")]
    MalformedLine { location: Location, name: String },

    #[error("{location}: cannot store '{token}' as {kind}: {reason}")]
    NumericConversion {
        location: Location,
        token: String,
        kind: Kind,
        reason: NumericFailure,
    },

    #[error("{location}: '{key}' is enforced as '{enforced}' but set to '{found}'")]
    EnforcementMismatch {
        location: Location,
        key: String,
        enforced: String,
        found: String,
    },

    #[error("failed to read reader options '{path}': {source}")]
    OptionsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse reader options '{path}': {source}")]
    OptionsParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
