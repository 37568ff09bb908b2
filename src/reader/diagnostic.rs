use std::fmt;
use std::path::PathBuf;

use super::Location;

/// A recoverable condition met while reading. The load continues.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// Text of a `warning` directive.
    Warning { location: Location, message: String },
    /// A file tried to include itself; the line was skipped.
    SelfInclude { location: Location, path: PathBuf },
    /// An include would re-enter a file that is still being read; the line was skipped.
    IncludeCycle { location: Location, path: PathBuf },
    /// An included file could not be opened and was skipped.
    MissingInclude {
        location: Location,
        path: PathBuf,
        reason: String,
    },
    /// A line exceeded the length limit and was cut.
    LineTruncated { location: Location, limit: usize },
}

impl Diagnostic {
    pub fn location(&self) -> &Location {
        match self {
            Diagnostic::Warning { location, .. }
            | Diagnostic::SelfInclude { location, .. }
            | Diagnostic::IncludeCycle { location, .. }
            | Diagnostic::MissingInclude { location, .. }
            | Diagnostic::LineTruncated { location, .. } => location,
        }
    }

    pub(crate) fn emit(&self) {
        let location = self.location();
        match self {
            Diagnostic::SelfInclude { .. } | Diagnostic::IncludeCycle { .. } => {
                tracing::error!(%location, "{}", self)
            }
            _ => tracing::warn!(%location, "{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Warning { message, .. } => write!(f, "warning: {message}"),
            Diagnostic::SelfInclude { path, .. } => {
                write!(f, "'{}' includes itself, skipped", path.display())
            }
            Diagnostic::IncludeCycle { path, .. } => {
                write!(f, "include of '{}' would form a cycle, skipped", path.display())
            }
            Diagnostic::MissingInclude { path, reason, .. } => {
                write!(f, "include '{}' skipped: {reason}", path.display())
            }
            Diagnostic::LineTruncated { limit, .. } => {
                write!(f, "line longer than {limit} bytes was truncated")
            }
        }
    }
}
