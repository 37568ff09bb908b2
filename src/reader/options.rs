use std::path::Path;

use serde::Deserialize;

use super::LoadError;

/// Line buffer size of the classic reader; longer lines are truncated.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// What happens when a plainly assigned key was enforced earlier in the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcePolicy {
    /// The later assignment is stored without any check.
    #[default]
    Overwritable,
    /// The later assignment must spell the enforced value exactly.
    Sticky,
}

/// Tunables for a [`Reader`](super::Reader).
///
/// Can be written as a TOML table:
///
/// ```toml
/// debug = true
/// strict_includes = true
/// max_line_len = 4096
/// enforce_policy = "sticky"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// Echo every accepted line and stored value at DEBUG level.
    pub debug: bool,
    /// Fail the load when an included file cannot be opened.
    pub strict_includes: bool,
    /// Maximum line length in bytes.
    pub max_line_len: usize,
    pub enforce_policy: EnforcePolicy,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            debug: false,
            strict_includes: false,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            enforce_policy: EnforcePolicy::default(),
        }
    }
}

impl ReaderOptions {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Loads options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| LoadError::OptionsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&contents).map_err(|e| LoadError::OptionsParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let options = ReaderOptions::from_toml_str("").unwrap();
        assert_eq!(options, ReaderOptions::default());
        assert_eq!(options.max_line_len, DEFAULT_MAX_LINE_LEN);
        assert_eq!(options.enforce_policy, EnforcePolicy::Overwritable);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict_includes = true").unwrap();
        writeln!(file, "max_line_len = 64").unwrap();
        writeln!(file, "enforce_policy = \"sticky\"").unwrap();

        let options = ReaderOptions::from_file(file.path()).unwrap();
        assert!(options.strict_includes);
        assert!(!options.debug);
        assert_eq!(options.max_line_len, 64);
        assert_eq!(options.enforce_policy, EnforcePolicy::Sticky);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ReaderOptions::from_toml_str("verbose = true").is_err());
    }

    #[test]
    fn test_missing_options_file() {
        let result = ReaderOptions::from_file("/nonexistent/path/reader.toml");
        assert!(matches!(result, Err(LoadError::OptionsRead { .. })));
    }

    #[test]
    fn test_malformed_options_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_line_len = \"wide\"").unwrap();
        let result = ReaderOptions::from_file(file.path());
        assert!(matches!(result, Err(LoadError::OptionsParse { .. })));
    }
}
