pub mod dict;
mod error;
pub mod parse;
pub mod reader;

use std::io::{Read, Seek};
use std::path::Path;

pub use dict::{Dict, DictError, Kind, Value};
pub use error::Error;
pub use reader::{Diagnostic, EnforcePolicy, LoadError, Location, Reader, ReaderOptions};

/// Loads the config file at `path` with default options.
///
/// `debug` echoes every accepted line and stored value at DEBUG level.
pub fn read_path(path: impl AsRef<Path>, debug: bool) -> Result<Dict, LoadError> {
    Reader::builder().debug(debug).load_path(path)
}

/// Loads a config from the start of `stream` with default options.
pub fn read_stream<R: Read + Seek>(stream: &mut R, debug: bool) -> Result<Dict, LoadError> {
    Reader::builder().debug(debug).load_stream(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SCHEME HLLE\nVERBOSE True").unwrap();

        let dict = read_path(file.path(), true).unwrap();
        assert_eq!(dict.get_string("SCHEME").unwrap(), "HLLE");
        assert!(dict.get_bool("VERBOSE").unwrap());
        assert_eq!(dict.source().as_deref(), Some(file.path()));
    }

    #[test]
    fn test_read_stream() {
        let mut stream = Cursor::new("MODE yes\n");
        let dict = read_stream(&mut stream, false).unwrap();
        assert!(matches!(
            dict.get_bool("MODE"),
            Err(DictError::InvalidBool { .. })
        ));
    }
}
