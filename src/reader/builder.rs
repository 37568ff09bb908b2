use std::fmt;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use super::pass::{Pass, STREAM_ORIGIN};
use super::{Diagnostic, EnforcePolicy, LoadError, ReaderOptions};
use crate::dict::Dict;

type DiagnosticSink = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Loads line-oriented `KEY value` files into a [`Dict`].
///
/// Each line holds one key and one value token. The value's kind (integer,
/// float or string) is inferred from its characters. Some keys are
/// directives instead of entries:
///
/// ```text
/// # comment line
/// CFL_NUMBER 0.5         # float
/// MAXITER 100000         # integer
/// SCHEME HLLE            # string
/// include other.cfg      # read another file into the same dictionary
/// enforce SCHEME HLLE    # fail unless SCHEME is unset or equal to "HLLE"
/// warning low memory     # report the text, store nothing
/// BREAK                  # stop reading this source
/// ```
///
/// Recoverable conditions are logged through `tracing` and also handed to the
/// callback registered with [`on_diagnostic`](Self::on_diagnostic).
///
/// ## Example
///
/// ```no_run
/// use linedict::Reader;
///
/// let dict = Reader::builder()
///     .strict_includes(true)
///     .on_diagnostic(|d| eprintln!("{d}"))
///     .load_path("solver.in")?;
///
/// let cfl = if dict.check_float("CFL_NUMBER") {
///     dict.get_float("CFL_NUMBER")?
/// } else {
///     0.5
/// };
/// # let _ = cfl;
/// # Ok::<(), linedict::Error>(())
/// ```
#[derive(Clone, Default)]
#[must_use = "a reader does nothing until one of its load methods is called"]
pub struct Reader {
    pub(super) options: ReaderOptions,
    pub(super) sink: Option<DiagnosticSink>,
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("options", &self.options)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Reader {
    /// Creates a reader with default options.
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Echo every accepted line and stored value at DEBUG level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    /// Makes an include of a file that cannot be opened fail the whole load.
    ///
    /// By default such includes are skipped with a [`Diagnostic::MissingInclude`].
    pub fn strict_includes(mut self, strict: bool) -> Self {
        self.options.strict_includes = strict;
        self
    }

    /// Lines longer than `max` bytes are truncated.
    pub fn max_line_len(mut self, max: usize) -> Self {
        self.options.max_line_len = max;
        self
    }

    pub fn enforce_policy(mut self, policy: EnforcePolicy) -> Self {
        self.options.enforce_policy = policy;
        self
    }

    /// Registers a callback receiving every recoverable [`Diagnostic`].
    pub fn on_diagnostic(mut self, sink: impl Fn(&Diagnostic) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Reads the file at `path` into a new dictionary.
    ///
    /// The path, and the paths of any includes, are resolved against the
    /// process working directory.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Dict, LoadError> {
        let dict = Dict::new();
        self.load_path_into(path, &dict)?;
        Ok(dict)
    }

    /// Reads the file at `path` into an existing dictionary.
    ///
    /// On failure, entries added before the error remain in `dict`.
    pub fn load_path_into(&self, path: impl AsRef<Path>, dict: &Dict) -> Result<(), LoadError> {
        let path = path.as_ref();
        Pass::new(self, dict).read_file(path)?;
        dict.set_source(path);
        Ok(())
    }

    /// Rewinds `stream` and reads it to the end into a new dictionary.
    ///
    /// The stream is borrowed and stays open.
    pub fn load_stream<R: Read + Seek>(&self, stream: &mut R) -> Result<Dict, LoadError> {
        let dict = Dict::new();
        self.load_stream_into(stream, &dict)?;
        Ok(dict)
    }

    pub fn load_stream_into<R: Read + Seek>(
        &self,
        stream: &mut R,
        dict: &Dict,
    ) -> Result<(), LoadError> {
        stream
            .seek(SeekFrom::Start(0))
            .map_err(|e| LoadError::Io {
                origin: STREAM_ORIGIN.to_string(),
                source: e,
            })?;
        Pass::new(self, dict).read_lines(BufReader::new(stream), STREAM_ORIGIN)
    }

    pub fn load_str(&self, contents: &str) -> Result<Dict, LoadError> {
        self.load_stream(&mut Cursor::new(contents.as_bytes()))
    }
}
