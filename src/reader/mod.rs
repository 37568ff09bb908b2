//! Line-by-line config reading with includes, enforcement and early stop.

mod builder;
mod diagnostic;
mod error;
mod options;
mod pass;
mod source;

pub use builder::Reader;
pub use diagnostic::Diagnostic;
pub use error::{LoadError, Location};
pub use options::{EnforcePolicy, ReaderOptions, DEFAULT_MAX_LINE_LEN};
