//! Line tokenizing, value type inference and directive recognition.

mod classify;
mod directive;
mod token;

pub use classify::{classify, convert, NumericFailure};
pub use directive::Directive;
pub use token::{Scanner, COMMENT};
