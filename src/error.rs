use crate::dict::DictError;
use crate::reader::LoadError;
use thiserror::Error;

/// Top-level error type for the linedict library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("config load error: {0}")]
    Load(#[from] LoadError),

    #[error("dictionary lookup error: {0}")]
    Dict(#[from] DictError),
}
