use thiserror::Error;

use super::Kind;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DictError {
    #[error("key '{key}' not found in the {kind} namespace")]
    NotFound { key: String, kind: Kind },

    #[error("key '{key}' is not a {requested} (found as: {})", list_kinds(.present))]
    WrongKind {
        key: String,
        requested: Kind,
        present: Vec<Kind>,
    },

    #[error("value '{value}' of key '{key}' is not a boolean (expected true or false)")]
    InvalidBool { key: String, value: String },
}

impl DictError {
    /// Returns true when the key is absent from every namespace.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DictError::NotFound { .. })
    }
}

fn list_kinds(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(Kind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
