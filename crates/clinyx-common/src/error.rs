use thiserror::Error;

/// Failure to parse a typed identifier from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("{kind} id is empty")]
    Empty { kind: &'static str },

    #[error("invalid {kind} id {value:?}: expected a positive integer")]
    Invalid { kind: &'static str, value: String },

    #[error("{kind} id must be non-zero")]
    Zero { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, IdParseError>;
