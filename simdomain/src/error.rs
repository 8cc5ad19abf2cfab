use crate::domain::DomainError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    DomainError(#[from] DomainError),

    #[error("unknown algorithm {found:?} (expected one of {expected})")]
    UnknownAlgorithm { expected: String, found: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
