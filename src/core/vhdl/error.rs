use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VhdlError {
    #[error("empty identifier")]
    EmptyIdentifier,
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid port direction {0:?}")]
    InvalidDirection(String),
}
