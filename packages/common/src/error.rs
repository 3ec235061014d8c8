use thiserror::Error;

/// Common error type shared by the formthinker packages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}
