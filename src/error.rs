use thiserror::Error;

pub type Result<T> = std::result::Result<T, TutorError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TutorError {
    #[error("parse error: {0}")]
    Parse(String),
    /// Numeric evaluation left the real domain or hit a singularity.
    #[error("domain error: {0}")]
    Domain(String),
    #[error("config error: {0}")]
    Config(String),
}
