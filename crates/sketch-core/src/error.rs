use thiserror::Error;

/// Errors raised when values cross into the drawing model from outside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SketchError {
    #[error("unknown tool `{0}`")]
    UnknownTool(String),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("font error: {0}")]
    Font(String),
}
