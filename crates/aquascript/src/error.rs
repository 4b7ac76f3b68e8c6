//! AquaScript errors

use aqua_dom::{DomError, SelectorError};

/// Result type for AquaScript operations
pub type Result<T> = std::result::Result<T, AquaError>;

#[derive(Debug, thiserror::Error)]
pub enum AquaError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("DOM error: {0}")]
    Dom(DomError),
}

impl From<DomError> for AquaError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::InvalidSelector(err) => Self::Selector(err),
            other => Self::Dom(other),
        }
    }
}
