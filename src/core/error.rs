use thiserror::Error;

use crate::host::descriptor::TargetDescriptor;

#[derive(Error, Debug)]
pub enum InterceptError {
    #[error("Target not found in host: {0}")]
    TargetNotFound(TargetDescriptor),

    #[error("Ambiguous target ({matches} matches): {descriptor}")]
    AmbiguousTarget {
        descriptor: TargetDescriptor,
        matches: usize,
    },

    #[error("Host refused to bind {target}: {reason}")]
    BindFailed { target: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for InterceptError {
    fn from(err: toml::de::Error) -> Self {
        InterceptError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InterceptError>;
