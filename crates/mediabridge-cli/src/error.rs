use mediabridge_core::{ConfigError, ProviderId};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{provider} has no operation '{operation}'")]
    UnknownOperation {
        provider: ProviderId,
        operation: String,
    },

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownOperation { .. } => 2,
            Self::Argument(_) => 2,
            Self::Config(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
