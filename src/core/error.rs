use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Oracle error: {0}")]
    OracleError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
