use std::path::PathBuf;

/// Errors produced while building, generating or (de)serializing a map
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid output target {}: the file extension must be .tanmimap", .path.display())]
    InvalidOutputTarget { path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map data at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl MapError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        MapError::InvalidConfiguration(reason.into())
    }
}

pub type MapResult<T> = Result<T, MapError>;
