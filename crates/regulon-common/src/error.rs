use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegulonError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Regulatory table is empty")]
    EmptyInput,

    #[error("Unsupported strategy: {0:?} (expected A, B or C)")]
    UnsupportedStrategy(String),

    #[error("Duplicate edge {regulator} -> {target} at row {row}")]
    DuplicateEdge {
        regulator: String,
        target: String,
        row: usize,
    },

    #[error("Invalid edge at row {row}: {reason}")]
    InvalidEdge { row: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RegulonError {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegulonError>;
