use thiserror::Error;

/// Error type for the edges around the median core: files, JSON and arguments.
///
/// Flattening and median selection never fail; malformed data degrades to
/// "no median available" instead.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Unknown distribution: {0}")]
    UnknownDistribution(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
