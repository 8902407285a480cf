use std::fmt;

use salvor_types::ValidationOutcome;

/// Result type for salvor-pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur inside the pipeline.
///
/// None of these escape `ResultPipeline::process`; the driver converts them
/// into an error-shaped `ProcessedResult` at the top level.
#[derive(Debug)]
pub enum Error {
    /// Input envelope failed validation; carries the complete ledger
    Validation(Vec<ValidationOutcome>),

    /// Strict parse failed (triggers the recovery chain, not fatal by itself)
    Parse(String),

    /// A recovery chain without a terminal fallback ran out of strategies
    RecoveryExhausted(String),

    /// Unexpected failure after a canonical result existed
    Processing(String),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(outcomes) => {
                let failed = outcomes.iter().filter(|outcome| !outcome.valid).count();
                write!(
                    f,
                    "Validation failed: {} of {} checks did not pass",
                    failed,
                    outcomes.len()
                )
            }
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::RecoveryExhausted(msg) => write!(f, "Recovery exhausted: {}", msg),
            Error::Processing(msg) => write!(f, "Processing error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Validation(_)
            | Error::Parse(_)
            | Error::RecoveryExhausted(_)
            | Error::Processing(_)
            | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
