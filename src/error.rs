use thiserror::Error;

/// Failures of the run-workflow action.
///
/// Kept `Clone` so a finished request can travel inside a `Message`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RunError {
    #[error("Please enter a query!")]
    EmptyInput,

    #[error("A workflow run is already in progress")]
    Busy,

    #[error("{0}")]
    Transport(String),

    #[error("backend answered with status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RunError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RunError::Decode(err.to_string())
        } else {
            RunError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
