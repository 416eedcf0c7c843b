use thiserror::Error;

/// Startup configuration problems. These abort the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Please set it in your shell profile or MCP client config.")]
    MissingApiKey(&'static str),
}

/// Failures talking to the Met Office APIs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code, if the upstream answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status(),
            FetchError::Decode(_) => None,
        }
    }
}

/// The upstream payload did not have the expected shape.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unexpected payload for '{requested}': {source}")]
    Shape {
        requested: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid observation time {0:?}, expected minutes since midnight")]
    InvalidTime(String),

    #[error("no forecast features in payload")]
    NoFeatures,
}
