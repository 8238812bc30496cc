//! Top-level error types for relaybot.

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error enum wrapping domain-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Docs(#[from] DocsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("missing required config key: {0}")]
    MissingKey(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Inference provider errors.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no usable text content")]
    EmptyResponse,

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InferenceError {
    /// Whether a failed attempt is worth retrying.
    ///
    /// Transport failures, 408/429, and server errors are transient.
    /// Other 4xx (auth, validation) will fail the same way every time.
    pub fn is_retriable(&self) -> bool {
        match self {
            InferenceError::Request(_) => true,
            InferenceError::Status { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            InferenceError::EmptyResponse => true,
            InferenceError::Malformed(_) => true,
            InferenceError::Other(_) => false,
        }
    }
}

/// Chat-platform boundary errors.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("history read failed: {0}")]
    History(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Transcript assembly errors.
///
/// The `Display` renderings double as the user-visible diagnostics the
/// command layer posts back to the channel, so they keep the bracketed
/// phrasing and literal permission tokens.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("[Bot is missing required permissions: {}]", .missing.join(", "))]
    MissingCapabilities { missing: Vec<&'static str> },

    #[error("[Error reading message history: {0}]")]
    History(#[from] PlatformError),
}

/// Document-store boundary errors.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("document store request failed: {0}")]
    Store(String),

    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
