use thiserror::Error;

/// Main error type for subtitle resolution and serving
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching a remote subtitle source failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The source is neither an existing file nor a usable http(s) URL
    #[error("Invalid subtitle source: {0}")]
    InvalidSource(String),

    /// The SRT content could not be converted to WebVTT
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Container probing failed or returned unreadable output
    #[error("Probe error: {0}")]
    Probe(String),

    /// The external tool failed to extract the subtitle stream
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The subtitle listener could not be bound
    #[error("Failed to bind subtitle server on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SubtitleError>;
