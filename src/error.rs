use thiserror::Error;

/// Errors raised while retrieving a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure, timeout, or malformed response body
    #[error("Failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The URL could not be parsed as an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl FetchError {
    /// Status code for non-2xx answers, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors that can occur around a recipe extraction
///
/// Only transport and setup problems are errors. A page without a recognizable
/// recipe is not an error; the extractor reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to fetch the page
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl ExtractError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, ExtractError::Fetch(_))
    }
}
