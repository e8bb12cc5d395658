use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `posts-client`.
pub enum PostsClientError {
    /// Transport-level failure (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested post does not exist.
    #[error("not found")]
    NotFound,

    /// The server refused the verb; posts cannot be modified.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The server failed to process the request.
    #[error("server error: {0}")]
    Server(String),

    /// The request was rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result of `posts-client` operations.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    pub(crate) fn from_http_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed,
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }
}
