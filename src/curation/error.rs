use thiserror::Error;

/// Classified transport-level failure of one network attempt.
///
/// These never propagate out of a provider call; they exist so the fetch
/// policy can log what happened before degrading to "no data".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Unreachable(err.to_string())
        }
    }
}
