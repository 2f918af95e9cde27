use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend could not be reached, timed out, or returned a non-2xx
    /// status.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered 2xx but the payload could not be parsed into the
    /// expected shape. Callers treat this the same as unavailability.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else {
            BackendError::Unavailable(err.to_string())
        }
    }
}
