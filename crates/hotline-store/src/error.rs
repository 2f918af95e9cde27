use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("artifact not found: {0}")]
    NotFound(String),

    #[error("invalid artifact name: {0}")]
    InvalidName(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
