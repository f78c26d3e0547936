use quire_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The identifier names neither a document nor a stored version.
    #[error("not found: {0}")]
    NotFound(String),

    /// The authentication hook rejected the request's credentials.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Anonymous name allocation collided on every attempt.
    #[error("could not allocate a free name after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
