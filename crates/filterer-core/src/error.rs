use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to decode bitmap: {0}")]
    DecodeFailure(String),

    #[error("failed to encode bitmap: {0}")]
    EncodeFailure(String),

    #[error("filter {0} is not the active filter")]
    FilterNotActive(Uuid),

    #[error("filter parameter must be finite, got {0}")]
    InvalidParameter(f32),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
