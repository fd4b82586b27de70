use thiserror::Error;

/// Failure inside the save store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no save with id {0}")]
    NotFound(u32),
    #[error("constraint violated: {0}")]
    Constraint(String),
}
