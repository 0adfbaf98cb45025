use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
