#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shape mismatch: {0}")]
    Shape(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("render error: {0}")]
    Render(String),
    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ChartError>;
