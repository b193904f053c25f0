#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("link references unknown node: {label}")]
    UnknownNode { label: String },
    #[error("invalid sankey model: {message}")]
    InvalidModel { message: String },
    #[error("sankey model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
