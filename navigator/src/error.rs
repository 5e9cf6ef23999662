use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("unrecognized route `{0}`")]
    UnknownRoute(String),

    #[error("invalid {param} `{value}` in route")]
    InvalidParam { param: &'static str, value: String },

    #[error("favorites cache I/O failed: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("favorites cache is not valid JSON: {0}")]
    CacheFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NavigationError>;
