use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    /// min/max over an empty record set is undefined; rejected before any
    /// scale is built.
    #[error("dataset contains no monthly readings")]
    EmptyDataset,

    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
