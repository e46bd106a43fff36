use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No CNPJs found in input file: {0}")]
    EmptyInput(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Registry rate limit hit (HTTP 429)")]
    RateLimited,
    #[error("Registry answered with HTTP {0}")]
    Status(u16),
    #[error("Registry reported an error: {0}")]
    Registry(String),

    #[error("Couldn't decode registry response: {0}")]
    Json(#[from] serde_json::Error),
}
