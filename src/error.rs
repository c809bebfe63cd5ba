use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed draw record: {0}")]
    DataFormat(String),

    #[error("invalid seed `{0}`: expected a number between 1 and 60")]
    InvalidSeed(String),

    #[error("no free number found after {0} random draws")]
    Exhausted(usize),

    #[error("results request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
