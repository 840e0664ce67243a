use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("duration must be a positive number of minutes")]
    ZeroDuration,

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("no event found with id '{0}'")]
    NotFound(String),

    #[error("duplicate event id '{0}'")]
    DuplicateId(String),

    #[error("journal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
