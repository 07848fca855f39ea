use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TimerResult<T> = Result<T, TimerError>;
