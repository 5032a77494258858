use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("activity data unavailable: {0}")]
    DataUnavailable(String),

    #[error("malformed activity data: {0}")]
    MalformedData(String),

    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to activity source failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData(message.into())
    }

    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
