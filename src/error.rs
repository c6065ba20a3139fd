use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling various errors encountered while
/// loading options for, or writing, a changelog.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file: {0}")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(String, #[source] toml::de::Error),

    #[error("fatal I/O error with output")]
    Io(#[from] std::io::Error),

    #[error("failed to convert date/time to string format")]
    TimeFormat(#[from] time::error::Format),

    #[error("changelog output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
