use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading pipeline configuration files.
#[derive(Debug, Error)]
pub enum Error {
    /// The inputs were readable but produced no usable configuration,
    /// or a required column is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// A line or token could not be interpreted.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A numeric range spec with too few points or malformed bounds.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure inside the tabular-data reader.
    #[error("cannot load table {}: {source:#}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Attach file and line context to a range error raised while expanding
    /// an option value.
    pub(crate) fn at_line(self, path: impl Into<PathBuf>, line: usize) -> Self {
        match self {
            Error::InvalidRange(msg) => Error::InvalidRange(format!(
                "{}:{line}: {msg}",
                path.into().display()
            )),
            other => other,
        }
    }
}
