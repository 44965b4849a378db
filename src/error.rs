//! Error type shared by every galpick module.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A toggle or lookup named a number that is not in the gallery.
    #[error("no image numbered {0}")]
    UnknownEntry(u32),

    #[error("image numbers must be positive (got 0 for {filename})")]
    ZeroNumber { filename: String },

    #[error("image number {number} is used by both {first} and {second}")]
    DuplicateNumber {
        number: u32,
        first: String,
        second: String,
    },

    #[error("gallery directory {} does not exist or is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk gallery: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("clipboard {stage}: {message}")]
    Clipboard { stage: &'static str, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
