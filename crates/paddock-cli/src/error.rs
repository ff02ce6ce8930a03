use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] paddock_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Not signed in. Run `paddock login` first.")]
    NotSignedIn,
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Entry id must be a number, got '{0}'")]
    InvalidId(String),
    #[error("Failed to load your cars.")]
    LoadFailed,
    #[error("Something went wrong, please try again.")]
    MutationFailed,
    #[error("Failed to read image at {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: io::Error,
    },
}
