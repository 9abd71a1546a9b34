//! Web host errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    /// The listen address could not be bound
    #[error("Failed to bind {addr}: {error}")]
    Bind {
        addr: String,
        #[source]
        error: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
