//! Error types for shim operations.
//!
//! Every variant here is shim-owned. Messages end with a period because they
//! are printed verbatim after the `<product>: ` prefix.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine shim executable path.")]
    Identity(#[source] std::io::Error),

    #[error("command line too long.")]
    CommandLineTooLong { len: usize, max: usize },

    #[error("could not execute {interpreter} command.")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not get {interpreter} command exit code.")]
    Wait {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
