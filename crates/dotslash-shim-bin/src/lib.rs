//! The `dotslash-windows-shim` executable.
//!
//! A thin layer over [`dotslash_shim`]: run one invocation, turn the outcome
//! into an exit code, and print the single diagnostic line for failures the
//! shim owns. Everything the interpreter prints or returns passes through
//! untouched.

use std::io::{self, Write};

use dotslash_shim::{InterpreterResolver, Outcome, SearchPathResolver, ShimConfig};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{interpreter} executable not found.")]
    InterpreterNotFound { interpreter: String },

    #[error(transparent)]
    Shim(#[from] dotslash_shim::Error),
}

/// Runs the shim against the search path and returns the exit code to use.
pub fn try_run(config: &ShimConfig) -> Result<i32, Error> {
    try_run_with(config, &SearchPathResolver)
}

pub fn try_run_with<R: InterpreterResolver>(config: &ShimConfig, resolver: &R) -> Result<i32, Error> {
    match dotslash_shim::run(config, resolver)? {
        Outcome::Relayed(code) => Ok(code),
        Outcome::InterpreterNotFound => Err(Error::InterpreterNotFound {
            interpreter: config.interpreter.clone(),
        }),
    }
}

/// `<product>: <message>\n`, the only thing the shim itself ever prints.
pub fn diagnostic(config: &ShimConfig, err: &Error) -> String {
    format!("{}: {}\n", config.product_name, err)
}

/// Writes the diagnostic to stderr in a single write.
pub fn report(config: &ShimConfig, err: &Error) {
    tracing::debug!(error = ?err, "shim failed");
    let line = diagnostic(config, err);
    let mut stderr = io::stderr().lock();
    // Nowhere left to report a failing stderr.
    let _ = stderr.write_all(line.as_bytes());
    let _ = stderr.flush();
}
