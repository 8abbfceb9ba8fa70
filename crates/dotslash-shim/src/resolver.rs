//! Interpreter lookup.
//!
//! The shim is a mechanism: it maps "run this logical name" onto a single
//! interpreter binary. Where that binary comes from is the resolver's
//! business. Production uses the process search path.
//!
//! Only a native executable is accepted. On Windows a `dotslash.cmd` or
//! `dotslash.bat` would be run through `cmd.exe`, which reinterprets the
//! forwarded command line, so those are skipped even when `PATHEXT` lists
//! them first.

use std::env::{self, JoinPathsError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub trait InterpreterResolver {
    fn resolve(&self, interpreter: &str) -> Option<PathBuf>;
}

/// `interpreter` with the platform's executable suffix.
fn executable_name(interpreter: &str) -> String {
    format!("{interpreter}{}", env::consts::EXE_SUFFIX)
}

#[cfg(windows)]
fn is_native_executable(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(env::consts::EXE_EXTENSION))
}

#[cfg(not(windows))]
fn is_native_executable(_path: &Path) -> bool {
    true
}

fn first_native<I: Iterator<Item = PathBuf>>(mut found: I) -> Option<PathBuf> {
    found.find(|path| {
        let native = is_native_executable(path);
        if !native {
            tracing::debug!(path = %path.display(), "skipping non-native interpreter");
        }
        native
    })
}

/// Searches the inherited `PATH`, the directories the OS consults for a bare
/// command name.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchPathResolver;

impl InterpreterResolver for SearchPathResolver {
    fn resolve(&self, interpreter: &str) -> Option<PathBuf> {
        match which::which_all(executable_name(interpreter)) {
            Ok(found) => first_native(found),
            Err(err) => {
                tracing::debug!(interpreter, %err, "interpreter not on search path");
                None
            }
        }
    }
}

/// Searches an explicit list of directories, in order.
#[derive(Clone, Debug)]
pub struct DirsResolver {
    paths: OsString,
    cwd: PathBuf,
}

impl DirsResolver {
    /// `cwd` anchors relative directories. Fails when a directory cannot be
    /// joined into a search path, such as a Unix directory containing `:`.
    pub fn new<I, P>(dirs: I, cwd: impl Into<PathBuf>) -> Result<Self, JoinPathsError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Ok(Self {
            paths: env::join_paths(dirs.into_iter().map(|d| d.as_ref().to_path_buf()))?,
            cwd: cwd.into(),
        })
    }
}

impl InterpreterResolver for DirsResolver {
    fn resolve(&self, interpreter: &str) -> Option<PathBuf> {
        match which::which_in_all(executable_name(interpreter), Some(&self.paths), &self.cwd) {
            Ok(found) => first_native(found),
            Err(err) => {
                tracing::debug!(interpreter, %err, "interpreter not in search directories");
                None
            }
        }
    }
}

impl<R: InterpreterResolver + ?Sized> InterpreterResolver for &R {
    fn resolve(&self, interpreter: &str) -> Option<PathBuf> {
        (**self).resolve(interpreter)
    }
}

/// Looks up `interpreter`, returning `None` when it cannot be found.
pub fn locate_interpreter<R: InterpreterResolver>(resolver: &R, interpreter: &str) -> Option<PathBuf> {
    let found = resolver.resolve(interpreter);
    if let Some(path) = &found {
        tracing::debug!(interpreter, path = %path.display(), "located interpreter");
    }
    found
}
