//! Who the shim was invoked as.
//!
//! The identity is the path of this process image *as it exists on disk*,
//! never the file a symlink or reparse point leads to. A shim reached through
//! `print_args.exe -> stdin_to_stdout.exe` must report `print_args`.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationIdentity {
    raw_path: PathBuf,
    logical_name: PathBuf,
}

impl InvocationIdentity {
    pub fn new(raw_path: impl Into<PathBuf>) -> Self {
        let raw_path = raw_path.into();
        let logical_name = logical_name(&raw_path);
        Self {
            raw_path,
            logical_name,
        }
    }

    /// Absolute path of the running shim, possibly `\\?\`-prefixed.
    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    /// The raw path minus its trailing extension. This is the file the
    /// interpreter is asked to run.
    pub fn logical_name(&self) -> &Path {
        &self.logical_name
    }
}

/// Resolves the running executable's own path without following links.
pub fn resolve_identity() -> Result<InvocationIdentity> {
    let identity = InvocationIdentity::new(current_image_path().map_err(Error::Identity)?);
    tracing::debug!(
        path = %identity.raw_path().display(),
        logical_name = %identity.logical_name().display(),
        "resolved shim image path"
    );
    Ok(identity)
}

/// Removes the extension of the final path component, if it has one.
pub fn logical_name(raw_path: &Path) -> PathBuf {
    match raw_path.file_name().and_then(strip_extension) {
        Some(stem) => raw_path.with_file_name(stem),
        None => raw_path.to_path_buf(),
    }
}

/// Returns `name` without its extension, or `None` when there is none.
///
/// The extension starts at the last `.` of the name. A space or path
/// separator after that `.` cancels it, matching `PathCchFindExtension`.
pub fn strip_extension(name: &OsStr) -> Option<&OsStr> {
    let bytes = name.as_encoded_bytes();
    let mut dot = None;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'.' => dot = Some(i),
            b' ' | b'\\' | b'/' => dot = None,
            _ => {}
        }
    }
    let dot = dot?;
    // SAFETY: `dot` indexes an ASCII `.`, so splitting right before it
    // cannot cut an encoded code point in half.
    Some(unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[..dot]) })
}

/// Largest path `GetModuleFileNameW` can return, in UTF-16 units.
#[cfg(windows)]
const MAX_EXTENDED_PATH: usize = 32768;

#[cfg(windows)]
fn current_image_path() -> io::Result<PathBuf> {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use windows::Win32::Foundation::MAX_PATH;
    use windows::Win32::System::LibraryLoader::GetModuleFileNameW;

    let mut capacity = MAX_PATH as usize;
    loop {
        let mut buf = vec![0u16; capacity];
        // SAFETY: `buf` is a live, writable buffer of `capacity` units and
        // `None` designates the executable of the current process.
        let len = unsafe { GetModuleFileNameW(None, &mut buf) } as usize;
        if len == 0 {
            return Err(io::Error::last_os_error());
        }
        // A full buffer means the path was truncated.
        if len < capacity {
            buf.truncate(len);
            return Ok(PathBuf::from(OsString::from_wide(&buf)));
        }
        if capacity >= MAX_EXTENDED_PATH {
            return Err(io::Error::other("module path exceeds the extended-length limit"));
        }
        tracing::trace!(capacity, "module path truncated, growing buffer");
        capacity = (capacity * 2).min(MAX_EXTENDED_PATH);
    }
}

/// `argv[0]` made absolute. Links are left in place: `/proc/self/exe` and
/// `current_exe` would resolve them.
#[cfg(not(windows))]
fn current_image_path() -> io::Result<PathBuf> {
    let argv0 = std::env::args_os()
        .next()
        .filter(|arg| !arg.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "argv[0] is empty"))?;

    let has_dir = argv0
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());
    let located = if has_dir {
        argv0
    } else {
        which::which(&argv0).map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?
    };
    std::path::absolute(located)
}
