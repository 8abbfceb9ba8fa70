//! The arguments handed to the shim, kept exactly as delivered.
//!
//! On Windows a process receives one command line string, and splitting it is
//! a convention of the receiver. The shim does not split it. It forwards the
//! text after the program-name token unchanged, so quoting survives intact
//! whatever convention the interpreter uses.

use std::ffi::OsString;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    args: Vec<OsString>,
    raw_tail: Option<Vec<u16>>,
}

impl InvocationArgs {
    /// Arguments given as a vector, as on Unix. `args` excludes `argv[0]`.
    pub fn from_vec(args: Vec<OsString>) -> Self {
        Self {
            args,
            raw_tail: None,
        }
    }

    /// Arguments from a full Windows command line. `args` is the parsed view
    /// and is only used for reporting; the tail is what gets forwarded.
    pub fn from_command_line(command_line: &[u16], args: Vec<OsString>) -> Self {
        Self {
            args,
            raw_tail: Some(args_tail(command_line).to_vec()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsString> {
        self.args.iter()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Verbatim command line text following the program name, if known.
    pub fn raw_tail(&self) -> Option<&[u16]> {
        self.raw_tail.as_deref()
    }
}

/// Collects this process's arguments.
pub fn collect_args() -> InvocationArgs {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    #[cfg(windows)]
    let collected = InvocationArgs::from_command_line(&command_line(), args);
    #[cfg(not(windows))]
    let collected = InvocationArgs::from_vec(args);

    tracing::debug!(count = collected.len(), "collected arguments");
    collected
}

#[cfg(windows)]
fn command_line() -> Vec<u16> {
    use windows::Win32::System::Environment::GetCommandLineW;

    // SAFETY: the returned pointer refers to the process's command line
    // block, which stays valid and NUL-terminated for the process lifetime.
    unsafe { GetCommandLineW().as_wide().to_vec() }
}

const QUOTE: u16 = b'"' as u16;
const SPACE: u16 = b' ' as u16;
const TAB: u16 = b'\t' as u16;

/// Skips the program-name token and the blanks after it.
///
/// The program name has no escapes. Each `"` toggles quoting, and the token
/// ends at the first space or tab outside quotes, so `"C:\my dir"\tool.exe`
/// and `C:\"my dir"\tool.exe` are both a single token.
pub fn args_tail(command_line: &[u16]) -> &[u16] {
    let mut quoted = false;
    let end = command_line
        .iter()
        .position(|&c| {
            if c == QUOTE {
                quoted = !quoted;
            }
            !quoted && (c == SPACE || c == TAB)
        })
        .unwrap_or(command_line.len());
    let rest = &command_line[end..];
    let start = rest
        .iter()
        .position(|&c| c != SPACE && c != TAB)
        .unwrap_or(rest.len());
    &rest[start..]
}
