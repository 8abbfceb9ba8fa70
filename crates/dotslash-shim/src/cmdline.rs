//! Length accounting for the command line handed to `CreateProcessW`.
//!
//! The shim's own command line may already sit near the limit, and the new
//! one replaces the shim path with the interpreter path plus the logical name.
//! The total is computed up front so an overflow becomes a clear diagnostic.

use std::ffi::OsStr;

use crate::error::{Error, Result};

const QUOTE: u16 = b'"' as u16;
const BACKSLASH: u16 = b'\\' as u16;
const SPACE: u16 = b' ' as u16;
const TAB: u16 = b'\t' as u16;

/// Length of `arg` once quoted by the standard library's Windows argument
/// encoder. `always` forces quotes, as is done for the program name.
pub fn quoted_len(arg: &[u16], always: bool) -> usize {
    let quote = always || arg.is_empty() || arg.iter().any(|&c| c == SPACE || c == TAB);
    let mut len = arg.len();
    let mut backslashes = 0;
    for &c in arg {
        match c {
            BACKSLASH => backslashes += 1,
            QUOTE => {
                len += backslashes + 1;
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    if quote {
        len += 2 + backslashes;
    }
    len
}

/// Units needed for `"program" logical_name tail` plus the terminating NUL.
pub fn command_line_len(program: &[u16], logical_name: &[u16], tail: &[u16]) -> usize {
    let mut len = quoted_len(program, true) + 1 + quoted_len(logical_name, false);
    if !tail.is_empty() {
        len += 1 + tail.len();
    }
    len + 1
}

/// Fails when the interpreter command line would not fit in `max` units.
pub fn check_budget(
    program: &OsStr,
    logical_name: &OsStr,
    tail: &[u16],
    max: usize,
) -> Result<usize> {
    let len = command_line_len(&wide(program), &wide(logical_name), tail);
    tracing::debug!(len, max, "interpreter command line length");
    if len > max {
        return Err(Error::CommandLineTooLong { len, max });
    }
    Ok(len)
}

#[cfg(windows)]
fn wide(s: &OsStr) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;
    s.encode_wide().collect()
}

#[cfg(not(windows))]
fn wide(s: &OsStr) -> Vec<u16> {
    s.to_string_lossy().encode_utf16().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn plain_argument_is_unquoted() {
        assert_eq!(quoted_len(&w(r"C:\x\print_args"), false), 15);
    }

    #[test]
    fn program_is_always_quoted() {
        assert_eq!(quoted_len(&w(r"C:\bin\dotslash.exe"), true), 21);
    }

    #[test]
    fn spaces_force_quotes() {
        assert_eq!(quoted_len(&w(r"C:\x\print args"), false), 17);
    }

    #[test]
    fn empty_argument_is_quoted() {
        assert_eq!(quoted_len(&[], false), 2);
    }

    #[test]
    fn trailing_backslashes_double_inside_quotes() {
        // "C:\a b\\" -> `"C:\a b\\\\"`
        assert_eq!(quoted_len(&w(r"C:\a b\\"), false), 8 + 2 + 2);
    }

    #[test]
    fn embedded_quote_is_escaped() {
        // a\"b -> a\\\"b
        assert_eq!(quoted_len(&w(r#"a\"b"#), false), 4 + 2);
    }

    #[test]
    fn surrogate_pairs_count_as_two_units() {
        assert_eq!(quoted_len(&w("🍎"), false), 2);
    }

    #[test]
    fn total_length() {
        let len = command_line_len(&w(r"C:\bin\dotslash.exe"), &w(r"C:\x\foo"), &w("a b c"));
        // `"C:\bin\dotslash.exe" C:\x\foo a b c` + NUL
        assert_eq!(len, 21 + 1 + 8 + 1 + 5 + 1);
    }

    #[test]
    fn total_length_without_tail() {
        let len = command_line_len(&w("d"), &w("f"), &[]);
        assert_eq!(len, 3 + 1 + 1 + 1);
    }

    #[test]
    fn near_limit_fits() {
        let tail = vec![b'x' as u16; 32768 - 512];
        let len = check_budget(
            OsStr::new(r"C:\Users\someone\bin\dotslash.exe"),
            OsStr::new(r"C:\Users\someone\project\print_args"),
            &tail,
            32767,
        )
        .unwrap();
        assert!(len <= 32767);
    }

    #[test]
    fn over_limit_is_rejected() {
        let tail = vec![b'x' as u16; 32767];
        let err =
            check_budget(OsStr::new("dotslash"), OsStr::new("foo"), &tail, 32767).unwrap_err();
        assert!(matches!(err, Error::CommandLineTooLong { max: 32767, .. }));
        assert_eq!(err.to_string(), "command line too long.");
    }
}
