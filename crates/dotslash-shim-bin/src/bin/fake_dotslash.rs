//! Stand-in for the `dotslash` interpreter, used by `tests/shim.rs`.
//!
//! It refuses anything that is not a DotSlash file, then acts out the fixture
//! the file is named after:
//!
//! - `exit_code`: exits with its first argument,
//! - `stdin_to_stdout` / `stdin_to_stderr`: copies stdin through,
//! - `print_argv`: prints the argument vector as one debug-formatted line,
//! - anything else behaves like `print_args`: `0:<file>` on stdout, then
//!   `<i>:<arg>` on stderr for each argument.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

const HEADER: &str = "#!/usr/bin/env dotslash";

fn main() {
    let mut args = env::args_os().skip(1);
    let Some(file) = args.next().map(PathBuf::from) else {
        eprintln!("dotslash error: no DotSlash file given");
        process::exit(2);
    };
    let args: Vec<OsString> = args.collect();

    let code = run(&file, &args).unwrap_or_else(|err| {
        eprintln!("dotslash error: {err}");
        1
    });
    process::exit(code)
}

fn run(file: &Path, args: &[OsString]) -> io::Result<i32> {
    if !is_dotslash_file(file) {
        io::stderr().write_all(
            format!(
                "dotslash error: problem with `{}`\ncaused by: failed to read DotSlash file\n",
                file.display()
            )
            .as_bytes(),
        )?;
        return Ok(1);
    }

    match file.file_name().and_then(|name| name.to_str()) {
        Some("exit_code") => Ok(args
            .first()
            .and_then(|arg| arg.to_str())
            .and_then(|arg| arg.parse().ok())
            .unwrap_or(0)),
        Some("stdin_to_stdout") => copy_stdin(io::stdout().lock()),
        Some("stdin_to_stderr") => copy_stdin(io::stderr().lock()),
        Some("print_argv") => {
            let argv: Vec<String> = args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect();
            writeln!(io::stdout(), "{argv:?}")?;
            Ok(0)
        }
        _ => {
            writeln!(io::stdout(), "0:{}", file.display())?;
            let mut stderr = io::stderr().lock();
            for (i, arg) in args.iter().enumerate() {
                writeln!(stderr, "{}:{}", i + 1, arg.to_string_lossy())?;
            }
            Ok(0)
        }
    }
}

fn is_dotslash_file(file: &Path) -> bool {
    fs::read(file)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .is_some_and(|text| text.lines().next() == Some(HEADER))
}

fn copy_stdin(mut out: impl Write) -> io::Result<i32> {
    io::copy(&mut io::stdin().lock(), &mut out)?;
    out.flush()?;
    Ok(0)
}
