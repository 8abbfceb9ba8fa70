//! Spawning the interpreter and relaying its exit status.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::args::InvocationArgs;
use crate::error::{Error, Result};
use crate::identity::InvocationIdentity;

/// What happened to one shim invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The interpreter ran; its exit code is ours.
    Relayed(i32),
    /// The interpreter is not reachable through the search path.
    InterpreterNotFound,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Relayed(code) => code,
            Self::InterpreterNotFound => 1,
        }
    }
}

/// `program logical_name args...`, with stdio, environment and working
/// directory inherited from the shim.
#[derive(Debug)]
pub struct InterpreterInvocation<'a> {
    program: PathBuf,
    logical_name: &'a Path,
    args: &'a InvocationArgs,
}

impl<'a> InterpreterInvocation<'a> {
    pub fn new(program: PathBuf, identity: &'a InvocationIdentity, args: &'a InvocationArgs) -> Self {
        Self {
            program,
            logical_name: identity.logical_name(),
            args,
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(self.logical_name)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        self.append_args(&mut cmd);
        cmd
    }

    #[cfg(windows)]
    fn append_args(&self, cmd: &mut Command) {
        use std::os::windows::ffi::OsStringExt;
        use std::os::windows::process::CommandExt;

        match self.args.raw_tail() {
            Some(tail) if !tail.is_empty() => {
                cmd.raw_arg(std::ffi::OsString::from_wide(tail));
            }
            Some(_) => {}
            None => {
                cmd.args(self.args.iter());
            }
        }
    }

    #[cfg(not(windows))]
    fn append_args(&self, cmd: &mut Command) {
        cmd.args(self.args.iter());
    }

    /// Runs the interpreter to completion.
    ///
    /// A spawn that fails with "not found" is reported as
    /// [`Outcome::InterpreterNotFound`], since the binary may vanish between
    /// lookup and spawn.
    pub fn invoke(&self, interpreter: &str) -> Result<Outcome> {
        tracing::debug!(
            program = %self.program.display(),
            logical_name = %self.logical_name.display(),
            args = self.args.len(),
            "spawning interpreter"
        );

        let mut child = match self.command().spawn() {
            Ok(child) => child,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%err, "interpreter disappeared before spawn");
                return Ok(Outcome::InterpreterNotFound);
            }
            Err(source) => {
                return Err(Error::Spawn {
                    interpreter: interpreter.to_string(),
                    source,
                });
            }
        };

        let status = child.wait().map_err(|source| Error::Wait {
            interpreter: interpreter.to_string(),
            source,
        })?;
        let code = exit_code(status);
        tracing::debug!(code, "interpreter exited");
        Ok(Outcome::Relayed(code))
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
