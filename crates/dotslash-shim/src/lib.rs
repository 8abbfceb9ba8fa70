//! Identity shim for running DotSlash files on Windows.
//!
//! # Architecture
//!
//! Windows has no shebangs. A copy of the shim executable is placed next to
//! each DotSlash file under the same name plus `.exe`. When run, the shim:
//!
//! 1. asks the OS for its own image path, without following links
//!    ([`resolve_identity`]),
//! 2. drops the extension to get the logical name,
//! 3. finds the interpreter on the search path ([`InterpreterResolver`]),
//! 4. runs `interpreter logical_name args...` with inherited stdio and
//!    returns the child's exit code ([`Outcome`]).
//!
//! Arguments are never reparsed. On Windows the command line text after the
//! program name is forwarded verbatim.
//!
//! # Example
//!
//! ```no_run
//! use dotslash_shim::{SearchPathResolver, ShimConfig, run};
//!
//! let outcome = run(&ShimConfig::default(), &SearchPathResolver)?;
//! std::process::exit(outcome.exit_code());
//! # Ok::<(), dotslash_shim::Error>(())
//! ```

pub use args::{InvocationArgs, args_tail, collect_args};
pub use cmdline::{check_budget, command_line_len, quoted_len};
pub use config::{INTERPRETER, MAX_COMMAND_LINE, PRODUCT_NAME, ShimConfig};
pub use error::{Error, Result};
pub use identity::{InvocationIdentity, logical_name, resolve_identity, strip_extension};
pub use invoke::{InterpreterInvocation, Outcome};
pub use resolver::{DirsResolver, InterpreterResolver, SearchPathResolver, locate_interpreter};

mod args;
mod cmdline;
mod config;
mod error;
mod identity;
mod invoke;
mod resolver;

/// Runs one shim invocation for the current process.
pub fn run<R: InterpreterResolver>(config: &ShimConfig, resolver: &R) -> Result<Outcome> {
    let identity = resolve_identity()?;
    let args = collect_args();
    run_with(config, resolver, &identity, &args)
}

/// Runs the shim for an explicit identity and argument list.
pub fn run_with<R: InterpreterResolver>(
    config: &ShimConfig,
    resolver: &R,
    identity: &InvocationIdentity,
    args: &InvocationArgs,
) -> Result<Outcome> {
    let Some(program) = locate_interpreter(resolver, &config.interpreter) else {
        return Ok(Outcome::InterpreterNotFound);
    };

    if let Some(tail) = args.raw_tail() {
        check_budget(
            program.as_os_str(),
            identity.logical_name().as_os_str(),
            tail,
            config.max_command_line,
        )?;
    }

    InterpreterInvocation::new(program, identity, args).invoke(&config.interpreter)
}
