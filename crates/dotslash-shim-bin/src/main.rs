use std::process;

use dotslash_shim::ShimConfig;
use dotslash_shim_bin::{report, try_run};

fn main() {
    #[cfg(feature = "trace")]
    init_tracing();

    let config = ShimConfig::default();
    let code = match try_run(&config) {
        Ok(code) => code,
        Err(err) => {
            report(&config, &err);
            1
        }
    };
    process::exit(code)
}

/// Debug builds only: logs go to stderr, which the interpreter shares.
#[cfg(feature = "trace")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .init();
}
