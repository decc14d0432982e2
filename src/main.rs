//! tmplx CLI entry point
//!
//! Captures the environment, parses arguments, sets up logging on stderr and
//! runs the render. Errors are printed with suggestions and exit with
//! status 1.

use anyhow::Result;
use clap::Parser;
use tmplx_cli::binding::EnvSnapshot;
use tmplx_cli::cli::{Cli, CliConfig};
use tmplx_cli::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let env = EnvSnapshot::capture();
    let cli = Cli::parse();
    let config = cli.build_config();

    init_logging(&config);

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute(&config, &env) {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

/// Log to stderr; stdout carries the rendered template only.
fn init_logging(config: &CliConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
