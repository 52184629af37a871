#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use isect_cli::args::{CliArgs, Command};

fn main() -> Result<()> {
    // Installs a subscriber only when ISECT_LOG or RUST_LOG is set.
    isect_cli::tracing_config::init_tracing();

    let mut args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    if let Command::Check(check) = &mut args.command
        && !std::io::stdout().is_terminal()
    {
        check.no_color = true;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match isect_cli::run(&args, &cwd, &mut out) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            isect_cli::EXIT_FAILURE
        }
    };
    drop(out);
    std::process::exit(code);
}
