//! CLI entry point - the composition root.
//!
//! Parses arguments, resolves the log configuration, builds the sink and
//! dispatches to a handler. Diagnostics go to stderr through `tracing`;
//! stdout carries only command output and captured console text.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use runlog_cli::{Cli, CliError, Commands, bootstrap, handlers, resolve_config};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = resolve_config(&cli)?;

    match command {
        Commands::Path => {
            println!("{}", handlers::path(&config)?.display());
        }
        Commands::Log { messages } => {
            let sink = bootstrap(config)?;
            handlers::log(&sink, messages);
        }
        Commands::Error { message, cause } => {
            let sink = bootstrap(config)?;
            handlers::error(&sink, message, cause.as_deref());
        }
        Commands::Tee => {
            let sink = bootstrap(config)?;
            handlers::tee(&sink, std::io::stdin().lock())?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
