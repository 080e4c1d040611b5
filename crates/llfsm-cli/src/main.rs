//! # llfsmgen Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// LLFSM toolchain — generate, inspect, and validate machine bundles.
#[derive(Parser, Debug)]
#[command(name = "llfsmgen", version, about)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Emit source artifacts for a machine or arrangement bundle.
    Generate(llfsm_cli::generate::GenerateArgs),
    /// Print the model recovered from a bundle.
    Inspect(llfsm_cli::inspect::InspectArgs),
    /// Report structural diagnostics for a bundle.
    Validate(llfsm_cli::validate::ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => llfsm_cli::generate::run_generate(&args),
        Commands::Inspect(args) => llfsm_cli::inspect::run_inspect(&args),
        Commands::Validate(args) => llfsm_cli::validate::run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
