//! Firefight CLI - renders and inspects procedural game sounds
//!
//! This binary renders gunshots, loops and ambience to WAV files, renders
//! JSON batch files, lists the sound catalogue and analyzes WAV files.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use firefight_cli::commands;
use firefight_cli::commands::render::RenderArgs;

mod cli_args;

use cli_args::{Cli, Commands};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            kind,
            grade,
            seed,
            duration,
            bpm,
            sample_rate,
            output,
            json,
        } => commands::render::run(
            &RenderArgs {
                kind,
                grade,
                seed,
                duration,
                bpm,
                sample_rate,
                output,
            },
            json,
        ),
        Commands::Batch {
            file,
            out_root,
            json,
        } => commands::batch::run(&file, out_root.as_deref(), json),
        Commands::List { json } => commands::list::run(json),
        Commands::Analyze { input, json } => commands::analyze::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            commands::exit_code_for(&e)
        }
    }
}
