mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, codec, fields, replay, ApplyArgs, CodecArgs, FieldsArgs, ReplayArgs};

/// FormThinker CLI - inspect schemas and edit form documents
#[derive(Parser, Debug)]
#[command(name = "formthinker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply one set or delete to a document
    Apply(ApplyArgs),

    /// List the leaf fields a schema renders
    Fields(FieldsArgs),

    /// Feed a timed edit script through the update scheduler
    Replay(ReplayArgs),

    /// Encode or decode per-device values
    Codec(CodecArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Apply(args) => apply(args, &cwd),
                Command::Fields(args) => fields(args, &cwd),
                Command::Replay(args) => replay(args, &cwd),
                Command::Codec(args) => codec(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
