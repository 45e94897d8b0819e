//! taskdeck - terminal task manager CLI
//!
//! Task CRUD with snapshot persistence, debounced search, and a timed
//! assessment mode in the terminal UI.

use clap::Parser;
use taskdeck::cli::{Cli, Commands};
use taskdeck::output::emit_error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Tracing is opt-in via RUST_LOG. Off by default: stray stderr output
    // would corrupt the alternate-screen TUI.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let command = command_name(&cli);
    let json = cli.json;
    if let Err(err) = cli.run() {
        let _ = emit_error(command, &err, json);
        std::process::exit(err.exit_code());
    }
}

fn command_name(cli: &Cli) -> &'static str {
    match cli.command {
        Some(Commands::Add { .. }) => "add",
        Some(Commands::List { .. }) => "list",
        Some(Commands::Edit { .. }) => "edit",
        Some(Commands::Done { .. }) => "done",
        Some(Commands::Delete { .. }) => "delete",
        Some(Commands::Ui) | None => "ui",
    }
}
