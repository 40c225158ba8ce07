//! modrix CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod locate;
mod toolchain;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ElementsCommand, ItemCommand, NewCommand};

#[derive(Parser)]
#[command(name = "modrix")]
#[command(version)]
#[command(about = "Minecraft mod project generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new mod project from a bundled template
    New(Box<NewCommand>),
    /// Generate an item in an existing project
    Item(ItemCommand),
    /// Manage a project's element records
    Elements {
        #[command(subcommand)]
        command: ElementsCommand,
    },
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modrix=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::New(cmd) => cmd.execute()?,
        Commands::Item(cmd) => cmd.execute()?,
        Commands::Elements { command } => command.execute()?,
    }

    Ok(())
}
