// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ga - Gentle Alert CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{alert, daemon};

use crate::client::DaemonClient;
use crate::error::GaError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "ga",
    version,
    about = "Gentle Alert - Full-screen reminders that grow in gently"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List alerts with their next trigger
    List,
    /// Add an alert
    Add(alert::AddArgs),
    /// Change an alert
    Edit(alert::EditArgs),
    /// Enable an alert and schedule it
    Enable {
        /// Index from `ga list`
        index: usize,
    },
    /// Disable an alert and cancel its timer
    Disable {
        /// Index from `ga list`
        index: usize,
    },
    /// Remove an alert; later alerts move down one index
    Remove {
        /// Index from `ga list`
        index: usize,
    },
    /// Dismiss everything on screen and show it again later
    Delay {
        /// Minutes to wait
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Show an alert now, or the default settings when no index is given
    Test {
        /// Index from `ga list`
        index: Option<usize>,
    },
    /// Dismiss everything on screen
    Stop,
    /// Show daemon status
    Status,
    /// Stop the daemon
    Shutdown,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging();

    if let Err(e) = run(cli).await {
        eprint!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), GaError> {
    let format = cli.output;

    // These must not start the daemon
    match cli.command {
        Commands::Status => return daemon::status(format).await,
        Commands::Shutdown => return daemon::shutdown(format).await,
        _ => {}
    }

    let client = DaemonClient::connect_or_start().await?;

    match cli.command {
        Commands::List => alert::list(&client, format).await,
        Commands::Add(args) => alert::add(&client, args, format).await,
        Commands::Edit(args) => alert::edit(&client, args, format).await,
        Commands::Enable { index } => alert::toggle(&client, index, true, format).await,
        Commands::Disable { index } => alert::toggle(&client, index, false, format).await,
        Commands::Remove { index } => alert::remove(&client, index, format).await,
        Commands::Delay { minutes } => alert::delay(&client, minutes, format).await,
        Commands::Test { index } => alert::test(&client, index, format).await,
        Commands::Stop => alert::stop(&client, format).await,
        Commands::Status | Commands::Shutdown => Ok(()),
    }
}

/// Client-side diagnostics go to stderr; quiet unless RUST_LOG asks
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
