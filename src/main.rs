//! StreamHub CLI
//!
//! ```bash
//! streamhub login neo -p Matrix123
//! streamhub browse --type series --sort rating
//! streamhub favorites list --json
//! ```

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use streamhub::cli::Cli;
use streamhub::commands;

/// Initialize tracing to stderr; RUST_LOG wins over -v flags
fn init_tracing(verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,streamhub=info".to_string(),
            2 => "info,streamhub=debug".to_string(),
            _ => "debug,streamhub=trace".to_string(),
        },
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    commands::run(cli).await.into()
}
