// SPDX-FileCopyrightText: 2026 Imago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Imago - a WebSocket session relay for txt2img generation requests.
//!
//! This is the binary entry point for the Imago relay.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;
mod shutdown;

/// Imago - a WebSocket session relay for txt2img generation requests.
#[derive(Parser, Debug)]
#[command(name = "imago", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Imago relay server.
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match imago_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            imago_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("imago serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            match toml::to_string_pretty(&config) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => {
                    eprintln!("imago config: failed to render config: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("imago: use --help for available commands");
        }
    }
}
