//! Command line entry point: run the service or count and split locally

mod commands;

use crate::commands::TextSource;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokensplit_api::bootstrap;
use tokensplit_splitting::{ChunkingService, TokenBudget, validate_max_length};
use tracing::debug;

/// BPE token counting and token-budgeted text splitting
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional configuration file path (TOML format)
    #[arg(long, short = 'c', global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Bind host, overrides configuration
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the token count of each TEXT as a JSON array
    Count {
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Split text into chunks of whole sentences and print them as JSON
    Split {
        /// Token budget per chunk
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_length: u32,

        /// Read the text from a file instead of the argument
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Text to split; read from stdin when neither this nor --file is given
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tokensplit_common::initialize_environment();

    let args = Args::parse();

    let mut config = bootstrap::load_config(args.config_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;
    bootstrap::init_logging(&config.telemetry);
    debug!(?args, "Parsed arguments");

    match args.command {
        Command::Serve { host, port } => {
            // Command-line arguments override config file settings
            config.api.host = host.unwrap_or(config.api.host);
            config.api.port = port.unwrap_or(config.api.port);

            bootstrap::serve(&config)
                .await
                .map_err(|e| anyhow::anyhow!("Server failed: {e}"))?;
        }
        Command::Count { texts } => {
            let counter = bootstrap::setup_token_counter(&config.encoder)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("{}", commands::count(counter.as_ref(), &texts)?);
        }
        Command::Split {
            max_length,
            file,
            text,
        } => {
            let counter = bootstrap::setup_token_counter(&config.encoder)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            let max_length =
                validate_max_length(i64::from(max_length), config.splitter.max_length_limit)?;
            let budget =
                TokenBudget::new(max_length).with_thin_ratio(config.splitter.thin_chunk_ratio);
            let service = ChunkingService::new(Arc::clone(&counter), budget);

            let text = TextSource::from_args(text, file.as_deref()).read()?;
            println!("{}", commands::split(&service, &text)?);
        }
    }

    Ok(())
}
