mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "minikit",
    about = "Mini-app action server for action metadata and unsigned message transactions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: built-in Avalanche Fuji deployment)
    #[arg(long, global = true, env = "MINIKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3000", env = "MINIKIT_PORT")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Compute the timestamp offset for a message
    Offset {
        message: String,

        /// Unix seconds to add the offset to (default: now)
        #[arg(long)]
        now: Option<u64>,
    },

    /// Build the serialized unsigned transaction for a message
    Tx {
        message: String,

        /// Unix seconds to use as the current time (default: now)
        #[arg(long)]
        now: Option<u64>,
    },

    /// Print the validated action metadata
    Metadata {
        /// Scheme and host clients reach the server on
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,
    },

    /// Inspect the effective config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve { port, bind } => cmd::serve::run(config, &bind, port),
        Commands::Offset { message, now } => cmd::offset::run(&message, now, cli.json),
        Commands::Tx { message, now } => cmd::tx::run(config, &message, now, cli.json),
        Commands::Metadata { base_url } => cmd::metadata::run(config, &base_url),
        Commands::Config { subcommand } => cmd::config::run(config, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
