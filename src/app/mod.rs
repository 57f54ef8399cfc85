pub mod config;
pub mod logging;
pub mod params;

pub use config::{Config, ConfigError, LogFormat, LogLevel};

use crate::domain::generate_app_id;
use crate::tracker::Daiki;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "daiki",
    author,
    version,
    about = "Send tracking events to Daiki",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Report an application start
    AppStarted {
        /// Event parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
        /// Extra parameter as key=value (repeatable)
        #[arg(long = "param")]
        param: Vec<String>,
    },
    /// Send a custom event
    Event {
        name: String,
        /// Event parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
        /// Extra parameter as key=value (repeatable)
        #[arg(long = "param")]
        param: Vec<String>,
    },
    /// Print a fresh random application identifier
    GenerateAppId,
}

pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.resolve().context("loading configuration")?;
    logging::init_tracing(config.log_level, config.log_format)?;
    run(&config, cli.command).await
}

/// Executes one command and prints the ingestion response body.
pub async fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    let daiki = Daiki::with_config(config.client_config())?;
    if let Some(app_id) = &config.app_id {
        daiki.set_app_id(app_id.as_str());
    }

    let result = match command {
        Command::GenerateAppId => {
            println!("{}", generate_app_id());
            return Ok(());
        }
        Command::AppStarted { params, param } => {
            let params = params::parse_params(params.as_deref(), &param)?;
            daiki.app_started(None, params).await?
        }
        Command::Event {
            name,
            params,
            param,
        } => {
            let params = params::parse_params(params.as_deref(), &param)?;
            daiki.event(&name, params).await?
        }
    };

    info!(
        "Delivered to {} (HTTP {}, {} bytes in {:?})",
        daiki.endpoint(),
        result.status_code,
        result.bytes_sent,
        result.latency
    );
    println!("{}", result.body);
    Ok(())
}
