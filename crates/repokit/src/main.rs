use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repokit::{
    config::RepositoryConfig,
    demo,
    logging::{self, LogFormat},
};
use repokit_core::retry::RetryConfig;
use serde::Serialize;

/// repokit - Repositories, caching, units of work and retries
#[derive(Parser, Debug)]
#[command(name = "repokit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output format for logs and results
    #[arg(
        long,
        value_enum,
        default_value_t = LogFormat::Pretty,
        env = "REPOKIT_FORMAT",
        global = true
    )]
    format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed repositories and batch changes through units of work
    Demo {
        /// Put the user repository behind a cache
        #[arg(long)]
        cached: bool,

        /// Maximum number of cached entities
        #[arg(long)]
        max_cache_size: Option<usize>,
    },
    /// Run a flaky operation through the retry policy
    Retry {
        /// Attempt on which the operation starts succeeding
        #[arg(long, default_value_t = 3)]
        succeed_on: u32,

        /// Total number of attempts allowed
        #[arg(long, default_value_t = 3)]
        max_attempts: u32,

        /// Delay before the first retry, in milliseconds
        #[arg(long, default_value_t = 100)]
        initial_delay_ms: u64,

        /// Factor applied to the delay after every failure
        #[arg(long, default_value_t = 2.0)]
        multiplier: f64,

        /// Input passed to every attempt
        #[arg(long, default_value_t = 21)]
        value: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = RepositoryConfig::from_env();

    logging::init(&config, cli.format).context("failed to initialize logging")?;
    tracing::debug!(%config, "Configuration loaded");

    match cli.command {
        Command::Demo {
            cached,
            max_cache_size,
        } => {
            config.enable_caching |= cached;
            if let Some(size) = max_cache_size {
                config.max_cache_size = size;
            }

            let summary = demo::run_demo(&config)?;
            print(cli.format, &summary)?;
        }
        Command::Retry {
            succeed_on,
            max_attempts,
            initial_delay_ms,
            multiplier,
            value,
        } => {
            let retry = RetryConfig::new()
                .with_max_attempts(max_attempts)
                .with_initial_delay(Duration::from_millis(initial_delay_ms))
                .with_backoff_multiplier(multiplier);

            let summary = demo::run_flaky(retry, succeed_on, value).await?;
            print(cli.format, &summary)?;
        }
    }

    Ok(())
}

fn print<T: Serialize + std::fmt::Debug>(format: LogFormat, value: &T) -> Result<()> {
    match format {
        LogFormat::Pretty => println!("{value:#?}"),
        LogFormat::Json => println!("{}", serde_json::to_string(value)?),
    }
    Ok(())
}
