use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;
use std::time::Duration;
use tracing::Level;

pub mod cli;

pub struct Config {
    pub args: Args,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36");

        // No timeout unless asked for; reqwest then waits on the provider.
        if let Some(secs) = args.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder.build()?;

        Ok(Self { args, http_client })
    }

    pub fn log_level(&self) -> Level {
        self.args.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let args = Args::try_parse_from(["steaminsight", "--log-level", "loud"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.log_level(), Level::INFO);
    }

    #[test]
    fn parses_debug_log_level() {
        let args = Args::try_parse_from(["steaminsight", "--log-level", "debug"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.log_level(), Level::DEBUG);
    }
}
