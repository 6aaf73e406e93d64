//! Command-line interface definition.
//!
//! Every option can also come from the environment (or a `.env` file).

use std::net::IpAddr;

use clap::Parser;

use mailwise_core::{TracingConfig, TracingError, TracingOutputFormat};

/// mailwise - Gmail's five most recent messages over HTTP
#[derive(Debug, Parser)]
#[command(name = "mailwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OAuth 2.0 client ID
    #[arg(long, env = "GOOGLE_CLIENT_ID", hide_env_values = true)]
    pub client_id: String,

    /// OAuth 2.0 client secret
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Redirect URI registered for the OAuth client
    #[arg(long, env = "REDIRECT_URI")]
    pub redirect_uri: String,

    /// Port to listen on
    #[arg(long, short, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "MAILWISE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Timeout for calls to Google, in seconds
    #[arg(long, env = "MAILWISE_UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Log output format: pretty, compact or json
    #[arg(long, env = "MAILWISE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,
}

impl Cli {
    /// Builds the tracing configuration selected by `--debug` and `--log-format`.
    pub fn tracing_config(&self) -> Result<TracingConfig, TracingError> {
        let format: TracingOutputFormat = self.log_format.parse()?;
        let base = if self.debug {
            TracingConfig::debug()
        } else {
            TracingConfig::default()
        };
        Ok(base.with_format(format))
    }
}
