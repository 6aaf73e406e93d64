//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use mailwise_providers::google::{GoogleConfig, OAuthCredentials};

use crate::cli::Cli;
use crate::error::{ServerError, ServerResult};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,

    /// Upstream provider configuration.
    pub google: GoogleConfig,
}

impl ServerConfig {
    /// Creates a configuration listening on all interfaces at [`DEFAULT_PORT`].
    pub fn new(google: GoogleConfig) -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            google,
        }
    }

    /// Builds and validates the configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> ServerResult<Self> {
        let credentials = OAuthCredentials::new(&cli.client_id, &cli.client_secret);
        let google = GoogleConfig::new(credentials, &cli.redirect_uri)
            .with_timeout(Duration::from_secs(cli.upstream_timeout_secs));

        google.validate().map_err(ServerError::config)?;

        Ok(Self::new(google).with_listen_addr(SocketAddr::new(cli.host, cli.port)))
    }

    /// Builder: set the listen address.
    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    /// Returns the configured port.
    pub fn port(&self) -> u16 {
        self.listen_addr.port()
    }
}
