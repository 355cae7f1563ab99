use crate::{command::Command, error::SendError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host and port identifying the remote device
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Endpoint {
    pub host: String,
    pub port: String,
}

impl Endpoint {
    const HTTP_PORT: u16 = 80;
    const HTTPS_PORT: u16 = 443;

    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    /// Both host and port are set
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.port.trim().is_empty()
    }

    /// Replace host and/or port with non-empty values, keep the rest
    pub fn merged(mut self, host: Option<&str>, port: Option<&str>) -> Self {
        if let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) {
            self.host = host.to_string();
        }
        if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
            self.port = port.to_string();
        }
        self
    }

    /// Build the url for `command` on this endpoint
    ///
    /// Port 80 maps to plain `http` and port 443 to `https`, both without an
    /// explicit port. Any other port is appended to the host over `http`.
    /// Ports are compared numerically, so "080" is port 80.
    pub fn url(&self, command: Command) -> Result<Url, SendError> {
        if !self.is_configured() {
            return Err(SendError::NotConfigured);
        }

        let host = self.host.trim();
        let port = self.port.trim().parse::<u16>().map_err(|e| {
            SendError::InvalidEndpoint(format!("failed to parse port '{}': {e}", self.port.trim()))
        })?;

        let (origin, explicit_port) = match port {
            Self::HTTP_PORT => (format!("http://{host}"), None),
            Self::HTTPS_PORT => (format!("https://{host}"), None),
            port => (format!("http://{host}:{port}"), Some(port)),
        };

        let url = Url::parse(&format!("{origin}/{}", command.path())).map_err(|e| {
            SendError::InvalidEndpoint(format!("failed to build url from host '{host}': {e}"))
        })?;

        // anything in host that moved into other url parts is not a plain host
        if url.path() != format!("/{}", command.path())
            || url.port() != explicit_port
            || !url.username().is_empty()
            || url.password().is_some()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(SendError::InvalidEndpoint(format!(
                "failed to build url: host '{host}' is not a plain host name or address"
            )));
        }

        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
