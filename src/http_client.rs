use crate::{config::TimeoutConfig, error::SendError};
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;

/// Body and status of a completed device request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Create the HTTP client used to talk to the device
///
/// `timeouts.connect` bounds establishing the connection, `timeouts.request`
/// bounds the whole exchange including reading the body.
///
/// # Examples
/// ```no_run
/// use socket_remote::{config::TimeoutConfig, http_client::device_client};
///
/// let client = device_client(&TimeoutConfig::default())
///     .expect("failed to create client");
/// ```
pub fn device_client(timeouts: &TimeoutConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request)
        .build()
        .context("failed to create device HTTP client")
}

/// Handle HTTP response by checking status and extracting body
///
/// The body is decoded as text in any case so it can be logged or reported.
///
/// # Returns
/// * `Ok(Response)` - if the status is successful
/// * `Err(SendError::Status)` - if the status is not successful
/// * `Err(SendError::Timeout | SendError::Transport)` - if reading the body fails
pub async fn handle_http_response(
    res: reqwest::Response,
    url: &str,
) -> Result<Response, SendError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| SendError::from_reqwest(url, e))?;

    debug!("GET {url} returned {status}: {body}");

    if !status.is_success() {
        return Err(SendError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(Response {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn device_client_accepts_default_timeouts() {
        assert!(device_client(&TimeoutConfig::default()).is_ok());
    }

    #[test]
    fn device_client_accepts_short_timeouts() {
        let timeouts = TimeoutConfig {
            connect: Duration::from_millis(50),
            request: Duration::from_millis(100),
        };
        assert!(device_client(&timeouts).is_ok());
    }
}
