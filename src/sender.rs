//! Single-flight command sending
//!
//! [`RemoteCommandSender`] owns the request state of one device remote. At
//! most one request is in flight per sender; the state returns to
//! [`RequestState::Idle`] on every completion, including errors, timeouts and
//! a dropped send future.

use crate::{
    command::Command,
    config::TimeoutConfig,
    endpoint::Endpoint,
    error::SendError,
    http_client::{Response, device_client, handle_http_response},
};
use anyhow::Result;
use log::{debug, error, info};
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use reqwest::{Client, Url};
use serde::Serialize;
use tokio::sync::watch;
use trait_variant::make;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum RequestState {
    #[default]
    Idle,
    Sending,
}

#[make(Send)]
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait CommandTransport {
    async fn get(&self, url: Url) -> Result<Response, SendError>;
}

/// Transport issuing plain GET requests with reqwest
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self> {
        Ok(Self {
            client: device_client(timeouts)?,
        })
    }
}

impl CommandTransport for HttpTransport {
    async fn get(&self, url: Url) -> Result<Response, SendError> {
        let url_str = url.to_string();
        info!("GET {url_str}");

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SendError::from_reqwest(&url_str, e))?;

        handle_http_response(res, &url_str).await
    }
}

pub struct RemoteCommandSender<T> {
    transport: T,
    state: watch::Sender<RequestState>,
}

impl RemoteCommandSender<HttpTransport> {
    /// Sender talking HTTP with the given timeouts
    pub fn http(timeouts: &TimeoutConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(timeouts)?))
    }
}

impl<T: CommandTransport> RemoteCommandSender<T> {
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { transport, state }
    }

    pub fn is_busy(&self) -> bool {
        *self.state.borrow() == RequestState::Sending
    }

    /// Observe state changes, e.g. to disable triggers while busy
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Send `command` to `endpoint`
    ///
    /// Fails with [`SendError::NotConfigured`] or [`SendError::InvalidEndpoint`]
    /// before any state change, and with [`SendError::Busy`] if another request
    /// of this sender is still in flight.
    pub async fn send(&self, command: Command, endpoint: &Endpoint) -> Result<Response, SendError> {
        let url = endpoint.url(command)?;

        let _guard = BusyGuard::acquire(&self.state).ok_or(SendError::Busy)?;
        debug!("sending {command} to {endpoint}");

        let result = self.transport.get(url).await;

        match &result {
            Ok(res) => info!("{command} succeeded with status {}", res.status),
            Err(e) => error!("{command} failed: {e}"),
        }

        result
    }
}

/// Claims the single in-flight slot, releases it on drop
struct BusyGuard<'a> {
    state: &'a watch::Sender<RequestState>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(state: &'a watch::Sender<RequestState>) -> Option<Self> {
        state
            .send_if_modified(|s| {
                if *s == RequestState::Idle {
                    *s = RequestState::Sending;
                    true
                } else {
                    false
                }
            })
            .then_some(Self { state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(RequestState::Idle);
    }
}
