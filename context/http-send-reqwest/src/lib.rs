//! Default transport for ramsign, backed by [`reqwest`].
//!
//! ```no_run
//! use ramsign_core::Context;
//! use ramsign_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use ramsign_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};
use std::time::Duration;

/// Dial timeout of the default client.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
/// Whole request timeout of the default client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Idle connections kept per host by the default client.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 5;

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// The default client is tuned for low volume administrative calls: short
/// timeouts and a small idle pool. TLS certificates are always verified
/// unless [`ReqwestHttpSendBuilder::danger_accept_invalid_certs`] is set.
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        // Same behavior as `reqwest::Client::new()`: the default settings
        // can only fail to build if the TLS backend can't be initialized.
        Self::builder()
            .build()
            .expect("default reqwest client must build")
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Start building a ReqwestHttpSend with the default settings.
    pub fn builder() -> ReqwestHttpSendBuilder {
        ReqwestHttpSendBuilder::default()
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request for reqwest").with_source(e)
        })?;

        debug!("sending {} {}", req.method(), req.url());
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport(format!("failed to send request: {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::transport(format!("failed to read response body: {e}")).with_source(e)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

/// Builder for [`ReqwestHttpSend`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpSendBuilder {
    connect_timeout: Duration,
    timeout: Duration,
    pool_max_idle_per_host: usize,
    accept_invalid_certs: bool,
}

impl Default for ReqwestHttpSendBuilder {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            accept_invalid_certs: false,
        }
    }
}

impl ReqwestHttpSendBuilder {
    /// Set the dial timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the timeout of a whole request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of idle connections kept per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// # Warning
    ///
    /// Any certificate will be trusted, which exposes the signed requests
    /// to whoever sits on the network path. Only use this against endpoints
    /// you control.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the ReqwestHttpSend.
    pub fn build(self) -> Result<ReqwestHttpSend> {
        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .tcp_keepalive(Duration::from_secs(30))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| Error::config_invalid("failed to build reqwest client").with_source(e))?;

        Ok(ReqwestHttpSend::new(client))
    }
}
