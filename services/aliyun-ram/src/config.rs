use crate::constants::*;
use crate::Credential;
use log::{debug, warn};
use ramsign_core::utils::Redact;
use ramsign_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Config carries all the configuration for the RAM client.
#[derive(Clone)]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_RAM_ENDPOINT`]
    /// - default to `https://ram.aliyuncs.com`
    pub endpoint: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_SECRET`]
    pub access_key_secret: Option<String>,
    /// `max_retries` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_RAM_MAX_RETRIES`]
    /// - default to `5`
    pub max_retries: Option<usize>,
    /// Upper bound of a single backoff wait, default to 120s.
    pub max_backoff: Duration,
    /// Randomize backoff waits, default to `false`.
    pub jitter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key_id: None,
            access_key_secret: None,
            max_retries: None,
            max_backoff: DEFAULT_MAX_BACKOFF,
            jitter: false,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field(
                "access_key_id",
                &self.access_key_id.as_ref().map(Redact::from),
            )
            .field(
                "access_key_secret",
                &self.access_key_secret.as_deref().map(Redact::full),
            )
            .field("max_retries", &self.max_retries)
            .field("max_backoff", &self.max_backoff)
            .field("jitter", &self.jitter)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_RAM_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_SECRET) {
            self.access_key_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_RAM_MAX_RETRIES) {
            match v.trim().parse::<usize>() {
                Ok(n) => {
                    self.max_retries.get_or_insert(n);
                }
                Err(_) => warn!("ignore invalid {ALIBABA_CLOUD_RAM_MAX_RETRIES}: {v:?}"),
            }
        }

        debug!("config loaded from env: {self:?}");
        self
    }

    /// The endpoint to send requests to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Maximum retries of a single call.
    pub fn max_retries(&self) -> usize {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    /// Resolve the credential used to sign requests.
    pub fn credential(&self) -> Result<Credential> {
        match (&self.access_key_id, &self.access_key_secret) {
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty() => {
                Ok(Credential::new(ak, sk))
            }
            _ => Err(Error::config_invalid(
                "access_key_id and access_key_secret must be set",
            )),
        }
    }
}
