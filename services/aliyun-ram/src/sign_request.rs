use crate::constants::*;
use crate::credential::Credential;
use http::Method;
use ramsign_core::canonical::{canonical_query_string, percent_encode};
use ramsign_core::hash::base64_hmac_sha1;
use ramsign_core::time::{format_rfc3339, now, DateTime};
use std::collections::BTreeMap;
use uuid::Uuid;

/// RequestSigner for Aliyun RPC signature version 1.0.
///
/// Every call to [`RequestSigner::sign`] takes a fresh nonce and the current
/// time, so the output is never reused across attempts.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the signature nonce.
    ///
    /// # Note
    ///
    /// Only use this function for testing, a reused nonce is rejected by the service.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> String {
        self.nonce
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Build the full, signed parameter set of one request.
    ///
    /// Protocol parameters take precedence over the caller's parameters of
    /// the same name.
    pub fn sign(
        &self,
        method: &Method,
        cred: &Credential,
        action: &str,
        params: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        let mut params = params.clone();
        params.insert(PARAM_ACTION.to_string(), action.to_string());
        params.insert(PARAM_FORMAT.to_string(), FORMAT.to_string());
        params.insert(PARAM_VERSION.to_string(), API_VERSION.to_string());
        params.insert(
            PARAM_SIGNATURE_METHOD.to_string(),
            SIGNATURE_METHOD.to_string(),
        );
        params.insert(
            PARAM_SIGNATURE_VERSION.to_string(),
            SIGNATURE_VERSION.to_string(),
        );
        params.insert(
            PARAM_ACCESS_KEY_ID.to_string(),
            cred.access_key_id.clone(),
        );
        params.insert(PARAM_SIGNATURE_NONCE.to_string(), self.get_nonce());
        params.insert(
            PARAM_TIMESTAMP.to_string(),
            format_rfc3339(self.get_time()),
        );
        // A stale signature must not be signed over.
        params.remove(PARAM_SIGNATURE);

        let signature = signature(
            method,
            &canonical_query_string(&params),
            &cred.access_key_secret,
        );
        params.insert(PARAM_SIGNATURE.to_string(), signature);

        params
    }
}

/// Build the string to sign: `METHOD&%2F&encode(canonical_query)`.
pub fn string_to_sign(method: &Method, canonical_query: &str) -> String {
    let mut s = String::with_capacity(canonical_query.len() * 2);
    s.push_str(method.as_str());
    s.push('&');
    s.push_str(&percent_encode("/"));
    s.push('&');
    s.push_str(&percent_encode(canonical_query));
    s
}

/// Compute the base64 encoded HMAC-SHA1 signature, keyed by `secret&`.
pub fn signature(method: &Method, canonical_query: &str, secret: &str) -> String {
    let key = format!("{secret}&");
    base64_hmac_sha1(key.as_bytes(), string_to_sign(method, canonical_query).as_bytes())
}
