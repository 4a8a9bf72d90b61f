use crate::constants::FORM_CONTENT_TYPE;
use crate::decode::decode_response;
use crate::model::*;
use crate::retry::RetryPolicy;
use crate::sign_request::RequestSigner;
use crate::{Config, Credential};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request, Uri};
use log::debug;
use ramsign_core::canonical::canonical_query_string;
use ramsign_core::{Context, Error, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Client of the RAM API.
///
/// Every call is signed with a fresh nonce and timestamp, and retried on
/// transport errors and `500`/`503` responses with bounded exponential
/// backoff. Dropping the returned future aborts the call, including a pending
/// backoff wait.
///
/// `Client` is cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    endpoint: String,
    credential: Credential,
    signer: RequestSigner,
    retry: RetryPolicy,
}

impl Client {
    /// Create a new client from config.
    ///
    /// Only the scheme and host of the endpoint are used, requests are always
    /// sent to `/`.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        let endpoint = normalize_endpoint(config.endpoint())?;
        let credential = config.credential()?;

        Ok(Self {
            ctx,
            endpoint,
            credential,
            signer: RequestSigner::new(),
            retry: RetryPolicy {
                max_retries: config.max_retries(),
                max_backoff: config.max_backoff,
                jitter: config.jitter,
            },
        })
    }

    /// Set the maximum retries of every call made by this client.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The URL every request is sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The retry policy in use.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Invoke `action` with `params`, decoding a successful response into `T`.
    ///
    /// Protocol parameters (`Format`, `Version`, `AccessKeyId`, signature
    /// fields) are added by the client and override entries of the same
    /// name in `params`.
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        params: BTreeMap<String, String>,
    ) -> Result<T> {
        let mut attempt = 0;
        loop {
            debug!("sending {action}, attempt {attempt}");

            let err = match self.send(action, &params).await {
                Ok(v) => return Ok(v),
                Err(err) => err,
            };

            if !self.retry.should_retry(&err, attempt) {
                if err.is_retryable() {
                    debug!("{action} failed after {} attempts: {err}", attempt + 1);
                }
                return Err(err);
            }

            let delay = self.retry.delay(attempt);
            debug!(
                "{action} attempt {attempt} failed with status {:?}, retry in {delay:?}: {err}",
                err.http_status()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<T> {
        let req = self.build_request(action, params)?;
        let resp = self.ctx.http_send(req).await?;
        decode_response(resp)
    }

    fn build_request(
        &self,
        action: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Request<Bytes>> {
        let signed = self
            .signer
            .sign(&Method::POST, &self.credential, action, params);
        let body = canonical_query_string(&signed);

        let req = Request::builder()
            .method(Method::POST)
            .uri(&self.endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Bytes::from(body))?;
        Ok(req)
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let uri: Uri = endpoint.parse()?;

    match (uri.scheme_str(), uri.host()) {
        (Some(scheme), Some(host)) if !host.is_empty() => Ok(match uri.port_u16() {
            Some(port) => format!("{scheme}://{host}:{port}/"),
            None => format!("{scheme}://{host}/"),
        }),
        _ => Err(Error::config_invalid(format!(
            "endpoint must contain scheme and host: {endpoint}"
        ))),
    }
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Typed RAM actions.
impl Client {
    /// Create a role trusted by `assume_role_policy_document`.
    pub async fn create_role(
        &self,
        role_name: &str,
        assume_role_policy_document: &str,
        description: &str,
    ) -> Result<CreateRoleResponse> {
        self.invoke(
            "CreateRole",
            params(&[
                ("RoleName", role_name),
                ("AssumeRolePolicyDocument", assume_role_policy_document),
                ("Description", description),
            ]),
        )
        .await
    }

    /// Get a role by name.
    pub async fn get_role(&self, role_name: &str) -> Result<GetRoleResponse> {
        self.invoke("GetRole", params(&[("RoleName", role_name)]))
            .await
    }

    /// Delete a role by name.
    pub async fn delete_role(&self, role_name: &str) -> Result<DeleteRoleResponse> {
        self.invoke("DeleteRole", params(&[("RoleName", role_name)]))
            .await
    }

    /// List roles of the account.
    pub async fn list_roles(&self) -> Result<ListRolesResponse> {
        self.invoke("ListRoles", BTreeMap::new()).await
    }

    /// Create a custom policy.
    pub async fn create_policy(
        &self,
        policy_name: &str,
        policy_document: &str,
        description: &str,
    ) -> Result<CreatePolicyResponse> {
        self.invoke(
            "CreatePolicy",
            params(&[
                ("PolicyName", policy_name),
                ("PolicyDocument", policy_document),
                ("Description", description),
            ]),
        )
        .await
    }

    /// Get a policy by name and type.
    pub async fn get_policy(
        &self,
        policy_name: &str,
        policy_type: PolicyType,
    ) -> Result<GetPolicyResponse> {
        self.invoke(
            "GetPolicy",
            params(&[
                ("PolicyName", policy_name),
                ("PolicyType", policy_type.as_str()),
            ]),
        )
        .await
    }

    /// Delete a custom policy.
    pub async fn delete_policy(&self, policy_name: &str) -> Result<DeletePolicyResponse> {
        self.invoke("DeletePolicy", params(&[("PolicyName", policy_name)]))
            .await
    }

    /// List policies, starting from `marker` of a truncated previous page.
    pub async fn list_policies(&self, marker: Option<&str>) -> Result<ListPoliciesResponse> {
        let params = match marker {
            Some(marker) => params(&[("Marker", marker)]),
            None => BTreeMap::new(),
        };
        self.invoke("ListPolicies", params).await
    }

    /// List policies attached to a role.
    pub async fn list_policies_for_role(
        &self,
        role_name: &str,
    ) -> Result<ListPoliciesForRoleResponse> {
        self.invoke("ListPoliciesForRole", params(&[("RoleName", role_name)]))
            .await
    }

    /// List versions of a policy.
    pub async fn list_policy_versions(
        &self,
        policy_name: &str,
        policy_type: PolicyType,
    ) -> Result<ListPolicyVersionsResponse> {
        self.invoke(
            "ListPolicyVersions",
            params(&[
                ("PolicyName", policy_name),
                ("PolicyType", policy_type.as_str()),
            ]),
        )
        .await
    }

    /// Get one version of a policy.
    pub async fn get_policy_version(
        &self,
        policy_name: &str,
        policy_type: PolicyType,
        version_id: &str,
    ) -> Result<PolicyVersionResponse> {
        self.invoke(
            "GetPolicyVersion",
            params(&[
                ("PolicyName", policy_name),
                ("PolicyType", policy_type.as_str()),
                ("VersionId", version_id),
            ]),
        )
        .await
    }

    /// Create a new version of a custom policy.
    pub async fn create_policy_version(
        &self,
        policy_name: &str,
        policy_document: &str,
        set_as_default: bool,
    ) -> Result<PolicyVersionResponse> {
        self.invoke(
            "CreatePolicyVersion",
            params(&[
                ("PolicyName", policy_name),
                ("PolicyDocument", policy_document),
                ("SetAsDefault", if set_as_default { "true" } else { "false" }),
            ]),
        )
        .await
    }

    /// Attach a policy to a role.
    pub async fn attach_policy_to_role(
        &self,
        policy_type: PolicyType,
        policy_name: &str,
        role_name: &str,
    ) -> Result<AttachPolicyToRoleResponse> {
        self.invoke(
            "AttachPolicyToRole",
            params(&[
                ("PolicyType", policy_type.as_str()),
                ("PolicyName", policy_name),
                ("RoleName", role_name),
            ]),
        )
        .await
    }

    /// Detach a policy from a role.
    pub async fn detach_policy_from_role(
        &self,
        policy_type: PolicyType,
        policy_name: &str,
        role_name: &str,
    ) -> Result<DetachPolicyFromRoleResponse> {
        self.invoke(
            "DetachPolicyFromRole",
            params(&[
                ("PolicyType", policy_type.as_str()),
                ("PolicyName", policy_name),
                ("RoleName", role_name),
            ]),
        )
        .await
    }

    /// Check whether a role exists.
    ///
    /// Returns `false` on `EntityNotExist.*`, other errors are returned as is.
    pub async fn role_exists(&self, role_name: &str) -> Result<bool> {
        match self.get_role(role_name).await {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .service_error()
                    .is_some_and(|e| e.is_entity_not_exist()) =>
            {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch the default version of a policy, with its document.
    ///
    /// Returns `None` if no version is marked as default.
    pub async fn default_policy_version(
        &self,
        policy_name: &str,
        policy_type: PolicyType,
    ) -> Result<Option<PolicyVersion>> {
        let versions = self.list_policy_versions(policy_name, policy_type).await?;
        let Some(default) = versions
            .policy_versions
            .policy_version
            .into_iter()
            .find(|v| v.is_default_version)
        else {
            return Ok(None);
        };

        let resp = self
            .get_policy_version(policy_name, policy_type, &default.version_id)
            .await?;
        Ok(Some(resp.policy_version))
    }
}
