//! Response models of the RAM API.
//!
//! Every field is optional on the wire and decodes to its default value
//! when missing.

use crate::policy::PolicyDocument;
use ramsign_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// PolicyType of a RAM policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyType {
    /// Policy managed by the cloud provider.
    System,
    /// Policy created by the account.
    Custom,
}

impl PolicyType {
    /// The value sent as `PolicyType` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::System => "System",
            PolicyType::Custom => "Custom",
        }
    }
}

impl Display for PolicyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = ramsign_core::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "System" => Ok(PolicyType::System),
            "Custom" => Ok(PolicyType::Custom),
            v => Err(ramsign_core::Error::request_invalid(format!(
                "unknown policy type: {v:?}"
            ))),
        }
    }
}

/// Role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Role {
    pub role_id: String,
    pub role_name: String,
    pub arn: String,
    pub description: String,
    /// Trust policy of the role, as a JSON string.
    pub assume_role_policy_document: String,
    pub create_date: String,
}

/// Roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Roles {
    pub role: Vec<Role>,
}

/// Policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Policy {
    pub policy_name: String,
    pub policy_type: String,
    pub description: String,
    pub default_version: String,
    pub create_date: String,
    pub update_date: String,
    pub attachment_count: i64,
}

/// Policies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Policies {
    pub policy: Vec<Policy>,
}

/// PolicyVersion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyVersion {
    pub version_id: String,
    pub is_default_version: bool,
    pub create_date: String,
    /// Policy document of this version, as a JSON string.
    pub policy_document: String,
}

impl PolicyVersion {
    /// Parse the policy document carried by this version.
    pub fn document(&self) -> Result<PolicyDocument> {
        PolicyDocument::parse(&self.policy_document)
    }
}

/// PolicyVersions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyVersions {
    pub policy_version: Vec<PolicyVersion>,
}

/// Response of `GetPolicyVersion` and `CreatePolicyVersion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyVersionResponse {
    pub request_id: String,
    pub policy_version: PolicyVersion,
}

/// Response of `ListPolicyVersions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListPolicyVersionsResponse {
    pub request_id: String,
    pub policy_versions: PolicyVersions,
}

/// Response of `CreateRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateRoleResponse {
    pub request_id: String,
    pub role: Role,
}

/// Response of `GetRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetRoleResponse {
    pub request_id: String,
    pub role: Role,
}

/// Response of `DeleteRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteRoleResponse {
    pub request_id: String,
}

/// Response of `ListRoles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListRolesResponse {
    pub request_id: String,
    pub roles: Roles,
}

/// Response of `CreatePolicy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreatePolicyResponse {
    pub request_id: String,
    pub policy: Policy,
}

/// Response of `GetPolicy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetPolicyResponse {
    pub request_id: String,
    pub policy: Policy,
}

/// Response of `DeletePolicy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeletePolicyResponse {
    pub request_id: String,
}

/// Response of `ListPolicies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListPoliciesResponse {
    pub request_id: String,
    pub is_truncated: bool,
    pub marker: String,
    pub policies: Policies,
}

/// Response of `AttachPolicyToRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AttachPolicyToRoleResponse {
    pub request_id: String,
}

/// Response of `DetachPolicyFromRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DetachPolicyFromRoleResponse {
    pub request_id: String,
}

/// Response of `ListPoliciesForRole`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListPoliciesForRoleResponse {
    pub request_id: String,
    pub policies: Policies,
}
