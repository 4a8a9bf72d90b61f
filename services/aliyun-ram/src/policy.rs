//! Policy documents attached to roles and policies.

use ramsign_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Version of the policy grammar.
pub const POLICY_LANGUAGE_VERSION: &str = "1";

/// PolicyDocument is the JSON document of a policy or a role trust policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

/// Statement of a [`PolicyDocument`].
///
/// `Action` and `Resource` accept a single string or a list on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Statement {
    pub effect: String,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub action: Vec<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
    #[serde(deserialize_with = "principal", skip_serializing_if = "BTreeMap::is_empty")]
    pub principal: BTreeMap<String, Vec<String>>,
}

impl PolicyDocument {
    /// Build a document allowing `actions` on `resources`.
    pub fn allow(actions: &[&str], resources: &[&str]) -> Self {
        Self {
            version: POLICY_LANGUAGE_VERSION.to_string(),
            statement: vec![Statement {
                effect: "Allow".to_string(),
                action: actions.iter().map(|v| v.to_string()).collect(),
                resource: resources.iter().map(|v| v.to_string()).collect(),
                principal: BTreeMap::new(),
            }],
        }
    }

    /// Build a trust policy letting `service` (e.g. `fc.aliyuncs.com`) assume the role.
    pub fn trust_service(service: &str) -> Self {
        Self {
            version: POLICY_LANGUAGE_VERSION.to_string(),
            statement: vec![Statement {
                effect: "Allow".to_string(),
                action: vec!["sts:AssumeRole".to_string()],
                resource: Vec::new(),
                principal: BTreeMap::from([("Service".to_string(), vec![service.to_string()])]),
            }],
        }
    }

    /// Parse a policy document from JSON.
    pub fn parse(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| {
            Error::decode("policy document is not valid JSON").with_source(e)
        })
    }

    /// Serialize into the JSON string expected by the service.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::request_invalid("failed to serialize policy document").with_source(e))
    }

    /// Check if any statement grants on exactly `resource`.
    pub fn has_resource(&self, resource: &str) -> bool {
        self.statement
            .iter()
            .any(|s| s.resource.iter().any(|r| r == resource))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(v: OneOrMany) -> Self {
        match v {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

fn one_or_many<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(OneOrMany::deserialize(d)?.into())
}

fn principal<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error> {
    let m = BTreeMap::<String, OneOrMany>::deserialize(d)?;
    Ok(m.into_iter().map(|(k, v)| (k, v.into())).collect())
}
