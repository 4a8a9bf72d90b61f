use anyhow::Result;
use ramsign_aliyun_ram::{Client, Config, PolicyDocument, PolicyType};
use ramsign_core::{Context, OsEnv};
use ramsign_http_send_reqwest::ReqwestHttpSend;
use std::time::Duration;

/// Make sure a role trusted by Function Compute exists and may read a bucket.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let http = ReqwestHttpSend::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let ctx = Context::new().with_http_send(http).with_env(OsEnv);

    // Reads ALIBABA_CLOUD_ACCESS_KEY_ID, ALIBABA_CLOUD_ACCESS_KEY_SECRET and
    // optionally ALIBABA_CLOUD_RAM_ENDPOINT, ALIBABA_CLOUD_RAM_MAX_RETRIES.
    let config = Config {
        jitter: true,
        ..Default::default()
    }
    .from_env(&ctx);
    let client = Client::new(ctx, &config)?;

    let role_name = "ramsign-example-fc";
    let policy_name = "ramsign-example-oss-read";
    let resource = "acs:oss:*:*:my-bucket/*";

    if client.role_exists(role_name).await? {
        println!("role {role_name} exists");
    } else {
        let trust = PolicyDocument::trust_service("fc.aliyuncs.com");
        let resp = client
            .create_role(role_name, &trust.to_json()?, "created by ramsign example")
            .await?;
        println!("created role {}", resp.role.arn);
    }

    let policy = PolicyDocument::allow(&["oss:GetObject", "oss:ListObjects"], &[resource]);
    match client
        .default_policy_version(policy_name, PolicyType::Custom)
        .await
    {
        Ok(Some(version)) if version.document()?.has_resource(resource) => {
            println!("policy {policy_name} already grants {resource}");
        }
        Ok(_) => {
            client
                .create_policy_version(policy_name, &policy.to_json()?, true)
                .await?;
            println!("updated policy {policy_name}");
        }
        Err(err) if err.service_error().is_some_and(|e| e.is_entity_not_exist()) => {
            client
                .create_policy(policy_name, &policy.to_json()?, "created by ramsign example")
                .await?;
            println!("created policy {policy_name}");
        }
        Err(err) => return Err(err.into()),
    }

    let attached = client.list_policies_for_role(role_name).await?;
    if attached
        .policies
        .policy
        .iter()
        .any(|p| p.policy_name == policy_name)
    {
        println!("policy {policy_name} already attached");
    } else {
        client
            .attach_policy_to_role(PolicyType::Custom, policy_name, role_name)
            .await?;
        println!("attached {policy_name} to {role_name}");
    }

    Ok(())
}
