use log::{debug, warn};
use ramsign_aliyun_ram::{Client, Config, PolicyType};
use ramsign_core::{Context, OsEnv, Result};
use ramsign_http_send_reqwest::ReqwestHttpSend;
use std::env;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("RAMSIGN_ALIYUN_RAM_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);

    Some(Client::new(ctx, &config).expect("client must be valid"))
}

#[tokio::test]
async fn test_live_list_roles() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("RAMSIGN_ALIYUN_RAM_TEST is not set, skipped");
        return Ok(());
    };

    let resp = client.list_roles().await?;
    debug!("got {} roles", resp.roles.role.len());
    assert!(!resp.request_id.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_live_role_not_exist() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("RAMSIGN_ALIYUN_RAM_TEST is not set, skipped");
        return Ok(());
    };

    assert!(!client.role_exists("ramsign-role-not-exist").await?);
    Ok(())
}

#[tokio::test]
async fn test_live_system_policy() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("RAMSIGN_ALIYUN_RAM_TEST is not set, skipped");
        return Ok(());
    };

    let version = client
        .default_policy_version("AliyunOSSReadOnlyAccess", PolicyType::System)
        .await?
        .expect("system policy must have a default version");
    let doc = version.document()?;
    debug!("default policy document: {doc:?}");
    assert!(!doc.statement.is_empty());
    Ok(())
}
