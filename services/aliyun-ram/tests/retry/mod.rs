use crate::mock::{client, ScriptedHttpSend, TEST_ACCESS_KEY_SECRET};
use pretty_assertions::assert_eq;
use ramsign_core::ErrorKind;
use serde_json::Value;
use std::collections::BTreeMap;

const UNAVAILABLE: &str = r#"{"RequestId":"r-503","HostId":"ram.aliyuncs.com","Code":"ServiceUnavailable","Message":"The request has failed due to a temporary failure of the server."}"#;
const INTERNAL: &str = r#"{"RequestId":"r-500","Code":"InternalError","Message":"The request processing has failed due to some unknown error."}"#;
const OK: &str = r#"{"RequestId":"r-200","Roles":{"Role":[]}}"#;

#[tokio::test]
async fn test_retry_exhaustion_on_503() {
    let http = ScriptedHttpSend::new().respond_n(5, 503, UNAVAILABLE);
    let client = client(&http, 2);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 3);
    assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    assert_eq!(err.http_status(), Some(503));
    assert_eq!(err.code(), Some("ServiceUnavailable"));
}

#[tokio::test]
async fn test_no_retry_on_403() {
    let body = r#"{"RequestId":"r-403","HostId":"ram.aliyuncs.com","Code":"NoPermission","Message":"You are not authorized to do this action."}"#;
    let http = ScriptedHttpSend::new().respond_n(3, 403, body);
    let client = client(&http, 5);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 1);
    assert_eq!(err.kind(), ErrorKind::Service);
    let service = err.service_error().expect("service error must be decoded");
    assert_eq!(service.http_status, 403);
    assert_eq!(service.request_id, "r-403");
    assert_eq!(service.host_id, "ram.aliyuncs.com");
    assert_eq!(service.code, "NoPermission");
    assert_eq!(service.message, "You are not authorized to do this action.");
}

#[tokio::test]
async fn test_500_then_success() {
    let http = ScriptedHttpSend::new()
        .respond(500, INTERNAL)
        .respond(200, OK);
    let client = client(&http, 5);

    let v: Value = client.invoke("ListRoles", BTreeMap::new()).await.unwrap();

    assert_eq!(http.hits(), 2);
    assert_eq!(v["RequestId"], "r-200");
}

#[tokio::test]
async fn test_transport_error_is_retried() {
    let http = ScriptedHttpSend::new()
        .fail("connection reset by peer")
        .respond(503, UNAVAILABLE)
        .respond(200, OK);
    let client = client(&http, 5);

    let v: Value = client.invoke("ListRoles", BTreeMap::new()).await.unwrap();

    assert_eq!(http.hits(), 3);
    assert_eq!(v["RequestId"], "r-200");
}

#[tokio::test]
async fn test_transport_error_exhaustion() {
    let http = ScriptedHttpSend::new()
        .fail("dns error")
        .fail("dns error")
        .fail("dns error");
    let client = client(&http, 1);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 2);
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.service_error().is_none());
}

#[tokio::test]
async fn test_zero_retries() {
    let http = ScriptedHttpSend::new().respond_n(2, 503, UNAVAILABLE);
    let client = client(&http, 0);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 1);
    assert_eq!(err.http_status(), Some(503));
}

#[tokio::test]
async fn test_with_max_retries_overrides_config() {
    let http = ScriptedHttpSend::new().respond_n(5, 500, INTERNAL);
    let client = client(&http, 0).with_max_retries(1);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 2);
    assert_eq!(err.code(), Some("InternalError"));
}

#[tokio::test]
async fn test_other_5xx_not_retried() {
    let http = ScriptedHttpSend::new().respond_n(2, 502, "Bad Gateway");
    let client = client(&http, 5);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 1);
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.http_status(), Some(502));
    assert_eq!(err.service_error().unwrap().message, "Bad Gateway");
}

#[tokio::test]
async fn test_decode_error_not_retried() {
    let http = ScriptedHttpSend::new().respond_n(2, 200, "<html>maintenance</html>");
    let client = client(&http, 5);

    let err = client
        .invoke::<Value>("ListRoles", BTreeMap::new())
        .await
        .unwrap_err();

    assert_eq!(http.hits(), 1);
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.service_error().is_none());
}

#[tokio::test]
async fn test_every_attempt_is_signed_afresh() {
    let http = ScriptedHttpSend::new()
        .respond(503, UNAVAILABLE)
        .respond(200, OK);
    let client = client(&http, 5);

    let params = BTreeMap::from([("RoleName".to_string(), "demo".to_string())]);
    let _: Value = client.invoke("GetRole", params).await.unwrap();

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    for req in &requests {
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.uri, "https://ram.aliyuncs.com/");
        assert_eq!(
            req.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
        assert!(!req.body.contains(TEST_ACCESS_KEY_SECRET));

        let params = req.params();
        assert_eq!(params["Action"], "GetRole");
        assert_eq!(params["RoleName"], "demo");
        assert_eq!(params["Format"], "JSON");
        assert_eq!(params["Version"], "2015-05-01");
        assert_eq!(params["SignatureMethod"], "HMAC-SHA1");
        assert_eq!(params["SignatureVersion"], "1.0");
        assert_eq!(params["AccessKeyId"], "testid");
        assert!(params.contains_key("Timestamp"));
        assert!(!params["Signature"].is_empty());
    }

    let first = requests[0].params();
    let second = requests[1].params();
    assert_ne!(first["SignatureNonce"], second["SignatureNonce"]);
    assert_ne!(first["Signature"], second["Signature"]);
}
