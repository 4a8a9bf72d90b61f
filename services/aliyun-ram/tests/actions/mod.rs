use crate::mock::{client, ScriptedHttpSend};
use pretty_assertions::assert_eq;
use ramsign_aliyun_ram::{PolicyDocument, PolicyType};
use ramsign_core::ErrorKind;

const NOT_EXIST: &str = r#"{"RequestId":"r-404","HostId":"ram.aliyuncs.com","Code":"EntityNotExist.Role","Message":"The role not exists: demo."}"#;

#[tokio::test]
async fn test_get_role() {
    let body = r#"{
    "RequestId": "04F0F334-1335-436C-A1D7-6C044FE73368",
    "Role": {
        "RoleId": "901234567890****",
        "RoleName": "demo",
        "Arn": "acs:ram::123456789012****:role/demo",
        "Description": "demo role",
        "CreateDate": "2015-01-23T12:33:18Z"
    }
}"#;
    let http = ScriptedHttpSend::new().respond(200, body);
    let client = client(&http, 0);

    let resp = client.get_role("demo").await.unwrap();
    assert_eq!(resp.role.role_name, "demo");
    assert_eq!(resp.role.arn, "acs:ram::123456789012****:role/demo");
    assert_eq!(resp.role.assume_role_policy_document, "");

    let params = http.requests()[0].params();
    assert_eq!(params["Action"], "GetRole");
    assert_eq!(params["RoleName"], "demo");
}

#[tokio::test]
async fn test_role_exists() {
    let http = ScriptedHttpSend::new()
        .respond(404, NOT_EXIST)
        .respond(200, r#"{"RequestId":"r","Role":{"RoleName":"demo"}}"#);
    let client = client(&http, 0);

    assert!(!client.role_exists("demo").await.unwrap());
    assert!(client.role_exists("demo").await.unwrap());
    assert_eq!(http.hits(), 2);
}

#[tokio::test]
async fn test_role_exists_propagates_other_errors() {
    let http = ScriptedHttpSend::new().respond(
        403,
        r#"{"Code":"NoPermission","Message":"You are not authorized."}"#,
    );
    let client = client(&http, 0);

    let err = client.role_exists("demo").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.code(), Some("NoPermission"));
}

#[tokio::test]
async fn test_create_role_if_not_exists() {
    let http = ScriptedHttpSend::new()
        .respond(404, NOT_EXIST)
        .respond(200, r#"{"RequestId":"r","Role":{"RoleName":"demo","Arn":"acs:ram::1:role/demo"}}"#);
    let client = client(&http, 0);

    let trust = PolicyDocument::trust_service("fc.aliyuncs.com");
    let arn = match client.get_role("demo").await {
        Ok(resp) => resp.role.arn,
        Err(err) if err.service_error().is_some_and(|e| e.is_entity_not_exist()) => {
            client
                .create_role("demo", &trust.to_json().unwrap(), "created by test")
                .await
                .unwrap()
                .role
                .arn
        }
        Err(err) => panic!("unexpected error: {err}"),
    };
    assert_eq!(arn, "acs:ram::1:role/demo");

    let params = http.requests()[1].params();
    assert_eq!(params["Action"], "CreateRole");
    assert_eq!(params["Description"], "created by test");
    assert_eq!(
        PolicyDocument::parse(&params["AssumeRolePolicyDocument"]).unwrap(),
        trust
    );
}

#[tokio::test]
async fn test_create_policy_version_sets_default() {
    let http = ScriptedHttpSend::new().respond_n(
        2,
        200,
        r#"{"RequestId":"r","PolicyVersion":{"VersionId":"v2","IsDefaultVersion":true}}"#,
    );
    let client = client(&http, 0);

    let doc = PolicyDocument::allow(&["oss:GetObject"], &["acs:oss:*:*:bucket/*"])
        .to_json()
        .unwrap();
    let resp = client
        .create_policy_version("reader", &doc, true)
        .await
        .unwrap();
    assert_eq!(resp.policy_version.version_id, "v2");
    client
        .create_policy_version("reader", &doc, false)
        .await
        .unwrap();

    let requests = http.requests();
    assert_eq!(requests[0].params()["SetAsDefault"], "true");
    assert_eq!(requests[1].params()["SetAsDefault"], "false");
    assert_eq!(requests[0].params()["PolicyDocument"], doc);
}

#[tokio::test]
async fn test_attach_and_detach_policy() {
    let http = ScriptedHttpSend::new().respond_n(2, 200, r#"{"RequestId":"r"}"#);
    let client = client(&http, 0);

    client
        .attach_policy_to_role(PolicyType::Custom, "reader", "demo")
        .await
        .unwrap();
    client
        .detach_policy_from_role(PolicyType::System, "AliyunOSSReadOnlyAccess", "demo")
        .await
        .unwrap();

    let requests = http.requests();
    let attach = requests[0].params();
    assert_eq!(attach["Action"], "AttachPolicyToRole");
    assert_eq!(attach["PolicyType"], "Custom");
    assert_eq!(attach["PolicyName"], "reader");
    assert_eq!(attach["RoleName"], "demo");

    let detach = requests[1].params();
    assert_eq!(detach["Action"], "DetachPolicyFromRole");
    assert_eq!(detach["PolicyType"], "System");
}

#[tokio::test]
async fn test_list_policies_with_marker() {
    let http = ScriptedHttpSend::new()
        .respond(
            200,
            r#"{"RequestId":"r1","IsTruncated":true,"Marker":"next","Policies":{"Policy":[{"PolicyName":"a","AttachmentCount":1}]}}"#,
        )
        .respond(
            200,
            r#"{"RequestId":"r2","IsTruncated":false,"Policies":{"Policy":[{"PolicyName":"b"}]}}"#,
        );
    let client = client(&http, 0);

    let mut names = Vec::new();
    let mut marker: Option<String> = None;
    loop {
        let page = client.list_policies(marker.as_deref()).await.unwrap();
        names.extend(page.policies.policy.into_iter().map(|p| p.policy_name));
        if !page.is_truncated {
            break;
        }
        marker = Some(page.marker);
    }
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);

    let requests = http.requests();
    assert!(!requests[0].params().contains_key("Marker"));
    assert_eq!(requests[1].params()["Marker"], "next");
}

#[tokio::test]
async fn test_default_policy_version() {
    let http = ScriptedHttpSend::new()
        .respond(
            200,
            r#"{"RequestId":"r1","PolicyVersions":{"PolicyVersion":[{"VersionId":"v1","IsDefaultVersion":false},{"VersionId":"v3","IsDefaultVersion":true}]}}"#,
        )
        .respond(
            200,
            r#"{"RequestId":"r2","PolicyVersion":{"VersionId":"v3","IsDefaultVersion":true,"PolicyDocument":"{\"Version\":\"1\",\"Statement\":[{\"Effect\":\"Allow\",\"Action\":\"oss:*\",\"Resource\":[\"acs:oss:*:*:bucket/*\"]}]}"}}"#,
        );
    let client = client(&http, 0);

    let version = client
        .default_policy_version("reader", PolicyType::Custom)
        .await
        .unwrap()
        .expect("default version must exist");
    assert_eq!(version.version_id, "v3");
    assert!(version.document().unwrap().has_resource("acs:oss:*:*:bucket/*"));

    let requests = http.requests();
    assert_eq!(requests[0].params()["Action"], "ListPolicyVersions");
    let get = requests[1].params();
    assert_eq!(get["Action"], "GetPolicyVersion");
    assert_eq!(get["VersionId"], "v3");
    assert_eq!(get["PolicyType"], "Custom");
}

#[tokio::test]
async fn test_default_policy_version_missing() {
    let http = ScriptedHttpSend::new().respond(
        200,
        r#"{"RequestId":"r1","PolicyVersions":{"PolicyVersion":[{"VersionId":"v1","IsDefaultVersion":false}]}}"#,
    );
    let client = client(&http, 0);

    let version = client
        .default_policy_version("reader", PolicyType::Custom)
        .await
        .unwrap();
    assert_eq!(version, None);
    assert_eq!(http.hits(), 1);
}

#[tokio::test]
async fn test_typed_action_decode_error() {
    let http = ScriptedHttpSend::new().respond(200, r#"{"RequestId":"r","Role":"demo"}"#);
    let client = client(&http, 3);

    let err = client.get_role("demo").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(http.hits(), 1);
}
