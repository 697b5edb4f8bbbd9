//! Integration tests for the session lifecycle against a mock device.

use acos_client::auth::partition::{activate_partition, DEFAULT_PARTITION};
use acos_client::{AcosClient, AcosConfig, Host, HttpError, Password, Protocol, Username};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_config(server: &MockServer) -> AcosConfig {
    let address = server.address();
    AcosConfig::builder()
        .host(Host::new(address.ip().to_string()).unwrap())
        .port(address.port())
        .protocol(Protocol::Http)
        .username(Username::new("admin").unwrap())
        .password(Password::new("a10"))
        .build()
        .unwrap()
}

async fn mount_login(server: &MockServer, signature: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/axapi/v3/auth"))
        .and(body_json(json!({"credentials": {"username": "admin", "password": "a10"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authresponse": {
                "signature": signature,
                "description": "the signature should be set in Authorization header for following request."
            }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123", 1).await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();

    let first = client.session_mut().id().await.unwrap().map(String::from);
    let second = client.session_mut().id().await.unwrap().map(String::from);

    assert_eq!(first.as_deref(), Some("abc123"));
    assert_eq!(first, second);
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_authenticated_request_carries_signature() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123", 1).await;
    Mock::given(method("GET"))
        .and(path("/axapi/v3/version/oper"))
        .and(header("Authorization", "A10 abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": {"oper": {"sw-version": "5.2.1-P6, build 74"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();
    let headers = client.session_mut().authorization_header().await.unwrap();
    let response = client
        .http()
        .get("/axapi/v3/version/oper", None, headers)
        .await
        .unwrap();

    assert_eq!(
        response.get("version").unwrap()["oper"]["sw-version"],
        "5.2.1-P6, build 74"
    );
}

#[tokio::test]
async fn test_close_resets_partition_and_logs_off() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123", 1).await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/active-partition/shared"))
        .and(header("Authorization", "A10 abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/logoff"))
        .and(header("Authorization", "A10 abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"status": "OK"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();
    client.session_mut().id().await.unwrap();

    let response = client.close().await.unwrap().unwrap();
    assert_eq!(response.status(), Some("OK"));
    assert!(!client.session().is_authenticated());

    // A second close has nothing to do.
    assert!(client.close().await.unwrap().is_none());
}

#[tokio::test]
async fn test_close_clears_token_even_when_logoff_fails() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123", 2).await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/active-partition/shared"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/logoff"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();
    client.session_mut().id().await.unwrap();

    let error = client.close().await.unwrap_err();
    match error {
        HttpError::Decode(e) => assert_eq!(e.status, 500),
        other => panic!("Expected Decode error, got {other:?}"),
    }
    assert!(!client.session().is_authenticated());

    // The next read logs in again instead of reusing the old token.
    assert_eq!(client.session_mut().id().await.unwrap(), Some("abc123"));
}

#[tokio::test]
async fn test_reauthenticate_closes_existing_session_first() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123", 1).await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/active-partition/shared"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/logoff"))
        .and(header("Authorization", "A10 abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/auth"))
        .and(body_json(json!({"credentials": {"username": "operator", "password": "secret"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authresponse": {"signature": "def456"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();
    client.session_mut().id().await.unwrap();

    client
        .session_mut()
        .authenticate(
            &Username::new("operator").unwrap(),
            &Password::new("secret"),
        )
        .await
        .unwrap();

    assert_eq!(client.session_mut().id().await.unwrap(), Some("def456"));

    let requests = server.received_requests().await.unwrap();
    let order: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        order,
        vec![
            "/axapi/v3/auth",
            "/axapi/v3/active-partition/shared",
            "/axapi/v3/logoff",
            "/axapi/v3/auth",
        ]
    );
}

#[tokio::test]
async fn test_login_without_signature_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authresponse": {"description": "no signature today"}
        })))
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();

    assert_eq!(client.session_mut().id().await.unwrap(), None);
    assert!(client.session_mut().authorization_header().await.unwrap().is_none());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_rejected_login_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/auth"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "response": {
                "status": "fail",
                "err": {"code": 419_479_554, "msg": "Invalid username or password."}
            }
        })))
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();
    let error = client.session_mut().id().await.unwrap_err();

    match error {
        HttpError::Api(e) => {
            assert_eq!(e.path, "/axapi/v3/auth");
            assert_eq!(e.code, Some(419_479_554));
            assert_eq!(e.msg.as_deref(), Some("Invalid username or password."));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_activate_named_partition() {
    let server = MockServer::start().await;
    mount_login(&server, "abc123", 1).await;
    Mock::given(method("POST"))
        .and(path("/axapi/v3/active-partition/tenant-a"))
        .and(header("Authorization", "A10 abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = AcosClient::new(create_config(&server)).unwrap();
    let token = client.session_mut().id().await.unwrap().unwrap().to_string();

    let response = activate_partition(client.http(), &token, "tenant-a")
        .await
        .unwrap();
    assert!(response.is_no_content());
    assert_eq!(DEFAULT_PARTITION, "shared");
}
