// Copyright 2026 Tacker Client Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error as StdError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use mockito::{Matcher, ServerGuard};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::json;

use tackerclient::auth::{AuthType, EndpointFilters, NoAuth};
use tackerclient::identity::{IdOrName, Password};
use tackerclient::{ErrorKind, Request, Result, Session};

static INIT: Once = Once::new();

fn set_up() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Fixed endpoint that counts every HTTP attempt.
#[derive(Debug, Clone)]
struct CountingAuth {
    endpoint: Url,
    attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl AuthType for CountingAuth {
    async fn authenticate(
        &self,
        _client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        let _ = self.attempts.fetch_add(1, Ordering::SeqCst);
        Ok(request)
    }

    async fn get_endpoint(
        &self,
        _client: &Client,
        _service_type: &str,
        _filters: &EndpointFilters,
    ) -> Result<Url> {
        Ok(self.endpoint.clone())
    }

    async fn refresh(&self, _client: &Client) -> Result<()> {
        Ok(())
    }
}

/// Session pointing at a port nobody listens on.
fn unreachable_session(retries: u32) -> (Session, Arc<AtomicUsize>) {
    let attempts = Arc::new(AtomicUsize::new(0));
    let auth = CountingAuth {
        endpoint: Url::parse("http://127.0.0.1:1/").unwrap(),
        attempts: attempts.clone(),
    };
    let session = Session::new(auth)
        .with_retries(retries)
        .with_retry_interval(Duration::from_millis(0));
    (session, attempts)
}

#[tokio::test]
async fn test_get_is_retried() {
    set_up();
    let (session, attempts) = unreachable_session(2);
    let err = session
        .fetch_json(&Request::get(&["v1.0", "vnfs"]))
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ConnectionFailed);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(err
        .to_string()
        .starts_with("Failed to connect to Tacker server after 3 attempts: "));
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_post_is_not_retried() {
    set_up();
    let (session, attempts) = unreachable_session(2);
    let err = session
        .fetch_json(&Request::post(&["v1.0", "vnfs"]).json(json!({"vnf": {}})))
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ConnectionFailed);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_without_cause() {
    set_up();
    let (session, attempts) = unreachable_session(0);
    let session = session.with_raise_errors(false);
    let err = session.delete(&["v1.0", "vnfs", "x"]).await.err().unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(
        err.to_string(),
        "Failed to connect to Tacker server after 1 attempt"
    );
    assert!(err.source().is_none());
}

#[tokio::test]
async fn test_fault_with_registered_type() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1.0/vnfs/abc")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"TackerError": {
                "type": "NetworkNotFound",
                "message": "Network abc could not be found",
                "detail": ""
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let session = Session::new(NoAuth::new(server.url()).unwrap());
    let err = session
        .get_json(&["v1.0", "vnfs", "abc"], &Default::default())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::NetworkNotFound);
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "Network abc could not be found");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fault_by_status() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let _conflict = server
        .mock("DELETE", "/v1.0/vims/v1")
        .with_status(409)
        .with_body(
            json!({"TackerError": {
                "type": "VimInUseException",
                "message": "VIM v1 is still in use",
                "detail": "by VNF x"
            }})
            .to_string(),
        )
        .create_async()
        .await;
    let _opaque = server
        .mock("GET", "/v1.0/vims")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let session = Session::new(NoAuth::new(server.url()).unwrap());
    let err = session.delete(&["v1.0", "vims", "v1"]).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "VIM v1 is still in use\nby VNF x");

    let err = session
        .get_json(&["v1.0", "vims"], &Default::default())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ClientException);
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.to_string(), "502-Bad Gateway");
}

#[tokio::test]
async fn test_token_is_sent() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1.0/extensions")
        .match_header("x-auth-token", "secret")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"extensions": []}"#)
        .create_async()
        .await;

    let auth = NoAuth::new(server.url()).unwrap().with_token("secret");
    let session = Session::new(auth);
    let body = session
        .get_json(&["v1.0", "extensions"], &Default::default())
        .await
        .unwrap();
    assert_eq!(body, json!({"extensions": []}));
    mock.assert_async().await;
}

async fn keystone_mock(server: &mut ServerGuard, hits: usize) -> mockito::Mock {
    let catalog = json!({
        "token": {
            "expires_at": "2099-01-01T00:00:00.000000Z",
            "catalog": [{
                "type": "nfv-orchestration",
                "endpoints": [
                    {"interface": "public", "region": "RegionOne", "url": server.url()}
                ]
            }]
        }
    });
    server
        .mock("POST", "/identity/v3/auth/tokens")
        .match_body(Matcher::PartialJson(json!({
            "auth": {
                "identity": {"methods": ["password"]},
                "scope": {"project": {"name": "nfv"}}
            }
        })))
        .with_status(201)
        .with_header("x-subject-token", "gAAAA-token")
        .with_body(catalog.to_string())
        .expect(hits)
        .create_async()
        .await
}

fn password_session(server: &ServerGuard) -> Session {
    let auth = Password::new(
        format!("{}/identity", server.url()),
        IdOrName::Name("nfv_user".into()),
        "devstack",
        IdOrName::Name("Default".into()),
    )
    .unwrap()
    .with_project_scope(IdOrName::Name("nfv".into()), IdOrName::Name("Default".into()));
    Session::new(auth)
}

#[tokio::test]
async fn test_password_uses_catalog() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let keystone = keystone_mock(&mut server, 1).await;
    let vnfs = server
        .mock("GET", "/v1.0/vnfs")
        .match_header("x-auth-token", "gAAAA-token")
        .with_status(200)
        .with_body(r#"{"vnfs": []}"#)
        .expect(2)
        .create_async()
        .await;

    let session = password_session(&server);
    for _ in 0..2 {
        let body = session
            .get_json(&["v1.0", "vnfs"], &Default::default())
            .await
            .unwrap();
        assert_eq!(body, json!({"vnfs": []}));
    }
    // The token is cached between calls.
    keystone.assert_async().await;
    vnfs.assert_async().await;
}

#[tokio::test]
async fn test_reauthenticate_once_on_401() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let keystone = keystone_mock(&mut server, 2).await;
    let vnfs = server
        .mock("GET", "/v1.0/vnfs")
        .with_status(401)
        .with_body("Authentication required")
        .expect(2)
        .create_async()
        .await;

    let session = password_session(&server);
    let err = session
        .get_json(&["v1.0", "vnfs"], &Default::default())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.to_string(), "Authentication required");
    keystone.assert_async().await;
    vnfs.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_is_renewed() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let keystone = keystone_mock(&mut server, 2).await;
    let rejected = server
        .mock("GET", "/v1.0/vims")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": {
                "code": 401,
                "title": "Unauthorized",
                "message": "The request you have made requires authentication."
            }})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/v1.0/vims")
        .match_header("x-auth-token", "gAAAA-token")
        .with_status(200)
        .with_body(r#"{"vims": [{"id": "v1"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let session = password_session(&server);
    let body = session
        .get_json(&["v1.0", "vims"], &Default::default())
        .await
        .unwrap();
    assert_eq!(body, json!({"vims": [{"id": "v1"}]}));
    keystone.assert_async().await;
    rejected.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn test_401_without_renewal() {
    set_up();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1.0/vnfs")
        .with_status(401)
        .with_body(json!({"error": {"code": 401, "title": "Unauthorized"}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let session = Session::new(NoAuth::new(server.url()).unwrap().with_token("stale"));
    let err = session
        .get_json(&["v1.0", "vnfs"], &Default::default())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.status_code(), Some(401));
    mock.assert_async().await;
}
