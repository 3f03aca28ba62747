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

use std::sync::Once;

use futures::StreamExt;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use tackerclient::auth::NoAuth;
use tackerclient::common::{bulk_delete, find_resource_id, pages};
use tackerclient::legacy::{self, ScaleType, API_ROOT};
use tackerclient::{ErrorKind, Query, Session};

static INIT: Once = Once::new();

async fn set_up() -> (ServerGuard, Session) {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let server = Server::new_async().await;
    let session = Session::new(NoAuth::new(server.url()).unwrap());
    (server, session)
}

fn not_found(message: &str) -> String {
    json!({"TackerError": {"type": "NotFound", "message": message, "detail": ""}}).to_string()
}

#[tokio::test]
async fn test_list_vnfs_follows_links() {
    let (mut server, session) = set_up().await;
    let url = server.url();
    let long_reason = "x".repeat(150);

    let page1 = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::Regex("^limit=2$".into()))
        .with_status(200)
        .with_body(
            json!({
                "vnfs": [{"id": "a"}, {"id": "b"}],
                "vnfs_links": [
                    {"rel": "next", "href": format!("{}/v1.0/vnfs?limit=2&marker=b", url)}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::Regex("marker=b".into()))
        .with_status(200)
        .with_body(
            json!({
                "vnfs": [{"id": "c"}, {"id": "d"}],
                "vnfs_links": [
                    {"rel": "previous", "href": format!("{}/v1.0/vnfs?limit=2&marker=c&page_reverse=True", url)},
                    {"rel": "next", "href": format!("{}/v1.0/vnfs?limit=2&marker=d", url)}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let page3 = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::Regex("marker=d".into()))
        .with_status(200)
        .with_body(
            json!({
                "vnfs": [{"id": "e", "error_reason": long_reason}],
                "vnfs_links": [
                    {"rel": "previous", "href": format!("{}/v1.0/vnfs?limit=2&marker=e&page_reverse=True", url)}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let vnfs = legacy::list_vnfs(&session, &Query::new().with("limit", 2))
        .await
        .unwrap();
    let ids: Vec<_> = vnfs.iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(
        vnfs[4]["error_reason"].as_str().unwrap(),
        format!("{}...", "x".repeat(100))
    );

    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
}

#[tokio::test]
async fn test_list_without_links() {
    let (mut server, session) = set_up().await;
    let _mock = server
        .mock("GET", "/v1.0/vnfds")
        .with_status(200)
        .with_body(
            json!({"vnfds": [{"id": "1", "description": "a description longer than the limit"}]})
                .to_string(),
        )
        .create_async()
        .await;

    let vnfds = legacy::list_vnfds(&session, &Query::new()).await.unwrap();
    assert_eq!(vnfds.len(), 1);
    assert_eq!(vnfds[0]["description"], "a description longer than...");
}

#[tokio::test]
async fn test_malformed_links() {
    let (mut server, session) = set_up().await;
    let _mock = server
        .mock("GET", "/v1.0/vims")
        .with_status(200)
        .with_body(json!({"vims": [], "vims_links": "oops"}).to_string())
        .create_async()
        .await;

    let err = legacy::list_vims(&session, &Query::new()).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_page_with_malformed_links_is_delivered() {
    let (mut server, session) = set_up().await;
    let _mock = server
        .mock("GET", "/v1.0/vims")
        .with_status(200)
        .with_body(json!({"vims": [{"id": "v1"}], "vims_links": {"rel": "next"}}).to_string())
        .create_async()
        .await;

    let path = vec!["v1.0".to_string(), "vims".to_string()];
    let results: Vec<_> = pages(&session, "vims", path, Query::new()).collect().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap()["vims"], json!([{"id": "v1"}]));
    assert_eq!(
        results[1].as_ref().err().unwrap().kind(),
        ErrorKind::InvalidResponse
    );
}

#[tokio::test]
async fn test_create_vnfd() {
    let (mut server, session) = set_up().await;
    let mock = server
        .mock("POST", "/v1.0/vnfds")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "vnfd": {
                "name": "vnfd1",
                "attributes": {"vnfd": {"tosca_definitions_version": "1.0"}},
                "service_types": [{"service_type": "vnfd"}]
            }
        })))
        .with_status(201)
        .with_body(json!({"vnfd": {"id": "uuid1", "name": "vnfd1"}}).to_string())
        .create_async()
        .await;

    let vnfd = legacy::create_vnfd(
        &session,
        json!({"name": "vnfd1", "attributes": {"vnfd": {"tosca_definitions_version": "1.0"}}}),
    )
    .await
    .unwrap();
    assert_eq!(vnfd, json!({"id": "uuid1", "name": "vnfd1"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_vnf_force() {
    let (mut server, session) = set_up().await;
    let forced = server
        .mock("DELETE", "/v1.0/vnfs/v1")
        .match_body(Matcher::Json(
            json!({"vnf": {"attributes": {"force": true}}}),
        ))
        .with_status(204)
        .create_async()
        .await;
    let plain = server
        .mock("DELETE", "/v1.0/vnfs/v2")
        .match_body(Matcher::Exact(String::new()))
        .with_status(204)
        .create_async()
        .await;

    legacy::delete_vnf(&session, "v1", true).await.unwrap();
    legacy::delete_vnf(&session, "v2", false).await.unwrap();
    forced.assert_async().await;
    plain.assert_async().await;
}

#[tokio::test]
async fn test_scale_vnf() {
    let (mut server, session) = set_up().await;
    let mock = server
        .mock("POST", "/v1.0/vnfs/v1/actions")
        .match_body(Matcher::Json(
            json!({"scale": {"type": "out", "policy": "SP1"}}),
        ))
        .with_status(202)
        .with_body("")
        .create_async()
        .await;

    legacy::scale_vnf(&session, "v1", ScaleType::Out, "SP1")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_resource_id() {
    let (mut server, session) = set_up().await;
    let _by_id = server
        .mock("GET", "/v1.0/vnfds/uuid2")
        .match_query(Matcher::UrlEncoded("fields".into(), "id".into()))
        .with_status(200)
        .with_body(json!({"vnfd": {"id": "uuid2"}}).to_string())
        .create_async()
        .await;
    let _missing = server
        .mock("GET", Matcher::Regex("^/v1.0/vnfs/[a-z]+".into()))
        .match_query(Matcher::UrlEncoded("fields".into(), "id".into()))
        .with_status(404)
        .with_body(not_found("VNF could not be found"))
        .create_async()
        .await;
    let _by_name = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "myvnf".into()),
            Matcher::UrlEncoded("fields".into(), "id".into()),
        ]))
        .with_status(200)
        .with_body(json!({"vnfs": [{"id": "uuid1"}]}).to_string())
        .create_async()
        .await;
    let _dup = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::UrlEncoded("name".into(), "dup".into()))
        .with_status(200)
        .with_body(json!({"vnfs": [{"id": "u1"}, {"id": "u2"}]}).to_string())
        .create_async()
        .await;
    let _none = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::UrlEncoded("name".into(), "ghost".into()))
        .with_status(200)
        .with_body(json!({"vnfs": []}).to_string())
        .create_async()
        .await;

    let id = find_resource_id(&session, &[API_ROOT], "vnfd", "uuid2")
        .await
        .unwrap();
    assert_eq!(id, "uuid2");

    let id = find_resource_id(&session, &[API_ROOT], "vnf", "myvnf")
        .await
        .unwrap();
    assert_eq!(id, "uuid1");

    let err = find_resource_id(&session, &[API_ROOT], "vnf", "dup")
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err.to_string(),
        "Multiple vnf matches found for name 'dup', use an ID to be more specific."
    );

    let err = find_resource_id(&session, &[API_ROOT], "vnf", "ghost")
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Unable to find vnf with name 'ghost'");
}

#[tokio::test]
async fn test_find_resource_id_after_rejected_id() {
    let (mut server, session) = set_up().await;
    let by_id = server
        .mock("GET", "/v1.0/vnfs/my-vnf")
        .match_query(Matcher::UrlEncoded("fields".into(), "id".into()))
        .with_status(400)
        .with_body(
            json!({"TackerError": {
                "type": "InvalidInput",
                "message": "Invalid input for id",
                "detail": ""
            }})
            .to_string(),
        )
        .create_async()
        .await;
    let by_name = server
        .mock("GET", "/v1.0/vnfs")
        .match_query(Matcher::UrlEncoded("name".into(), "my-vnf".into()))
        .with_status(200)
        .with_body(json!({"vnfs": [{"id": "uuid1"}]}).to_string())
        .create_async()
        .await;

    let id = find_resource_id(&session, &[API_ROOT], "vnf", "my-vnf")
        .await
        .unwrap();
    assert_eq!(id, "uuid1");
    by_id.assert_async().await;
    by_name.assert_async().await;
}

#[tokio::test]
async fn test_find_resource_id_connection_failure() {
    let session = Session::new(NoAuth::new("http://127.0.0.1:1/").unwrap());
    let err = find_resource_id(&session, &[API_ROOT], "vnf", "my-vnf")
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ConnectionFailed);
}

#[tokio::test]
async fn test_bulk_delete_continues() {
    let (mut server, session) = set_up().await;
    let first = server
        .mock("DELETE", "/v1.0/vims/a")
        .with_status(204)
        .create_async()
        .await;
    let _second = server
        .mock("DELETE", "/v1.0/vims/b")
        .with_status(404)
        .with_body(not_found("VIM b could not be found"))
        .create_async()
        .await;
    let third = server
        .mock("DELETE", "/v1.0/vims/c")
        .with_status(204)
        .create_async()
        .await;

    let session = &session;
    let err = bulk_delete("vim", ["a", "b", "c"], |id| async move {
        legacy::delete_vim(session, &id).await
    })
    .await
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::CommandError);
    assert_eq!(
        err.to_string(),
        "Failed to delete 1 of 3 vim(s).\nCannot delete b: VIM b could not be found"
    );
    first.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn test_vnf_resources() {
    let (mut server, session) = set_up().await;
    let _mock = server
        .mock("GET", "/v1.0/vnfs/v1/resources")
        .with_status(200)
        .with_body(
            json!({"resources": [{"name": "VDU1", "id": "s1", "type": "OS::Nova::Server"}]})
                .to_string(),
        )
        .create_async()
        .await;

    let resources = legacy::list_vnf_resources(&session, "v1").await.unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["name"], "VDU1");
}
