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

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use tackerclient::auth::NoAuth;
use tackerclient::vnflcm::{self, CancelMode, LcmVersion};
use tackerclient::vnfpkgm::{self, VnfdFormat};
use tackerclient::{vnffm, vnfpm, ErrorKind, Query, Session};

static INIT: Once = Once::new();

async fn set_up() -> (ServerGuard, Session) {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let server = Server::new_async().await;
    let session = Session::new(NoAuth::new(server.url()).unwrap());
    (server, session)
}

#[tokio::test]
async fn test_list_packages_follows_link_header() {
    let (mut server, session) = set_up().await;
    let next = format!(
        "<{}/vnfpkgm/v1/vnf_packages?nextpage_opaque_marker=abc>; rel=\"next\"",
        server.url()
    );
    let page1 = server
        .mock("GET", "/vnfpkgm/v1/vnf_packages")
        .match_query(Matcher::UrlEncoded(
            "filter".into(),
            "(eq,onboardingState,ONBOARDED)".into(),
        ))
        .with_status(200)
        .with_header("link", &next)
        .with_body(json!([{"id": "p1"}, {"id": "p2"}]).to_string())
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/vnfpkgm/v1/vnf_packages")
        .match_query(Matcher::UrlEncoded(
            "nextpage_opaque_marker".into(),
            "abc".into(),
        ))
        .with_status(200)
        .with_body(json!([{"id": "p3"}]).to_string())
        .create_async()
        .await;

    let query = Query::new().with("filter", "(eq,onboardingState,ONBOARDED)");
    let packages = vnfpkgm::list_vnf_packages(&session, &query).await.unwrap();
    let ids: Vec<_> = packages.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_list_not_an_array() {
    let (mut server, session) = set_up().await;
    let _mock = server
        .mock("GET", "/vnflcm/v1/vnf_instances")
        .with_status(200)
        .with_body(r#"{"vnf_instances": []}"#)
        .create_async()
        .await;

    let err = vnflcm::list_vnf_instances(&session, LcmVersion::V1, &Query::new())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_lcm_version_header() {
    let (mut server, session) = set_up().await;
    let v1 = server
        .mock("GET", "/vnflcm/v1/vnf_instances/i1")
        .match_header("version", Matcher::Missing)
        .with_status(200)
        .with_body(json!({"id": "i1"}).to_string())
        .create_async()
        .await;
    let v2 = server
        .mock("GET", "/vnflcm/v2/vnf_instances/i1")
        .match_header("version", "2.0.0")
        .with_status(200)
        .with_body(json!({"id": "i1", "vnfdId": "d1"}).to_string())
        .create_async()
        .await;

    let instance = vnflcm::show_vnf_instance(&session, LcmVersion::V1, "i1")
        .await
        .unwrap();
    assert_eq!(instance["id"], "i1");
    let instance = vnflcm::show_vnf_instance(&session, LcmVersion::V2, "i1")
        .await
        .unwrap();
    assert_eq!(instance["vnfdId"], "d1");
    v1.assert_async().await;
    v2.assert_async().await;
}

#[tokio::test]
async fn test_instantiate_and_cancel() {
    let (mut server, session) = set_up().await;
    let instantiate = server
        .mock("POST", "/vnflcm/v1/vnf_instances/i1/instantiate")
        .match_body(Matcher::Json(json!({"flavourId": "simple"})))
        .with_status(202)
        .create_async()
        .await;
    let cancel = server
        .mock("POST", "/vnflcm/v1/vnf_lcm_op_occs/o1/cancel")
        .match_body(Matcher::Json(json!({"cancelMode": "FORCEFUL"})))
        .with_status(202)
        .create_async()
        .await;

    vnflcm::instantiate_vnf_instance(
        &session,
        LcmVersion::V1,
        "i1",
        json!({"flavourId": "simple"}),
    )
    .await
    .unwrap();
    vnflcm::cancel_vnf_lcm_op_occ(&session, LcmVersion::V1, "o1", CancelMode::Forceful)
        .await
        .unwrap();
    instantiate.assert_async().await;
    cancel.assert_async().await;
}

#[tokio::test]
async fn test_change_vnfpkg_requires_v2() {
    let (_server, session) = set_up().await;
    let err = vnflcm::change_vnfpkg_vnf_instance(&session, LcmVersion::V1, "i1", json!({}))
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_upload_package_content() {
    let (mut server, session) = set_up().await;
    let mock = server
        .mock("PUT", "/vnfpkgm/v1/vnf_packages/p1/package_content")
        .match_header("content-type", "application/zip")
        .match_body(Matcher::Exact("PK\u{3}\u{4}".into()))
        .with_status(202)
        .create_async()
        .await;

    vnfpkgm::upload_vnf_package_content(&session, "p1", b"PK\x03\x04".to_vec())
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_download_vnfd_text() {
    let (mut server, session) = set_up().await;
    let mock = server
        .mock("GET", "/vnfpkgm/v1/vnf_packages/p1/vnfd")
        .match_header("accept", "text/plain")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("tosca_definitions_version: tosca_simple_yaml_1_2\n")
        .create_async()
        .await;

    let data = vnfpkgm::download_vnfd(&session, "p1", VnfdFormat::Text)
        .await
        .unwrap();
    assert_eq!(data, b"tosca_definitions_version: tosca_simple_yaml_1_2\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_acknowledge_alarm() {
    let (mut server, session) = set_up().await;
    let mock = server
        .mock("PATCH", "/vnffm/v1/alarms/a1")
        .match_header("version", "1.3.0")
        .match_header("content-type", "application/merge-patch+json")
        .match_body(Matcher::Json(json!({"ackState": "ACKNOWLEDGED"})))
        .with_status(200)
        .with_body(json!({"ackState": "ACKNOWLEDGED"}).to_string())
        .create_async()
        .await;

    let result = vnffm::update_alarm(&session, "a1", json!({"ackState": "ACKNOWLEDGED"}))
        .await
        .unwrap();
    assert_eq!(result, json!({"ackState": "ACKNOWLEDGED"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pm_report() {
    let (mut server, session) = set_up().await;
    let mock = server
        .mock("GET", "/vnfpm/v2/pm_jobs/j1/reports/r1")
        .match_header("version", "2.1.0")
        .with_status(200)
        .with_body(json!({"entries": []}).to_string())
        .create_async()
        .await;

    let report = vnfpm::show_report(&session, "j1", "r1").await.unwrap();
    assert_eq!(report, json!({"entries": []}));
    mock.assert_async().await;
}
