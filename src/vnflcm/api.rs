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

//! Foundation bits exposing the VNF lifecycle management API.

use reqwest::Method;
use serde_json::{json, Value};

use super::protocol::*;
use crate::common::pagination;
use crate::session::{Request, Session};
use crate::utils::Query;
use crate::{Error, ErrorKind, Result};

fn request<I>(method: Method, version: LcmVersion, segments: I) -> Request
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut path = vec![API_NAME.to_string(), version.as_str().to_string()];
    path.extend(segments.into_iter().map(|s| s.as_ref().to_string()));
    let request = Request::new(method, path);
    match version.header() {
        Some(value) => request.header("Version", value),
        None => request,
    }
}

async fn instance_action(
    session: &Session,
    version: LcmVersion,
    id: &str,
    action: &str,
    body: Value,
) -> Result<()> {
    debug!("Requesting {} of VNF instance {} with {:?}", action, id, body);
    let _ = session
        .send(&request(Method::POST, version, &[INSTANCES, id, action]).json(body))
        .await?;
    debug!("Request {} for VNF instance {} has been accepted", action, id);
    Ok(())
}

async fn op_occ_action(
    session: &Session,
    version: LcmVersion,
    id: &str,
    action: &str,
    body: Option<Value>,
) -> Result<Value> {
    debug!("Requesting {} of VNF LCM operation {}", action, id);
    let mut req = request(Method::POST, version, &[OP_OCCS, id, action]);
    if let Some(body) = body {
        req = req.json(body);
    }
    let result = session.fetch_json(&req).await?;
    debug!("Request {} for VNF LCM operation {} has been accepted", action, id);
    Ok(result)
}

/// Create a VNF instance identifier.
pub async fn create_vnf_instance(
    session: &Session,
    version: LcmVersion,
    body: Value,
) -> Result<Value> {
    debug!("Creating a new VNF instance with {:?}", body);
    let result = session
        .fetch_json(&request(Method::POST, version, &[INSTANCES]).json(body))
        .await?;
    debug!("Created VNF instance {:?}", result);
    Ok(result)
}

/// List VNF instances.
pub async fn list_vnf_instances(
    session: &Session,
    version: LcmVersion,
    query: &Query,
) -> Result<Vec<Value>> {
    trace!("Listing VNF instances with {:?}", query);
    let result = pagination::list_all_linked(
        session,
        request(Method::GET, version, &[INSTANCES]).query(query),
    )
    .await?;
    trace!("Received {} VNF instances", result.len());
    Ok(result)
}

/// Get a VNF instance.
pub async fn show_vnf_instance(session: &Session, version: LcmVersion, id: &str) -> Result<Value> {
    trace!("Fetching VNF instance {}", id);
    let result = session
        .fetch_json(&request(Method::GET, version, &[INSTANCES, id]))
        .await?;
    trace!("Received {:?}", result);
    Ok(result)
}

/// Update information of a VNF instance.
pub async fn update_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    debug!("Updating VNF instance {} with {:?}", id, body);
    let _ = session
        .send(&request(Method::PATCH, version, &[INSTANCES, id]).merge_patch(body))
        .await?;
    debug!("Update request for VNF instance {} has been accepted", id);
    Ok(())
}

/// Delete a VNF instance identifier.
pub async fn delete_vnf_instance(session: &Session, version: LcmVersion, id: &str) -> Result<()> {
    debug!("Deleting VNF instance {}", id);
    let _ = session
        .send(&request(Method::DELETE, version, &[INSTANCES, id]))
        .await?;
    debug!("Successfully deleted VNF instance {}", id);
    Ok(())
}

/// Instantiate a VNF.
pub async fn instantiate_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    instance_action(session, version, id, "instantiate", body).await
}

/// Terminate a VNF.
pub async fn terminate_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    instance_action(session, version, id, "terminate", body).await
}

/// Heal a VNF.
pub async fn heal_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    instance_action(session, version, id, "heal", body).await
}

/// Scale a VNF.
pub async fn scale_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    instance_action(session, version, id, "scale", body).await
}

/// Change external connectivity of a VNF.
pub async fn change_ext_conn_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    instance_action(session, version, id, "change_ext_conn", body).await
}

/// Change the current VNF package of a VNF.
///
/// Only available in version 2 of the API.
pub async fn change_vnfpkg_vnf_instance(
    session: &Session,
    version: LcmVersion,
    id: &str,
    body: Value,
) -> Result<()> {
    if version != LcmVersion::V2 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "Changing the VNF package requires version 2 of the VNF LCM API",
        ));
    }
    instance_action(session, version, id, "change_vnfpkg", body).await
}

/// List VNF LCM operation occurrences.
pub async fn list_vnf_lcm_op_occs(
    session: &Session,
    version: LcmVersion,
    query: &Query,
) -> Result<Vec<Value>> {
    trace!("Listing VNF LCM operations with {:?}", query);
    let result = pagination::list_all_linked(
        session,
        request(Method::GET, version, &[OP_OCCS]).query(query),
    )
    .await?;
    trace!("Received {} VNF LCM operations", result.len());
    Ok(result)
}

/// Get a VNF LCM operation occurrence.
pub async fn show_vnf_lcm_op_occ(session: &Session, version: LcmVersion, id: &str) -> Result<Value> {
    trace!("Fetching VNF LCM operation {}", id);
    let result = session
        .fetch_json(&request(Method::GET, version, &[OP_OCCS, id]))
        .await?;
    trace!("Received {:?}", result);
    Ok(result)
}

/// Roll back a failed VNF LCM operation.
pub async fn rollback_vnf_lcm_op_occ(
    session: &Session,
    version: LcmVersion,
    id: &str,
) -> Result<()> {
    let _ = op_occ_action(session, version, id, "rollback", None).await?;
    Ok(())
}

/// Retry a failed VNF LCM operation.
pub async fn retry_vnf_lcm_op_occ(session: &Session, version: LcmVersion, id: &str) -> Result<()> {
    let _ = op_occ_action(session, version, id, "retry", None).await?;
    Ok(())
}

/// Mark a failed VNF LCM operation as finally failed.
///
/// Returns the updated operation occurrence.
pub async fn fail_vnf_lcm_op_occ(session: &Session, version: LcmVersion, id: &str) -> Result<Value> {
    op_occ_action(session, version, id, "fail", None).await
}

/// Cancel an ongoing VNF LCM operation.
pub async fn cancel_vnf_lcm_op_occ(
    session: &Session,
    version: LcmVersion,
    id: &str,
    mode: CancelMode,
) -> Result<()> {
    let body = json!({ "cancelMode": mode });
    let _ = op_occ_action(session, version, id, "cancel", Some(body)).await?;
    Ok(())
}

/// Create a lifecycle change notification subscription.
pub async fn create_lccn_subscription(
    session: &Session,
    version: LcmVersion,
    body: Value,
) -> Result<Value> {
    debug!("Creating a new LCCN subscription with {:?}", body);
    let result = session
        .fetch_json(&request(Method::POST, version, &[SUBSCRIPTIONS]).json(body))
        .await?;
    debug!("Created LCCN subscription {:?}", result);
    Ok(result)
}

/// List lifecycle change notification subscriptions.
pub async fn list_lccn_subscriptions(
    session: &Session,
    version: LcmVersion,
    query: &Query,
) -> Result<Vec<Value>> {
    trace!("Listing LCCN subscriptions with {:?}", query);
    pagination::list_all_linked(
        session,
        request(Method::GET, version, &[SUBSCRIPTIONS]).query(query),
    )
    .await
}

/// Get a lifecycle change notification subscription.
pub async fn show_lccn_subscription(
    session: &Session,
    version: LcmVersion,
    id: &str,
) -> Result<Value> {
    trace!("Fetching LCCN subscription {}", id);
    session
        .fetch_json(&request(Method::GET, version, &[SUBSCRIPTIONS, id]))
        .await
}

/// Delete a lifecycle change notification subscription.
pub async fn delete_lccn_subscription(
    session: &Session,
    version: LcmVersion,
    id: &str,
) -> Result<()> {
    debug!("Deleting LCCN subscription {}", id);
    let _ = session
        .send(&request(Method::DELETE, version, &[SUBSCRIPTIONS, id]))
        .await?;
    debug!("Successfully deleted LCCN subscription {}", id);
    Ok(())
}

/// Get API versions supported by the server.
///
/// Without a version, all major versions are reported.
pub async fn show_api_versions(session: &Session, version: Option<LcmVersion>) -> Result<Value> {
    let req = match version {
        Some(version) => request(Method::GET, version, &["api_versions"]),
        None => Request::get(&[API_NAME, "api_versions"]),
    };
    session.fetch_json(&req).await
}
