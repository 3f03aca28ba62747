// Copyright 2018 Dmitry Tantsur <divius.inside@gmail.com>
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

//! Foundation bits exposing the legacy NFV orchestration API.

use serde_json::{json, Value};

use super::protocol::*;
use crate::common::{pagination, protocol};
use crate::session::{Request, Session};
use crate::utils::{self, Query};
use crate::Result;

fn path(collection: &str, id: Option<&str>) -> Vec<String> {
    let mut result = vec![API_ROOT.to_string(), collection.to_string()];
    if let Some(id) = id {
        result.push(id.to_string());
    }
    result
}

async fn create(session: &Session, resource: &str, attrs: Value) -> Result<Value> {
    let collection = session.plurals().collection(resource);
    debug!("Creating a new {} with {:?}", resource, attrs);
    let body = session
        .post_json(path(&collection, None), protocol::wrap(resource, attrs))
        .await?;
    let result = protocol::unwrap(resource, body)?;
    debug!("Created {} {:?}", resource, result);
    Ok(result)
}

async fn list(session: &Session, resource: &str, query: &Query) -> Result<Vec<Value>> {
    let collection = session.plurals().collection(resource);
    trace!("Listing {} with {:?}", collection, query);
    let result =
        pagination::list_all(session, &collection, path(&collection, None), query.clone()).await?;
    trace!("Received {} {}", result.len(), collection);
    Ok(result)
}

async fn show(session: &Session, resource: &str, id: &str, query: &Query) -> Result<Value> {
    let collection = session.plurals().collection(resource);
    trace!("Fetching {} {}", resource, id);
    let body = session.get_json(path(&collection, Some(id)), query).await?;
    let result = protocol::unwrap(resource, body)?;
    trace!("Received {:?}", result);
    Ok(result)
}

async fn update(session: &Session, resource: &str, id: &str, attrs: Value) -> Result<Value> {
    let collection = session.plurals().collection(resource);
    debug!("Updating {} {} with {:?}", resource, id, attrs);
    let body = session
        .put_json(path(&collection, Some(id)), protocol::wrap(resource, attrs))
        .await?;
    let result = protocol::unwrap(resource, body)?;
    debug!("Updated {} {:?}", resource, result);
    Ok(result)
}

async fn delete(session: &Session, resource: &str, id: &str, force: bool) -> Result<()> {
    let collection = session.plurals().collection(resource);
    debug!("Deleting {} {}", resource, id);
    let mut request = Request::delete(path(&collection, Some(id)));
    if force {
        request = request.json(protocol::wrap(resource, json!({"attributes": {"force": true}})));
    }
    let _ = session.send(&request).await?;
    debug!("Successfully requested deletion of {} {}", resource, id);
    Ok(())
}

/// List API extensions.
pub async fn list_extensions(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "extension", query).await
}

/// Get an API extension by its alias.
pub async fn show_extension(session: &Session, alias: &str) -> Result<Value> {
    show(session, "extension", alias, &Query::new()).await
}

/// Create a VNFD.
///
/// The VNFD is always registered with the `vnfd` service type.
pub async fn create_vnfd(session: &Session, mut attrs: Value) -> Result<Value> {
    if let Some(obj) = attrs.as_object_mut() {
        let _ = obj.insert(
            "service_types".into(),
            json!([{"service_type": "vnfd"}]),
        );
    }
    create(session, "vnfd", attrs).await
}

/// List VNFDs.
///
/// Descriptions longer than 25 characters are cut.
pub async fn list_vnfds(session: &Session, query: &Query) -> Result<Vec<Value>> {
    let mut vnfds = list(session, "vnfd", query).await?;
    for vnfd in vnfds.iter_mut() {
        utils::truncate_field(vnfd, "description", DEFAULT_DESC_LENGTH);
    }
    Ok(vnfds)
}

/// Get a VNFD.
pub async fn show_vnfd(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "vnfd", id, query).await
}

/// Delete a VNFD.
pub async fn delete_vnfd(session: &Session, id: &str) -> Result<()> {
    delete(session, "vnfd", id, false).await
}

/// Create a VNF.
pub async fn create_vnf(session: &Session, attrs: Value) -> Result<Value> {
    create(session, "vnf", attrs).await
}

/// List VNFs.
///
/// Error reasons longer than 100 characters are cut.
pub async fn list_vnfs(session: &Session, query: &Query) -> Result<Vec<Value>> {
    let mut vnfs = list(session, "vnf", query).await?;
    for vnf in vnfs.iter_mut() {
        utils::truncate_field(vnf, "error_reason", DEFAULT_ERROR_REASON_LENGTH);
    }
    Ok(vnfs)
}

/// Get a VNF.
pub async fn show_vnf(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "vnf", id, query).await
}

/// Update a VNF.
pub async fn update_vnf(session: &Session, id: &str, attrs: Value) -> Result<Value> {
    update(session, "vnf", id, attrs).await
}

/// Delete a VNF, optionally forcing the deletion.
pub async fn delete_vnf(session: &Session, id: &str, force: bool) -> Result<()> {
    delete(session, "vnf", id, force).await
}

/// Scale a VNF according to one of its scaling policies.
pub async fn scale_vnf(
    session: &Session,
    id: &str,
    scale_type: ScaleType,
    policy: &str,
) -> Result<()> {
    debug!("Scaling VNF {} {} with policy {}", id, scale_type, policy);
    let collection = session.plurals().collection("vnf");
    let mut p = path(&collection, Some(id));
    p.push("actions".into());
    let body = json!({"scale": {"type": scale_type, "policy": policy}});
    let _ = session.post_json(p, body).await?;
    debug!("Successfully requested scaling of VNF {}", id);
    Ok(())
}

/// List resources of a VNF.
pub async fn list_vnf_resources(session: &Session, id: &str) -> Result<Vec<Value>> {
    trace!("Listing resources of VNF {}", id);
    let collection = session.plurals().collection("vnf");
    let mut p = path(&collection, Some(id));
    p.push("resources".into());
    let body = session.get_json(p, &Query::new()).await?;
    let result = protocol::unwrap_list("resources", body)?;
    trace!("Received {:?}", result);
    Ok(result)
}

/// Register a VIM.
pub async fn create_vim(session: &Session, attrs: Value) -> Result<Value> {
    create(session, "vim", attrs).await
}

/// List VIMs.
pub async fn list_vims(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "vim", query).await
}

/// Get a VIM.
pub async fn show_vim(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "vim", id, query).await
}

/// Update a VIM.
pub async fn update_vim(session: &Session, id: &str, attrs: Value) -> Result<Value> {
    update(session, "vim", id, attrs).await
}

/// Deregister a VIM.
pub async fn delete_vim(session: &Session, id: &str) -> Result<()> {
    delete(session, "vim", id, false).await
}

/// List events.
pub async fn list_events(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "event", query).await
}

/// Get an event.
pub async fn show_event(session: &Session, id: &str) -> Result<Value> {
    show(session, "event", id, &Query::new()).await
}

/// Create a VNFFGD.
pub async fn create_vnffgd(session: &Session, attrs: Value) -> Result<Value> {
    create(session, "vnffgd", attrs).await
}

/// List VNFFGDs.
pub async fn list_vnffgds(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "vnffgd", query).await
}

/// Get a VNFFGD.
pub async fn show_vnffgd(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "vnffgd", id, query).await
}

/// Delete a VNFFGD.
pub async fn delete_vnffgd(session: &Session, id: &str) -> Result<()> {
    delete(session, "vnffgd", id, false).await
}

/// Create a VNFFG.
pub async fn create_vnffg(session: &Session, attrs: Value) -> Result<Value> {
    create(session, "vnffg", attrs).await
}

/// List VNFFGs.
pub async fn list_vnffgs(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "vnffg", query).await
}

/// Get a VNFFG.
pub async fn show_vnffg(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "vnffg", id, query).await
}

/// Update a VNFFG.
pub async fn update_vnffg(session: &Session, id: &str, attrs: Value) -> Result<Value> {
    update(session, "vnffg", id, attrs).await
}

/// Delete a VNFFG.
pub async fn delete_vnffg(session: &Session, id: &str) -> Result<()> {
    delete(session, "vnffg", id, false).await
}

/// List network forwarding paths.
pub async fn list_nfps(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "nfp", query).await
}

/// Get a network forwarding path.
pub async fn show_nfp(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "nfp", id, query).await
}

/// List service function chains.
pub async fn list_sfcs(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "sfc", query).await
}

/// Get a service function chain.
pub async fn show_sfc(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "sfc", id, query).await
}

/// List flow classifiers.
pub async fn list_classifiers(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "classifier", query).await
}

/// Get a flow classifier.
pub async fn show_classifier(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "classifier", id, query).await
}

/// Create an NSD.
pub async fn create_nsd(session: &Session, attrs: Value) -> Result<Value> {
    create(session, "nsd", attrs).await
}

/// List NSDs.
///
/// Descriptions longer than 25 characters are cut.
pub async fn list_nsds(session: &Session, query: &Query) -> Result<Vec<Value>> {
    let mut nsds = list(session, "nsd", query).await?;
    for nsd in nsds.iter_mut() {
        utils::truncate_field(nsd, "description", DEFAULT_DESC_LENGTH);
    }
    Ok(nsds)
}

/// Get an NSD.
pub async fn show_nsd(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "nsd", id, query).await
}

/// Delete an NSD.
pub async fn delete_nsd(session: &Session, id: &str) -> Result<()> {
    delete(session, "nsd", id, false).await
}

/// Create a network service.
pub async fn create_ns(session: &Session, attrs: Value) -> Result<Value> {
    create(session, "ns", attrs).await
}

/// List network services.
pub async fn list_nss(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, "ns", query).await
}

/// Get a network service.
pub async fn show_ns(session: &Session, id: &str, query: &Query) -> Result<Value> {
    show(session, "ns", id, query).await
}

/// Delete a network service, optionally forcing the deletion.
pub async fn delete_ns(session: &Session, id: &str, force: bool) -> Result<()> {
    delete(session, "ns", id, force).await
}
