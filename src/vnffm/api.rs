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

//! Foundation bits exposing the VNF fault management API.

use reqwest::Method;
use serde_json::Value;

use crate::common::pagination;
use crate::session::{Request, Session};
use crate::utils::Query;
use crate::Result;

/// Root of the API.
pub const API_ROOT: &[&str] = &["vnffm", "v1"];
/// Value of the `Version` header.
pub const API_VERSION: &str = "1.3.0";

const ALARMS: &str = "alarms";
const SUBSCRIPTIONS: &str = "subscriptions";

fn request<I>(method: Method, segments: I) -> Request
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut path: Vec<String> = API_ROOT.iter().map(|s| s.to_string()).collect();
    path.extend(segments.into_iter().map(|s| s.as_ref().to_string()));
    Request::new(method, path).header("Version", API_VERSION)
}

/// List alarms.
pub async fn list_alarms(session: &Session, query: &Query) -> Result<Vec<Value>> {
    trace!("Listing alarms with {:?}", query);
    let result =
        pagination::list_all_linked(session, request(Method::GET, &[ALARMS]).query(query)).await?;
    trace!("Received {} alarms", result.len());
    Ok(result)
}

/// Get an alarm.
pub async fn show_alarm(session: &Session, id: &str) -> Result<Value> {
    trace!("Fetching alarm {}", id);
    session.fetch_json(&request(Method::GET, &[ALARMS, id])).await
}

/// Modify an alarm, e.g. acknowledge it with `{"ackState": "ACKNOWLEDGED"}`.
///
/// Returns the modifications accepted by the server.
pub async fn update_alarm(session: &Session, id: &str, body: Value) -> Result<Value> {
    debug!("Updating alarm {} with {:?}", id, body);
    let result = session
        .fetch_json(&request(Method::PATCH, &[ALARMS, id]).merge_patch(body))
        .await?;
    debug!("Updated alarm {} with {:?}", id, result);
    Ok(result)
}

/// Create a fault management subscription.
pub async fn create_fm_subscription(session: &Session, body: Value) -> Result<Value> {
    debug!("Creating a new FM subscription with {:?}", body);
    let result = session
        .fetch_json(&request(Method::POST, &[SUBSCRIPTIONS]).json(body))
        .await?;
    debug!("Created FM subscription {:?}", result);
    Ok(result)
}

/// List fault management subscriptions.
pub async fn list_fm_subscriptions(session: &Session, query: &Query) -> Result<Vec<Value>> {
    trace!("Listing FM subscriptions with {:?}", query);
    pagination::list_all_linked(session, request(Method::GET, &[SUBSCRIPTIONS]).query(query)).await
}

/// Get a fault management subscription.
pub async fn show_fm_subscription(session: &Session, id: &str) -> Result<Value> {
    trace!("Fetching FM subscription {}", id);
    session
        .fetch_json(&request(Method::GET, &[SUBSCRIPTIONS, id]))
        .await
}

/// Delete a fault management subscription.
pub async fn delete_fm_subscription(session: &Session, id: &str) -> Result<()> {
    debug!("Deleting FM subscription {}", id);
    let _ = session
        .send(&request(Method::DELETE, &[SUBSCRIPTIONS, id]))
        .await?;
    debug!("Successfully deleted FM subscription {}", id);
    Ok(())
}
