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

//! Foundation bits exposing the VNF performance management API.

use reqwest::Method;
use serde_json::Value;

use crate::common::pagination;
use crate::session::{Request, Session};
use crate::utils::Query;
use crate::Result;

/// Root of the API.
pub const API_ROOT: &[&str] = &["vnfpm", "v2"];
/// Value of the `Version` header.
pub const API_VERSION: &str = "2.1.0";

const PM_JOBS: &str = "pm_jobs";
const REPORTS: &str = "reports";
const THRESHOLDS: &str = "thresholds";

fn request<I>(method: Method, segments: I) -> Request
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut path: Vec<String> = API_ROOT.iter().map(|s| s.to_string()).collect();
    path.extend(segments.into_iter().map(|s| s.as_ref().to_string()));
    Request::new(method, path).header("Version", API_VERSION)
}

async fn create(session: &Session, collection: &str, body: Value) -> Result<Value> {
    debug!("Creating a new {} item with {:?}", collection, body);
    let result = session
        .fetch_json(&request(Method::POST, &[collection]).json(body))
        .await?;
    debug!("Created {} item {:?}", collection, result);
    Ok(result)
}

async fn list(session: &Session, collection: &str, query: &Query) -> Result<Vec<Value>> {
    trace!("Listing {} with {:?}", collection, query);
    let result =
        pagination::list_all_linked(session, request(Method::GET, &[collection]).query(query))
            .await?;
    trace!("Received {} {}", result.len(), collection);
    Ok(result)
}

async fn show(session: &Session, collection: &str, id: &str) -> Result<Value> {
    trace!("Fetching {} item {}", collection, id);
    let result = session
        .fetch_json(&request(Method::GET, &[collection, id]))
        .await?;
    trace!("Received {:?}", result);
    Ok(result)
}

async fn update(session: &Session, collection: &str, id: &str, body: Value) -> Result<Value> {
    debug!("Updating {} item {} with {:?}", collection, id, body);
    let result = session
        .fetch_json(&request(Method::PATCH, &[collection, id]).merge_patch(body))
        .await?;
    debug!("Updated {} item {} with {:?}", collection, id, result);
    Ok(result)
}

async fn delete(session: &Session, collection: &str, id: &str) -> Result<()> {
    debug!("Deleting {} item {}", collection, id);
    let _ = session
        .send(&request(Method::DELETE, &[collection, id]))
        .await?;
    debug!("Successfully deleted {} item {}", collection, id);
    Ok(())
}

/// Create a PM job.
pub async fn create_pm_job(session: &Session, body: Value) -> Result<Value> {
    create(session, PM_JOBS, body).await
}

/// List PM jobs.
pub async fn list_pm_jobs(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, PM_JOBS, query).await
}

/// Get a PM job.
pub async fn show_pm_job(session: &Session, id: &str) -> Result<Value> {
    show(session, PM_JOBS, id).await
}

/// Update a PM job (callback URI or authentication).
///
/// Returns the modifications accepted by the server.
pub async fn update_pm_job(session: &Session, id: &str, body: Value) -> Result<Value> {
    update(session, PM_JOBS, id, body).await
}

/// Delete a PM job.
pub async fn delete_pm_job(session: &Session, id: &str) -> Result<()> {
    delete(session, PM_JOBS, id).await
}

/// Get a performance report of a PM job.
pub async fn show_report(session: &Session, job_id: &str, report_id: &str) -> Result<Value> {
    trace!("Fetching report {} of PM job {}", report_id, job_id);
    session
        .fetch_json(&request(Method::GET, &[PM_JOBS, job_id, REPORTS, report_id]))
        .await
}

/// Create a PM threshold.
pub async fn create_threshold(session: &Session, body: Value) -> Result<Value> {
    create(session, THRESHOLDS, body).await
}

/// List PM thresholds.
pub async fn list_thresholds(session: &Session, query: &Query) -> Result<Vec<Value>> {
    list(session, THRESHOLDS, query).await
}

/// Get a PM threshold.
pub async fn show_threshold(session: &Session, id: &str) -> Result<Value> {
    show(session, THRESHOLDS, id).await
}

/// Update a PM threshold.
///
/// Returns the modifications accepted by the server.
pub async fn update_threshold(session: &Session, id: &str, body: Value) -> Result<Value> {
    update(session, THRESHOLDS, id, body).await
}

/// Delete a PM threshold.
pub async fn delete_threshold(session: &Session, id: &str) -> Result<()> {
    delete(session, THRESHOLDS, id).await
}
