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

//! Foundation bits exposing the VNF package management API.

use std::path::Path;

use reqwest::Method;
use serde_json::Value;

use super::protocol::*;
use crate::common::pagination;
use crate::common::protocol::ZIP;
use crate::session::{Request, Session};
use crate::utils::Query;
use crate::{Error, ErrorKind, Result};

fn request<I>(method: Method, segments: I) -> Request
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut path: Vec<String> = API_ROOT.iter().map(|s| s.to_string()).collect();
    path.extend(segments.into_iter().map(|s| s.as_ref().to_string()));
    Request::new(method, path)
}

/// Create a VNF package.
pub async fn create_vnf_package(session: &Session, body: Value) -> Result<Value> {
    debug!("Creating a new VNF package with {:?}", body);
    let result = session
        .fetch_json(&request(Method::POST, &[PACKAGES]).json(body))
        .await?;
    debug!("Created VNF package {:?}", result);
    Ok(result)
}

/// List VNF packages.
pub async fn list_vnf_packages(session: &Session, query: &Query) -> Result<Vec<Value>> {
    trace!("Listing VNF packages with {:?}", query);
    let result =
        pagination::list_all_linked(session, request(Method::GET, &[PACKAGES]).query(query))
            .await?;
    trace!("Received {} VNF packages", result.len());
    Ok(result)
}

/// Get a VNF package.
pub async fn show_vnf_package(session: &Session, id: &str) -> Result<Value> {
    trace!("Fetching VNF package {}", id);
    let result = session
        .fetch_json(&request(Method::GET, &[PACKAGES, id]))
        .await?;
    trace!("Received {:?}", result);
    Ok(result)
}

/// Update operational state or user defined data of a VNF package.
///
/// Returns the modifications accepted by the server.
pub async fn update_vnf_package(session: &Session, id: &str, body: Value) -> Result<Value> {
    debug!("Updating VNF package {} with {:?}", id, body);
    let result = session
        .fetch_json(&request(Method::PATCH, &[PACKAGES, id]).merge_patch(body))
        .await?;
    debug!("Updated VNF package {} with {:?}", id, result);
    Ok(result)
}

/// Delete a VNF package.
pub async fn delete_vnf_package(session: &Session, id: &str) -> Result<()> {
    debug!("Deleting VNF package {}", id);
    let _ = session
        .send(&request(Method::DELETE, &[PACKAGES, id]))
        .await?;
    debug!("Successfully deleted VNF package {}", id);
    Ok(())
}

/// Upload the content of a VNF package as a ZIP archive.
pub async fn upload_vnf_package_content(
    session: &Session,
    id: &str,
    data: Vec<u8>,
) -> Result<()> {
    debug!("Uploading {} bytes of content to VNF package {}", data.len(), id);
    let _ = session
        .send(&request(Method::PUT, &[PACKAGES, id, CONTENT]).raw(ZIP, data))
        .await?;
    debug!("Upload of VNF package {} content accepted", id);
    Ok(())
}

/// Upload the content of a VNF package from a local ZIP file.
pub async fn upload_vnf_package_file<P: AsRef<Path>>(
    session: &Session,
    id: &str,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await.map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Cannot read VNF package file {:?}: {}", path, e),
        )
        .with_source(e)
    })?;
    upload_vnf_package_content(session, id, data).await
}

/// Ask the server to fetch the content of a VNF package from a URI.
///
/// `body` must contain `addressInformation` and may contain `userName` and
/// `password`.
pub async fn upload_vnf_package_from_uri(session: &Session, id: &str, body: Value) -> Result<()> {
    debug!("Uploading content of VNF package {} from {:?}", id, body.get("addressInformation"));
    let _ = session
        .send(&request(Method::POST, &[PACKAGES, id, CONTENT, "upload_from_uri"]).json(body))
        .await?;
    debug!("Upload of VNF package {} content accepted", id);
    Ok(())
}

/// Download the whole content of a VNF package.
pub async fn download_vnf_package(session: &Session, id: &str) -> Result<Vec<u8>> {
    trace!("Downloading content of VNF package {}", id);
    session
        .fetch_bytes(&request(Method::GET, &[PACKAGES, id, CONTENT]).accept(ZIP))
        .await
}

/// Download the VNFD of a VNF package.
pub async fn download_vnfd(session: &Session, id: &str, format: VnfdFormat) -> Result<Vec<u8>> {
    trace!("Downloading VNFD of VNF package {} as {}", id, format.accept());
    session
        .fetch_bytes(&request(Method::GET, &[PACKAGES, id, "vnfd"]).accept(format.accept()))
        .await
}

/// Fetch an artifact of a VNF package.
///
/// `artifact_path` is relative to the package root, e.g. `Scripts/install.sh`.
pub async fn fetch_artifact(session: &Session, id: &str, artifact_path: &str) -> Result<Vec<u8>> {
    trace!("Fetching artifact {} of VNF package {}", artifact_path, id);
    let mut segments = vec![PACKAGES, id, "artifacts"];
    segments.extend(artifact_path.split('/').filter(|s| !s.is_empty()));
    session
        .fetch_bytes(&request(Method::GET, segments).accept("*/*"))
        .await
}
