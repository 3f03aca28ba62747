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

//! Resolving resource names to IDs.

use serde_json::Value;

use crate::common::pagination;
use crate::session::Session;
use crate::utils::Query;
use crate::{Error, ErrorKind, Result};

/// Find the ID of a legacy API resource by its name or ID.
///
/// `prefix` is the API root (e.g. `["v1.0"]`); the collection name comes from
/// the session's [Plurals](struct.Plurals.html).
pub async fn find_resource_id(
    session: &Session,
    prefix: &[&str],
    resource: &str,
    name_or_id: &str,
) -> Result<String> {
    let collection = session.plurals().collection(resource);
    let mut path: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
    path.push(collection.clone());

    let mut by_id = path.clone();
    by_id.push(name_or_id.to_string());
    match session
        .get_json(&by_id, &Query::new().with("fields", "id"))
        .await
    {
        Ok(body) => {
            if let Some(id) = body
                .get(resource)
                .and_then(|r| r.get("id"))
                .and_then(Value::as_str)
            {
                trace!("{} {} exists", resource, id);
                return Ok(id.to_string());
            }
        }
        // Any server-side rejection means the value is not a usable ID.
        Err(err) if err.status().is_some() => {
            trace!("{} '{}' is not an ID: {}", resource, name_or_id, err);
        }
        Err(err) => return Err(err),
    }

    let query = Query::new()
        .with("name", name_or_id)
        .with("fields", "id");
    let items = pagination::list_all(session, &collection, path, query).await?;
    let mut ids = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_str));
    match (ids.next(), ids.next()) {
        (Some(id), None) => {
            debug!("Resolved {} '{}' to {}", resource, name_or_id, id);
            Ok(id.to_string())
        }
        (None, _) => Err(Error::new(
            ErrorKind::NotFound,
            format!("Unable to find {} with name '{}'", resource, name_or_id),
        )),
        (Some(_), Some(_)) => Err(Error::new(
            ErrorKind::Conflict,
            format!(
                "Multiple {} matches found for name '{}', use an ID to be more specific.",
                resource, name_or_id
            ),
        )),
    }
}

/// Find a resource in an already fetched list by its ID or name.
///
/// Used for the ETSI APIs, which have no server-side name filter.
pub fn find_in_list(
    resource: &str,
    items: Vec<Value>,
    name_or_id: &str,
    name_field: &str,
) -> Result<Value> {
    if let Some(found) = items
        .iter()
        .find(|item| item.get("id").and_then(Value::as_str) == Some(name_or_id))
    {
        return Ok(found.clone());
    }

    let mut matches: Vec<Value> = items
        .into_iter()
        .filter(|item| item.get(name_field).and_then(Value::as_str) == Some(name_or_id))
        .collect();
    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(Error::new(
            ErrorKind::NotFound,
            format!("Unable to find {} with name '{}'", resource, name_or_id),
        )),
        _ => Err(Error::new(
            ErrorKind::Conflict,
            format!(
                "Multiple {} matches found for name '{}', use an ID to be more specific.",
                resource, name_or_id
            ),
        )),
    }
}
