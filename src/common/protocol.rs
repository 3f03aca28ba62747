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

//! Common protocol bits: body (de)serialization and resource wrapping.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::{Error, ErrorKind, Result};

/// JSON content type.
pub const JSON: &str = "application/json";
/// JSON merge patch content type.
pub const MERGE_PATCH: &str = "application/merge-patch+json";
/// ZIP archive content type.
pub const ZIP: &str = "application/zip";

/// Serialize a request body.
pub fn serialize(body: &Value) -> Result<String> {
    Ok(serde_json::to_string(body)?)
}

/// Deserialize a successful response body.
///
/// Status 204 and empty bodies produce `Value::Null`.
pub fn deserialize(status: StatusCode, text: &str) -> Result<Value> {
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(text).map_err(|e| {
        Error::new(
            ErrorKind::MalformedResponseBody,
            format!("Cannot parse response body: {}", e),
        )
        .with_source(e)
    })
}

/// Deserialize an error response body.
///
/// Anything that is not JSON is kept as a message.
pub fn deserialize_fault(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => {
            let mut map = Map::new();
            let _ = map.insert("message".into(), Value::String(text.into()));
            Value::Object(map)
        }
    }
}

/// Wrap attributes under the resource key: `{resource: attrs}`.
pub fn wrap(resource: &str, attrs: Value) -> Value {
    let mut map = Map::new();
    let _ = map.insert(resource.into(), attrs);
    Value::Object(map)
}

/// Extract the value under the resource key.
pub fn unwrap(resource: &str, mut body: Value) -> Result<Value> {
    match body.get_mut(resource) {
        Some(value) => Ok(value.take()),
        None => Err(Error::new(
            ErrorKind::InvalidResponse,
            format!("Response does not contain the '{}' key", resource),
        )),
    }
}

/// Extract the list under the collection key.
pub fn unwrap_list(collection: &str, body: Value) -> Result<Vec<Value>> {
    match unwrap(collection, body)? {
        Value::Array(items) => Ok(items),
        other => Err(Error::new(
            ErrorKind::InvalidResponse,
            format!("Expected a list under '{}', got {}", collection, other),
        )),
    }
}

/// Extract a bare list from an ETSI-style response.
pub fn expect_list(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::new(
            ErrorKind::InvalidResponse,
            format!("Expected a list in the response, got {}", other),
        )),
    }
}

#[cfg(test)]
pub mod test {
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_round_trip() {
        let bodies = [
            json!({"vnf": {"name": "vnf1", "attributes": {"config": "x"}}}),
            json!({"vim": {"auth_url": "http://k:5000/v3", "is_default": true, "n": 42,
                           "regions": ["RegionOne", "RegionTwo"], "extra": null}}),
            json!([1, 2.5, "three", {"four": [4]}]),
            json!("plain"),
        ];
        for body in bodies {
            let text = serialize(&body).unwrap();
            assert_eq!(deserialize(StatusCode::OK, &text).unwrap(), body);
        }
    }

    #[test]
    fn test_deserialize_empty() {
        assert_eq!(
            deserialize(StatusCode::NO_CONTENT, "ignored").unwrap(),
            Value::Null
        );
        assert_eq!(deserialize(StatusCode::OK, "  ").unwrap(), Value::Null);
    }

    #[test]
    fn test_deserialize_malformed() {
        let err = deserialize(StatusCode::OK, "<html>").err().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::MalformedResponseBody);
    }

    #[test]
    fn test_deserialize_fault() {
        assert_eq!(deserialize_fault("Not Found"), json!({"message": "Not Found"}));
        assert_eq!(
            deserialize_fault(r#"{"TackerError": {}}"#),
            json!({"TackerError": {}})
        );
    }

    #[test]
    fn test_wrap_unwrap() {
        let body = wrap("vnfd", json!({"name": "d1"}));
        assert_eq!(body, json!({"vnfd": {"name": "d1"}}));
        assert_eq!(unwrap("vnfd", body).unwrap(), json!({"name": "d1"}));
        unwrap("vnf", json!({"vnfd": {}})).err().unwrap();

        let items = unwrap_list("vnfs", json!({"vnfs": [{"id": "1"}]})).unwrap();
        assert_eq!(items, vec![json!({"id": "1"})]);
        unwrap_list("vnfs", json!({"vnfs": {}})).err().unwrap();
        assert!(expect_list(Value::Null).unwrap().is_empty());
    }
}
