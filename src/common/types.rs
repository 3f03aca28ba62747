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

//! Types shared between APIs.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{Error, ErrorKind, Result};

/// Read-only view of a resource returned by the server.
///
/// Resources are untyped JSON objects; this type exposes typed lookups of
/// their fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView {
    inner: Map<String, Value>,
}

/// Mapping from resource names to collection names.
///
/// Seeded with the built-in Tacker resources. Extensions discovered on the
/// server can be added with [insert](#method.insert) before the mapping is
/// passed to [Session::with_plurals](../session/struct.Session.html#method.with_plurals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plurals {
    inner: HashMap<String, String>,
}

const BUILTIN_PLURALS: &[(&str, &str)] = &[
    ("classifier", "classifiers"),
    ("event", "events"),
    ("extension", "extensions"),
    ("nfp", "nfps"),
    ("ns", "nss"),
    ("nsd", "nsds"),
    ("policy", "policies"),
    ("sfc", "sfcs"),
    ("vim", "vims"),
    ("vnf", "vnfs"),
    ("vnfd", "vnfds"),
    ("vnffg", "vnffgs"),
    ("vnffgd", "vnffgds"),
];

impl ResourceView {
    /// Create a view over a JSON value.
    ///
    /// Fails if the value is not an object.
    pub fn new(value: Value) -> Result<ResourceView> {
        match value {
            Value::Object(inner) => Ok(ResourceView { inner }),
            other => Err(Error::new(
                ErrorKind::InvalidResponse,
                format!("Expected an object, got {}", other),
            )),
        }
    }

    /// Raw field value.
    #[inline]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.inner.get(field)
    }

    /// String field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Integer field.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Boolean field.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// Object field.
    pub fn get_object(&self, field: &str) -> Option<&Map<String, Value>> {
        self.get(field).and_then(Value::as_object)
    }

    /// Array field.
    pub fn get_array(&self, field: &str) -> Option<&Vec<Value>> {
        self.get(field).and_then(Value::as_array)
    }

    /// Resource ID.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// Resource name.
    ///
    /// ETSI resources use `vnfInstanceName` or `vnfProductName` instead.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
            .or_else(|| self.get_str("vnfInstanceName"))
            .or_else(|| self.get_str("vnfProductName"))
    }

    /// Field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Underlying object.
    #[inline]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }

    /// Convert back into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.inner)
    }
}

impl TryFrom<Value> for ResourceView {
    type Error = Error;

    fn try_from(value: Value) -> Result<ResourceView> {
        ResourceView::new(value)
    }
}

impl Default for Plurals {
    fn default() -> Plurals {
        Plurals {
            inner: BUILTIN_PLURALS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Plurals {
    /// Add or replace a mapping.
    pub fn insert<S1, S2>(&mut self, resource: S1, collection: S2)
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let _ = self.inner.insert(resource.into(), collection.into());
    }

    /// Add a mapping (builder style).
    pub fn with<S1, S2>(mut self, resource: S1, collection: S2) -> Plurals
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.insert(resource, collection);
        self
    }

    /// Collection name for a resource.
    ///
    /// Unknown resources get an `s` appended.
    pub fn collection(&self, resource: &str) -> String {
        match self.inner.get(resource) {
            Some(collection) => collection.clone(),
            None => format!("{}s", resource),
        }
    }
}

#[cfg(test)]
pub mod test {
    use serde_json::json;

    use super::{Plurals, ResourceView};

    #[test]
    fn test_resource_view() {
        let view = ResourceView::new(json!({
            "id": "abc",
            "name": "vnf1",
            "instance_id": 42,
            "is_default": true,
            "attributes": {"config": "x"},
            "placement_attr": ["a"]
        }))
        .unwrap();
        assert_eq!(view.id(), Some("abc"));
        assert_eq!(view.name(), Some("vnf1"));
        assert_eq!(view.get_i64("instance_id"), Some(42));
        assert_eq!(view.get_bool("is_default"), Some(true));
        assert_eq!(view.get_str("instance_id"), None);
        assert!(view.get_object("attributes").unwrap().contains_key("config"));
        assert_eq!(view.get_array("placement_attr").unwrap().len(), 1);
        assert_eq!(view.fields().count(), 6);
    }

    #[test]
    fn test_resource_view_etsi_name() {
        let view = ResourceView::new(json!({"id": "1", "vnfInstanceName": "inst"})).unwrap();
        assert_eq!(view.name(), Some("inst"));
    }

    #[test]
    fn test_resource_view_not_object() {
        ResourceView::new(json!([1, 2])).err().unwrap();
    }

    #[test]
    fn test_plurals() {
        let plurals = Plurals::default().with("cluster", "clusters");
        assert_eq!(plurals.collection("policy"), "policies");
        assert_eq!(plurals.collection("ns"), "nss");
        assert_eq!(plurals.collection("cluster"), "clusters");
        assert_eq!(plurals.collection("widget"), "widgets");
    }
}
