// Copyright 2017 Dmitry Tantsur <divius.inside@gmail.com>
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

//! Various utilities.

use std::fmt::Display;

use serde_json::Value;
use url::Url;

/// Query parameters of a request.
///
/// Keeps the order of items and allows repeated keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(pub Vec<(String, String)>);

impl Query {
    /// Empty query.
    pub fn new() -> Query {
        Query(Vec::new())
    }

    /// Add an item to the query.
    pub fn push<K, V>(&mut self, param: K, value: V)
    where
        K: Into<String>,
        V: Display,
    {
        self.0.push((param.into(), value.to_string()))
    }

    /// Add a string item to the query.
    pub fn push_str<K, V>(&mut self, param: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push((param.into(), value.into()))
    }

    /// Add an item to the query (builder style).
    pub fn with<K, V>(mut self, param: K, value: V) -> Query
    where
        K: Into<String>,
        V: Display,
    {
        self.push(param, value);
        self
    }

    /// First value of the given parameter.
    pub fn get(&self, param: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == param)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the parameter is present with a true-ish value.
    pub fn is_true(&self, param: &str) -> bool {
        matches!(
            self.get(param).map(|v| v.to_lowercase()).as_deref(),
            Some("true") | Some("1") | Some("yes")
        )
    }

    /// Whether the query is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the query string of a URL.
    pub fn from_url(url: &Url) -> Query {
        Query(url.query_pairs().into_owned().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Query {
        Query(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Cut a string to `limit` characters, appending an ellipsis if it was longer.
pub fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() > limit {
        let mut result: String = value.chars().take(limit).collect();
        result.push_str("...");
        result
    } else {
        value.to_string()
    }
}

/// Truncate a string field of a JSON object in place.
pub fn truncate_field(object: &mut Value, field: &str, limit: usize) {
    if let Some(slot) = object.get_mut(field) {
        if let Some(text) = slot.as_str() {
            let cut = truncate(text, limit);
            *slot = Value::String(cut);
        }
    }
}

/// Append path segments to a URL, treating it as a directory.
#[allow(unused_results)]
pub fn extend_url<I>(mut url: Url, segments: I) -> Url
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
pub mod test {
    use serde_json::json;
    use url::Url;

    use super::{extend_url, truncate, truncate_field, Query};

    #[test]
    fn test_query() {
        let mut q = Query::new();
        q.push("limit", 10);
        q.push_str("marker", "abc");
        q.push_str("marker", "def");
        assert_eq!(q.get("limit"), Some("10"));
        assert_eq!(q.get("marker"), Some("abc"));
        assert_eq!(q.0.len(), 3);
        assert!(!q.is_true("page_reverse"));
        assert!(Query::new().with("page_reverse", "True").is_true("page_reverse"));
    }

    #[test]
    fn test_query_from_url() {
        let u = Url::parse("http://tacker/v1.0/vnfs?marker=a%20b&limit=2&marker=c").unwrap();
        let q = Query::from_url(&u);
        assert_eq!(
            q.0,
            vec![
                ("marker".to_string(), "a b".to_string()),
                ("limit".to_string(), "2".to_string()),
                ("marker".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 25), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééé", 2), "éé...");

        let mut obj = json!({"description": "a very long description indeed", "n": 1});
        truncate_field(&mut obj, "description", 6);
        truncate_field(&mut obj, "n", 0);
        truncate_field(&mut obj, "missing", 0);
        assert_eq!(obj, json!({"description": "a very...", "n": 1}));
    }

    #[test]
    fn test_url_extend() {
        let base = Url::parse("http://tacker:9890/").unwrap();
        let u = extend_url(base, &["v1.0", "vnfs", "a b"]);
        assert_eq!(u.as_str(), "http://tacker:9890/v1.0/vnfs/a%20b");

        let base = Url::parse("http://cloud/nfv/").unwrap();
        let u = extend_url(base, &["vnflcm", "v1", "vnf_instances"]);
        assert_eq!(u.as_str(), "http://cloud/nfv/vnflcm/v1/vnf_instances");
    }
}
