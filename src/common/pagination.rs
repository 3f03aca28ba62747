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

//! Streams over paginated collections.
//!
//! Two flavours of pagination are used by Tacker:
//!
//! * The legacy API returns `{collection: [...], collection_links: [...]}`
//!   where a link with `rel == "next"` points to the next page.
//! * The ETSI SOL APIs return bare JSON arrays and put the next page into a
//!   `Link: <href>; rel="next"` response header.

use async_stream::try_stream;
use futures::stream::{Stream, TryStreamExt};
use reqwest::header::LINK;
use reqwest::Url;
use serde_json::Value;

use crate::common::protocol;
use crate::session::{Request, Session};
use crate::utils::Query;
use crate::{Error, ErrorKind, Result};

/// Stream of legacy API pages.
///
/// Each item is a full response body. The stream ends when the page has no
/// link in the requested direction (`next`, or `previous` if the initial
/// query contains `page_reverse=True`). A page without the links key at all
/// is the last one.
pub fn pages<'s>(
    session: &'s Session,
    collection: &'s str,
    path: Vec<String>,
    query: Query,
) -> impl Stream<Item = Result<Value>> + 's {
    let linkrel = if query.is_true("page_reverse") {
        "previous"
    } else {
        "next"
    };

    try_stream! {
        let mut current = Some(query);
        while let Some(query) = current.take() {
            let page = session.get_json(&path, &query).await?;
            let next = next_query(&page, collection, linkrel);
            yield page;
            current = next?;
        }
    }
}

/// Fetch all items of a legacy collection.
pub async fn list_all(
    session: &Session,
    collection: &str,
    path: Vec<String>,
    query: Query,
) -> Result<Vec<Value>> {
    trace!("Listing all {} with {:?}", collection, query);
    let pages: Vec<Value> = pages(session, collection, path, query).try_collect().await?;
    let mut result = Vec::new();
    for page in pages {
        result.extend(protocol::unwrap_list(collection, page)?);
    }
    trace!("Received {} {}", result.len(), collection);
    Ok(result)
}

/// Stream of ETSI API pages following `Link` headers.
///
/// Each item is the list of resources on one page.
pub fn linked_pages(
    session: &Session,
    request: Request,
) -> impl Stream<Item = Result<Vec<Value>>> + '_ {
    try_stream! {
        let mut current = Some(request);
        while let Some(request) = current.take() {
            let resp = session.send(&request).await?;
            let next = resp
                .headers()
                .get_all(LINK)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .find_map(next_link);
            let status = resp.status();
            let text = resp.text().await.map_err(|e| {
                Error::new(ErrorKind::ConnectionFailed, e.to_string()).with_source(e)
            })?;
            let items = protocol::expect_list(protocol::deserialize(status, &text)?)?;

            if let Some(href) = next {
                let url = Url::parse(&href).map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidResponse,
                        format!("Invalid next page link {}: {}", href, e),
                    )
                })?;
                current = Some(request.query(&Query::from_url(&url)));
            }
            yield items;
        }
    }
}

/// Fetch all items of an ETSI collection.
pub async fn list_all_linked(session: &Session, request: Request) -> Result<Vec<Value>> {
    let pages: Vec<Vec<Value>> = linked_pages(session, request).try_collect().await?;
    Ok(pages.into_iter().flatten().collect())
}

/// Query of the next page, if any.
fn next_query(page: &Value, collection: &str, linkrel: &str) -> Result<Option<Query>> {
    let key = format!("{}_links", collection);
    let links = match page.get(&key) {
        Some(Value::Array(links)) => links,
        Some(Value::Null) | None => return Ok(None),
        Some(other) => {
            return Err(Error::new(
                ErrorKind::InvalidResponse,
                format!("Expected a list of links in {}, got {}", key, other),
            ))
        }
    };

    for link in links {
        let (rel, href) = match (
            link.get("rel").and_then(Value::as_str),
            link.get("href").and_then(Value::as_str),
        ) {
            (Some(rel), Some(href)) => (rel, href),
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidResponse,
                    format!("Malformed link in {}: {}", key, link),
                ))
            }
        };

        if rel == linkrel {
            let url = Url::parse(href).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidResponse,
                    format!("Invalid {} link {}: {}", linkrel, href, e),
                )
            })?;
            return Ok(Some(Query::from_url(&url)));
        }
    }

    Ok(None)
}

/// Extract the `rel="next"` target from one `Link` header value.
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let mut kv = param.splitn(2, '=');
            let key = kv.next().map(str::trim);
            let value = kv.next().map(|v| v.trim().trim_matches('"'));
            key == Some("rel") && value.map_or(false, |v| v.split_whitespace().any(|r| r == "next"))
        });
        if is_next && target.starts_with('<') && target.ends_with('>') {
            Some(target[1..target.len() - 1].to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
pub mod test {
    use serde_json::json;

    use super::{next_link, next_query};
    use crate::ErrorKind;

    #[test]
    fn test_next_query() {
        let page = json!({
            "vnfs": [{"id": "1"}],
            "vnfs_links": [
                {"rel": "previous", "href": "http://t/v1.0/vnfs?marker=0&page_reverse=True"},
                {"rel": "next", "href": "http://t/v1.0/vnfs?marker=1&limit=1"}
            ]
        });
        let q = next_query(&page, "vnfs", "next").unwrap().unwrap();
        assert_eq!(q.get("marker"), Some("1"));
        assert_eq!(q.get("limit"), Some("1"));

        let q = next_query(&page, "vnfs", "previous").unwrap().unwrap();
        assert_eq!(q.get("marker"), Some("0"));
        assert!(q.is_true("page_reverse"));
    }

    #[test]
    fn test_next_query_end() {
        let page = json!({"vnfs": [], "vnfs_links": [{"rel": "self", "href": "http://t/"}]});
        assert!(next_query(&page, "vnfs", "next").unwrap().is_none());
        assert!(next_query(&json!({"vnfs": []}), "vnfs", "next")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_next_query_malformed() {
        let err = next_query(&json!({"vnfs_links": {"next": 1}}), "vnfs", "next")
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        let err = next_query(&json!({"vnfs_links": [{"rel": "next"}]}), "vnfs", "next")
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_next_link() {
        assert_eq!(
            next_link(r#"<http://t/vnflcm/v1/vnf_instances?nextpage_opaque_marker=abc>; rel="next""#),
            Some("http://t/vnflcm/v1/vnf_instances?nextpage_opaque_marker=abc".to_string())
        );
        assert_eq!(
            next_link(r#"<http://t/a?x=1>; rel="prev", <http://t/a?x=3>; rel=next"#),
            Some("http://t/a?x=3".to_string())
        );
        assert_eq!(next_link(r#"<http://t/a?x=1>; rel="prev""#), None);
        assert_eq!(next_link("garbage"), None);
    }
}
