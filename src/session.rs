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

//! Session structure definition.
//!
//! The Session object serves as a wrapper around an HTTP(s) client, handling
//! authentication, endpoint discovery, retries and error mapping. Every call
//! is described by a [Request](struct.Request.html) value, so a session is
//! never mutated while a call is in flight.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::Value;

use crate::auth::{AuthType, EndpointFilters, InterfaceType};
use crate::common::protocol::{self, JSON, MERGE_PATCH};
use crate::common::Plurals;
use crate::error::{from_fault, MAX_URI_LEN};
use crate::utils::{self, Query};
use crate::{Error, ErrorKind, Result};

/// Service type of Tacker in the service catalog.
pub const SERVICE_TYPE: &str = "nfv-orchestration";

/// Default interval between connection attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Body of a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(Value),
    /// JSON merge patch document.
    MergePatch(Value),
    /// Raw data with its content type.
    Raw {
        /// Content type of the data.
        content_type: String,
        /// The data itself.
        data: Vec<u8>,
    },
}

/// Parameters of one API call.
#[derive(Clone, Debug)]
pub struct Request {
    method: Method,
    path: Vec<String>,
    query: Query,
    body: RequestBody,
    headers: HeaderMap,
    accept: String,
}

/// A Tacker API session.
///
/// Cloning a session is cheap: the authentication (and its token cache) is
/// shared between clones.
#[derive(Clone)]
pub struct Session {
    client: Client,
    auth: Arc<dyn AuthType>,
    filters: EndpointFilters,
    endpoint_override: Option<Url>,
    retries: u32,
    retry_interval: Duration,
    raise_errors: bool,
    timeout: Option<Duration>,
    plurals: Plurals,
}

impl Request {
    /// Create a request for a method and path segments.
    pub fn new<I>(method: Method, path: I) -> Request
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Request {
            method,
            path: path.into_iter().map(|s| s.as_ref().to_string()).collect(),
            query: Query::new(),
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
            accept: JSON.to_string(),
        }
    }

    /// A GET request.
    #[inline]
    pub fn get<I>(path: I) -> Request
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Request::new(Method::GET, path)
    }

    /// A POST request.
    #[inline]
    pub fn post<I>(path: I) -> Request
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Request::new(Method::POST, path)
    }

    /// A PUT request.
    #[inline]
    pub fn put<I>(path: I) -> Request
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Request::new(Method::PUT, path)
    }

    /// A PATCH request.
    #[inline]
    pub fn patch<I>(path: I) -> Request
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Request::new(Method::PATCH, path)
    }

    /// A DELETE request.
    #[inline]
    pub fn delete<I>(path: I) -> Request
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Request::new(Method::DELETE, path)
    }

    /// Set the query.
    pub fn query(mut self, query: &Query) -> Request {
        self.query = query.clone();
        self
    }

    /// Set a JSON body.
    pub fn json(mut self, body: Value) -> Request {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a JSON merge patch body.
    pub fn merge_patch(mut self, body: Value) -> Request {
        self.body = RequestBody::MergePatch(body);
        self
    }

    /// Set a raw body.
    pub fn raw<S: Into<String>>(mut self, content_type: S, data: Vec<u8>) -> Request {
        self.body = RequestBody::Raw {
            content_type: content_type.into(),
            data,
        };
        self
    }

    /// Add a header.
    ///
    /// Invalid header names or values are ignored with a warning.
    pub fn header(mut self, name: &str, value: &str) -> Request {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                let _ = self.headers.insert(name, value);
            }
            _ => warn!("Ignoring invalid header {}: {}", name, value),
        }
        self
    }

    /// Set the expected response content type.
    pub fn accept<S: Into<String>>(mut self, content_type: S) -> Request {
        self.accept = content_type.into();
        self
    }

    /// HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path segments.
    #[inline]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Query parameters.
    #[inline]
    pub fn query_params(&self) -> &Query {
        &self.query
    }

    /// Request body.
    #[inline]
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Extra headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether a failed connection may be retried.
    ///
    /// POST creates resources and is never retried; PATCH is not idempotent.
    pub fn is_retriable(&self) -> bool {
        matches!(self.method, Method::GET | Method::PUT | Method::DELETE)
    }
}

impl Session {
    /// Create a new session with a given authentication type.
    pub fn new<Auth: AuthType + 'static>(auth_type: Auth) -> Session {
        Session::new_with_client(Client::new(), auth_type)
    }

    /// Create a new session with a given HTTP client and authentication type.
    pub fn new_with_client<Auth: AuthType + 'static>(client: Client, auth_type: Auth) -> Session {
        Session {
            client,
            auth: Arc::new(auth_type),
            filters: EndpointFilters::default(),
            endpoint_override: None,
            retries: 0,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            raise_errors: true,
            timeout: None,
            plurals: Plurals::default(),
        }
    }

    /// Reference to the authentication type in use.
    #[inline]
    pub fn auth_type(&self) -> &dyn AuthType {
        self.auth.as_ref()
    }

    /// Endpoint filters in use.
    #[inline]
    pub fn endpoint_filters(&self) -> &EndpointFilters {
        &self.filters
    }

    /// Resource name to collection name mapping.
    #[inline]
    pub fn plurals(&self) -> &Plurals {
        &self.plurals
    }

    /// Number of retries for idempotent requests.
    #[inline]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Convert this session into one using the given endpoint interface.
    pub fn with_endpoint_interface(mut self, interface: InterfaceType) -> Session {
        self.filters.interfaces = vec![interface];
        self
    }

    /// Convert this session into one using the given region.
    pub fn with_region<S: Into<String>>(mut self, region: S) -> Session {
        self.filters.region = Some(region.into());
        self
    }

    /// Use this endpoint instead of the one from the service catalog.
    pub fn with_endpoint_override(mut self, endpoint: Url) -> Session {
        self.endpoint_override = Some(endpoint);
        self
    }

    /// Retry idempotent requests this many times on connection failures.
    pub fn with_retries(mut self, retries: u32) -> Session {
        self.retries = retries;
        self
    }

    /// Wait this long between connection attempts.
    pub fn with_retry_interval(mut self, interval: Duration) -> Session {
        self.retry_interval = interval;
        self
    }

    /// Whether to include the last transport error when giving up.
    pub fn with_raise_errors(mut self, raise_errors: bool) -> Session {
        self.raise_errors = raise_errors;
        self
    }

    /// Timeout for each HTTP request.
    pub fn with_timeout(mut self, timeout: Duration) -> Session {
        self.timeout = Some(timeout);
        self
    }

    /// Use the given resource to collection mapping.
    pub fn with_plurals(mut self, plurals: Plurals) -> Session {
        self.plurals = plurals;
        self
    }

    /// Refresh the authentication (renew the token, etc).
    pub async fn refresh(&self) -> Result<()> {
        self.auth.refresh(&self.client).await
    }

    /// Root endpoint of the Tacker service.
    pub async fn get_endpoint(&self) -> Result<Url> {
        match self.endpoint_override {
            Some(ref url) => Ok(url.clone()),
            None => {
                self.auth
                    .get_endpoint(&self.client, SERVICE_TYPE, &self.filters)
                    .await
            }
        }
    }

    /// Build the full URL of a request.
    pub async fn get_url(&self, request: &Request) -> Result<Url> {
        let mut url = utils::extend_url(self.get_endpoint().await?, &request.path);
        if !request.query.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(request.query.0.iter());
        }
        Ok(url)
    }

    /// Send a request, retrying idempotent ones on connection failures.
    ///
    /// Returns the response if its status is a success, otherwise an error
    /// mapped from the status and the body. A 401 is answered by renewing
    /// the token and sending the request once more, if the authentication
    /// type supports that.
    pub async fn send(&self, request: &Request) -> Result<Response> {
        match self.send_once(request).await {
            Err(err) if err.kind() == ErrorKind::Unauthorized && self.auth.renewable() => {
                debug!("Token was rejected, re-authenticating");
                self.auth.refresh(&self.client).await?;
                self.send_once(request).await
            }
            result => result,
        }
    }

    async fn send_once(&self, request: &Request) -> Result<Response> {
        if request.is_retriable() {
            self.retry_request(request).await
        } else {
            self.do_request(request).await
        }
    }

    /// Send a request and deserialize the JSON response.
    pub async fn fetch_json(&self, request: &Request) -> Result<Value> {
        let resp = self.send(request).await?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            Error::new(
                ErrorKind::ConnectionFailed,
                format!("Failed to read the response body: {}", e),
            )
            .with_source(e)
        })?;
        let result = protocol::deserialize(status, &text)?;
        trace!("Received {:?}", result);
        Ok(result)
    }

    /// Send a request and return the raw response body.
    pub async fn fetch_bytes(&self, request: &Request) -> Result<Vec<u8>> {
        let resp = self.send(request).await?;
        let bytes = resp.bytes().await.map_err(|e| {
            Error::new(
                ErrorKind::ConnectionFailed,
                format!("Failed to read the response body: {}", e),
            )
            .with_source(e)
        })?;
        Ok(bytes.to_vec())
    }

    /// GET a JSON document.
    pub async fn get_json<I>(&self, path: I, query: &Query) -> Result<Value>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.fetch_json(&Request::get(path).query(query)).await
    }

    /// POST a JSON document and receive a JSON document.
    pub async fn post_json<I>(&self, path: I, body: Value) -> Result<Value>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.fetch_json(&Request::post(path).json(body)).await
    }

    /// PUT a JSON document and receive a JSON document.
    pub async fn put_json<I>(&self, path: I, body: Value) -> Result<Value>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.fetch_json(&Request::put(path).json(body)).await
    }

    /// DELETE a resource.
    pub async fn delete<I>(&self, path: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let _ = self.send(&Request::delete(path)).await?;
        Ok(())
    }

    /// Retry wrapper around `do_request`.
    async fn retry_request(&self, request: &Request) -> Result<Response> {
        let max_attempts = self.retries + 1;
        let mut last_error = None;
        for attempt in 0..max_attempts {
            match self.do_request(request).await {
                Err(err) if err.kind() == ErrorKind::ConnectionFailed => {
                    if attempt < self.retries {
                        debug!(
                            "Retrying connection to Tacker service (attempt {} of {})",
                            attempt + 2,
                            max_attempts
                        );
                        tokio::time::sleep(self.retry_interval).await;
                    }
                    last_error = Some(err);
                }
                result => return result,
            }
        }

        let summary = format!(
            "Failed to connect to Tacker server after {} attempt{}",
            max_attempts,
            if max_attempts == 1 { "" } else { "s" }
        );
        error!("{}", summary);
        Err(match last_error {
            Some(cause) if self.raise_errors => {
                Error::new(ErrorKind::ConnectionFailed, format!("{}: {}", summary, cause))
                    .with_source(cause)
            }
            _ => Error::new(ErrorKind::ConnectionFailed, summary),
        })
    }

    /// Perform exactly one HTTP request.
    async fn do_request(&self, request: &Request) -> Result<Response> {
        let url = self.get_url(request).await?;
        if url.as_str().len() > MAX_URI_LEN {
            return Err(Error::new_with_details(
                ErrorKind::RequestUriTooLong,
                None,
                Some(format!(
                    "Request URI is too long: {} characters over the limit of {}",
                    url.as_str().len() - MAX_URI_LEN,
                    MAX_URI_LEN
                )),
            ));
        }

        debug!("{} {}", request.method, url);
        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, request.accept.as_str())
            .headers(request.headers.clone());
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(ref body) => builder
                .header(CONTENT_TYPE, JSON)
                .body(protocol::serialize(body)?),
            RequestBody::MergePatch(ref body) => builder
                .header(CONTENT_TYPE, MERGE_PATCH)
                .body(protocol::serialize(body)?),
            RequestBody::Raw {
                ref content_type,
                ref data,
            } => builder
                .header(CONTENT_TYPE, content_type.as_str())
                .body(data.clone()),
        };
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let builder = self.auth.authenticate(&self.client, builder).await?;
        let resp = builder.send().await.map_err(|e| {
            error!("Request {} {} failed: {}", request.method, url, e);
            Error::new(ErrorKind::ConnectionFailed, e.to_string()).with_source(e)
        })?;

        let status = resp.status();
        if status.is_success() {
            trace!("{} {} returned {}", request.method, url, status);
            Ok(resp)
        } else {
            Err(self.handle_fault_response(status, resp).await)
        }
    }

    async fn handle_fault_response(&self, status: StatusCode, resp: Response) -> Error {
        let mut text = resp.text().await.unwrap_or_default();
        if text.is_empty() {
            text = status.canonical_reason().unwrap_or_default().to_string();
        }
        debug!("Error message: {}", text);
        if status == StatusCode::UNAUTHORIZED {
            // Keystone middleware rejects tokens with its own body format.
            return Error::new_with_details(ErrorKind::Unauthorized, Some(status), Some(text));
        }
        from_fault(status, &protocol::deserialize_fault(&text))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth", &self.auth)
            .field("filters", &self.filters)
            .field("endpoint_override", &self.endpoint_override)
            .field("retries", &self.retries)
            .field("retry_interval", &self.retry_interval)
            .field("raise_errors", &self.raise_errors)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
pub mod test {
    use reqwest::Method;
    use serde_json::json;

    use super::{Request, RequestBody, Session};
    use crate::auth::NoAuth;
    use crate::utils::Query;
    use crate::ErrorKind;

    pub fn new_session(endpoint: &str) -> Session {
        Session::new(NoAuth::new(endpoint).unwrap())
    }

    #[test]
    fn test_request_builder() {
        let r = Request::post(&["v1.0", "vnfs"]).json(json!({"vnf": {}}));
        assert_eq!(r.method(), &Method::POST);
        assert_eq!(r.path(), &["v1.0".to_string(), "vnfs".to_string()]);
        assert_eq!(r.body(), &RequestBody::Json(json!({"vnf": {}})));
        assert!(!r.is_retriable());

        assert!(Request::get(&["v1.0"]).is_retriable());
        assert!(Request::put(&["v1.0"]).is_retriable());
        assert!(Request::delete(&["v1.0"]).is_retriable());
        assert!(!Request::patch(&["v1.0"]).is_retriable());
    }

    #[tokio::test]
    async fn test_get_url() {
        let s = new_session("http://127.0.0.1:9890/");
        let q = Query::new().with("name", "vnf 1").with("limit", 2);
        let url = s
            .get_url(&Request::get(&["v1.0", "vnfs"]).query(&q))
            .await
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9890/v1.0/vnfs?name=vnf+1&limit=2"
        );
    }

    #[tokio::test]
    async fn test_uri_too_long() {
        let s = new_session("http://127.0.0.1:9890/");
        let q = Query::new().with("name", "x".repeat(9000));
        let err = s
            .fetch_json(&Request::get(&["v1.0", "vnfs"]).query(&q))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::RequestUriTooLong);
    }
}
