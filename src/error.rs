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

//! Error and Result implementations.
//!
//! Every failure of a Tacker call ends up as an [Error](struct.Error.html)
//! carrying an [ErrorKind](enum.ErrorKind.html). HTTP faults returned by the
//! server are converted by [from_fault](fn.from_fault.html), which is total:
//! any status code and body produce exactly one error.

use std::error::Error as StdError;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// Kind of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request is malformed.
    ///
    /// Maps to HTTP 400.
    BadRequest,

    /// Authentication failure.
    ///
    /// Maps to HTTP 401.
    Unauthorized,

    /// Access denied.
    ///
    /// Maps to HTTP 403.
    Forbidden,

    /// Requested resource was not found.
    ///
    /// Maps to HTTP 404.
    NotFound,

    /// Conflict in the request.
    ///
    /// Maps to HTTP 409.
    Conflict,

    /// Internal server error.
    ///
    /// Maps to HTTP 500.
    InternalServerError,

    /// The service is temporary unavailable.
    ///
    /// Maps to HTTP 503.
    ServiceUnavailable,

    /// Network was not found (server type `NetworkNotFound`).
    NetworkNotFound,

    /// Port was not found (server type `PortNotFound`).
    PortNotFound,

    /// Resource is in an invalid state (server type `StateInvalid`).
    StateInvalid,

    /// Network is in use (server type `NetworkInUse`).
    NetworkInUse,

    /// Port is in use (server type `PortInUse`).
    PortInUse,

    /// IP address is in use (server type `IpAddressInUse`).
    IpAddressInUse,

    /// IP address is not valid for the network (server type `InvalidIpForNetwork`).
    InvalidIpForNetwork,

    /// Quota exceeded (server type `OverQuota`).
    OverQuota,

    /// No more IP addresses (server type `IpAddressGenerationFailure`).
    IpAddressGenerationFailure,

    /// MAC address is in use (server type `MacAddressInUse`).
    MacAddressInUse,

    /// External IP addresses are exhausted (server type `ExternalIpAddressExhausted`).
    ExternalIpAddressExhausted,

    /// Any other error reported by the server.
    ClientException,

    /// Failed to connect to the server.
    ConnectionFailed,

    /// The request URI is longer than the server accepts.
    RequestUriTooLong,

    /// Response received from the server cannot be parsed.
    MalformedResponseBody,

    /// Response received from the server is not what was expected.
    InvalidResponse,

    /// Requested service endpoint was not found.
    EndpointNotFound,

    /// Invalid value passed to one of parameters.
    InvalidInput,

    /// Invalid or missing configuration.
    InvalidConfig,

    /// A command failed on the client side.
    CommandError,
}

/// Error from a Tacker call.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    status: Option<StatusCode>,
    message: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

/// Result of a Tacker call.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Maximum length of a request URI.
pub const MAX_URI_LEN: usize = 8192;

/// Server-side error types with a dedicated kind.
///
/// The server reports them in the `type` field of a `TackerError` body.
const FAULT_TYPES: &[(&str, ErrorKind)] = &[
    ("NetworkNotFound", ErrorKind::NetworkNotFound),
    ("PortNotFound", ErrorKind::PortNotFound),
    ("StateInvalid", ErrorKind::StateInvalid),
    ("NetworkInUse", ErrorKind::NetworkInUse),
    ("PortInUse", ErrorKind::PortInUse),
    ("IpAddressInUse", ErrorKind::IpAddressInUse),
    ("InvalidIpForNetwork", ErrorKind::InvalidIpForNetwork),
    ("OverQuota", ErrorKind::OverQuota),
    (
        "IpAddressGenerationFailure",
        ErrorKind::IpAddressGenerationFailure,
    ),
    ("MacAddressInUse", ErrorKind::MacAddressInUse),
    (
        "ExternalIpAddressExhausted",
        ErrorKind::ExternalIpAddressExhausted,
    ),
];

impl Error {
    /// Create a new error of a given kind.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Error {
        Error {
            kind,
            status: None,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Create with providing all details.
    pub(crate) fn new_with_details(
        kind: ErrorKind,
        status: Option<StatusCode>,
        message: Option<String>,
    ) -> Error {
        Error {
            kind,
            status,
            message,
            source: None,
        }
    }

    /// Attach an underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Error
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status code (if the error came from an HTTP response).
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// HTTP status code as a number.
    #[inline]
    pub fn status_code(&self) -> Option<u16> {
        self.status.map(|s| s.as_u16())
    }

    /// Error message (if any).
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Helper - error of kind EndpointNotFound.
    pub(crate) fn new_endpoint_not_found<D: fmt::Display>(service_type: D) -> Error {
        Error::new(
            ErrorKind::EndpointNotFound,
            format!("Endpoint for service {} was not found", service_type),
        )
    }
}

impl ErrorKind {
    /// Short description of the error kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Access to the resource is denied",
            ErrorKind::NotFound => "Requested resource was not found",
            ErrorKind::Conflict => "Request cannot be fulfilled due to a conflict",
            ErrorKind::InternalServerError => "Internal server error",
            ErrorKind::ServiceUnavailable => "Service is unavailable",
            ErrorKind::NetworkNotFound => "Network not found",
            ErrorKind::PortNotFound => "Port not found",
            ErrorKind::StateInvalid => "Invalid state",
            ErrorKind::NetworkInUse => "Network in use",
            ErrorKind::PortInUse => "Port in use",
            ErrorKind::IpAddressInUse => "IP address in use",
            ErrorKind::InvalidIpForNetwork => "Invalid IP address for network",
            ErrorKind::OverQuota => "Quota exceeded",
            ErrorKind::IpAddressGenerationFailure => "No more IP addresses available",
            ErrorKind::MacAddressInUse => "MAC address in use",
            ErrorKind::ExternalIpAddressExhausted => "External IP addresses exhausted",
            ErrorKind::ClientException => "Tacker server returned an error",
            ErrorKind::ConnectionFailed => "Connection to the Tacker server failed",
            ErrorKind::RequestUriTooLong => "Request URI is too long",
            ErrorKind::MalformedResponseBody => "Malformed response body",
            ErrorKind::InvalidResponse => "Received invalid response",
            ErrorKind::EndpointNotFound => "Requested endpoint was not found",
            ErrorKind::InvalidInput => "Input value(s) are invalid or missing",
            ErrorKind::InvalidConfig => "Configuration is invalid or missing",
            ErrorKind::CommandError => "Command failed",
        }
    }

    /// HTTP status this kind corresponds to (if any).
    pub fn default_status(&self) -> Option<StatusCode> {
        Some(match self {
            ErrorKind::BadRequest
            | ErrorKind::StateInvalid
            | ErrorKind::InvalidIpForNetwork
            | ErrorKind::ExternalIpAddressExhausted => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound | ErrorKind::NetworkNotFound | ErrorKind::PortNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorKind::Conflict
            | ErrorKind::NetworkInUse
            | ErrorKind::PortInUse
            | ErrorKind::IpAddressInUse
            | ErrorKind::OverQuota
            | ErrorKind::IpAddressGenerationFailure
            | ErrorKind::MacAddressInUse => StatusCode::CONFLICT,
            ErrorKind::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::RequestUriTooLong => StatusCode::URI_TOO_LONG,
            _ => return None,
        })
    }
}

/// Kind for a server-side error type, if it has a dedicated one.
pub fn fault_kind(error_type: &str) -> Option<ErrorKind> {
    FAULT_TYPES
        .iter()
        .find(|(name, _)| *name == error_type)
        .map(|(_, kind)| *kind)
}

/// Kind for an HTTP status code, if it has a dedicated one.
pub fn status_kind(status: StatusCode) -> Option<ErrorKind> {
    match status {
        StatusCode::BAD_REQUEST => Some(ErrorKind::BadRequest),
        StatusCode::UNAUTHORIZED => Some(ErrorKind::Unauthorized),
        StatusCode::FORBIDDEN => Some(ErrorKind::Forbidden),
        StatusCode::NOT_FOUND => Some(ErrorKind::NotFound),
        StatusCode::CONFLICT => Some(ErrorKind::Conflict),
        StatusCode::INTERNAL_SERVER_ERROR => Some(ErrorKind::InternalServerError),
        StatusCode::SERVICE_UNAVAILABLE => Some(ErrorKind::ServiceUnavailable),
        _ => None,
    }
}

/// Convert an HTTP fault into an error.
///
/// `body` is the deserialized error body or, if it was not JSON, a string.
pub fn from_fault(status: StatusCode, body: &Value) -> Error {
    if let Some(fault) = body.get("TackerError").filter(|f| is_truthy(f)) {
        let parts = (
            fault.get("type").and_then(Value::as_str),
            fault.get("message").and_then(Value::as_str),
            fault.get("detail"),
        );
        return match parts {
            (Some(error_type), Some(message), Some(detail)) => {
                let mut message = message.to_string();
                match detail {
                    Value::String(s) if !s.is_empty() => {
                        message.push('\n');
                        message.push_str(s);
                    }
                    Value::String(_) | Value::Null => {}
                    other => {
                        message.push('\n');
                        message.push_str(&other.to_string());
                    }
                }
                let kind = fault_kind(error_type)
                    .or_else(|| status_kind(status))
                    .unwrap_or(ErrorKind::ClientException);
                Error::new_with_details(kind, Some(status), Some(message))
            }
            _ => Error::new_with_details(
                ErrorKind::ClientException,
                Some(status),
                Some(fault.to_string()),
            ),
        };
    }

    if let Some(message) = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
    {
        return Error::new_with_details(
            ErrorKind::ClientException,
            Some(status),
            Some(message.to_string()),
        );
    }

    let rendered = match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Error::new_with_details(
        ErrorKind::ClientException,
        Some(status),
        Some(format!("{}-{}", status.as_u16(), rendered)),
    )
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref msg) = self.message {
            write!(f, "{}", msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.source {
            Some(ref source) => {
                let source: &(dyn StdError + 'static) = source.as_ref();
                Some(source)
            }
            None => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Error {
        let msg = value.to_string();
        let status = value.status();
        let kind = match status {
            Some(code) => status_kind(code).unwrap_or(ErrorKind::ClientException),
            None if value.is_decode() => ErrorKind::MalformedResponseBody,
            None if value.is_builder() => ErrorKind::InvalidInput,
            None => ErrorKind::ConnectionFailed,
        };

        Error::new_with_details(kind, status, Some(msg)).with_source(value)
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Error {
        Error::new(ErrorKind::InvalidInput, value.to_string()).with_source(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Error {
        Error::new(ErrorKind::InvalidInput, value.to_string()).with_source(value)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Error {
        Error::new(ErrorKind::InvalidConfig, value.to_string()).with_source(value)
    }
}

#[cfg(test)]
pub mod test {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::{fault_kind, from_fault, Error, ErrorKind};

    #[test]
    fn test_status_table() {
        let table = [
            (400, ErrorKind::BadRequest),
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (500, ErrorKind::InternalServerError),
            (503, ErrorKind::ServiceUnavailable),
        ];
        for (code, kind) in table {
            let status = StatusCode::from_u16(code).unwrap();
            let body = json!({
                "TackerError": {
                    "type": "SomethingWeird",
                    "message": "it broke",
                    "detail": ""
                }
            });
            let err = from_fault(status, &body);
            assert_eq!(err.kind(), kind);
            assert_eq!(err.status_code(), Some(code));
            assert_eq!(err.message(), Some("it broke"));
        }
    }

    #[test]
    fn test_registered_type_wins() {
        let body = json!({
            "TackerError": {
                "type": "PortInUse",
                "message": "port p1 is busy",
                "detail": ""
            }
        });
        let err = from_fault(StatusCode::BAD_REQUEST, &body);
        assert_eq!(err.kind(), ErrorKind::PortInUse);
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_detail_appended() {
        let body = json!({
            "TackerError": {
                "type": "VnfNotFound",
                "message": "VNF abc could not be found",
                "detail": "check the ID"
            }
        });
        let err = from_fault(StatusCode::NOT_FOUND, &body);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.message(),
            Some("VNF abc could not be found\ncheck the ID")
        );
    }

    #[test]
    fn test_unknown_status_generic() {
        let body = json!({
            "TackerError": {
                "type": "Teapot",
                "message": "short and stout",
                "detail": ""
            }
        });
        let err = from_fault(StatusCode::IM_A_TEAPOT, &body);
        assert_eq!(err.kind(), ErrorKind::ClientException);
        assert_eq!(err.status_code(), Some(418));
        assert_eq!(err.to_string(), "short and stout");
    }

    #[test]
    fn test_incomplete_tacker_error() {
        let body = json!({"TackerError": {"message": "no type here"}});
        let err = from_fault(StatusCode::NOT_FOUND, &body);
        assert_eq!(err.kind(), ErrorKind::ClientException);
        assert!(err.message().unwrap().contains("no type here"));
    }

    #[test]
    fn test_flat_message() {
        let body = json!({"message": "Something went wrong"});
        let err = from_fault(StatusCode::NOT_FOUND, &body);
        assert_eq!(err.kind(), ErrorKind::ClientException);
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.message(), Some("Something went wrong"));
    }

    #[test]
    fn test_opaque_body() {
        let err = from_fault(StatusCode::BAD_GATEWAY, &json!("Bad Gateway"));
        assert_eq!(err.kind(), ErrorKind::ClientException);
        assert_eq!(err.message(), Some("502-Bad Gateway"));

        let err = from_fault(StatusCode::BAD_REQUEST, &json!({"foo": "bar"}));
        assert_eq!(err.message(), Some(r#"400-{"foo":"bar"}"#));
    }

    #[test]
    fn test_fault_kind_registry() {
        assert_eq!(fault_kind("OverQuota"), Some(ErrorKind::OverQuota));
        assert_eq!(fault_kind("OverQuotaClient"), None);
        assert_eq!(fault_kind("NoSuchThing"), None);
        assert_eq!(
            ErrorKind::MacAddressInUse.default_status(),
            Some(StatusCode::CONFLICT)
        );
    }

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::InvalidInput, "bad value");
        assert_eq!(err.to_string(), "bad value");
        let err = Error::new_with_details(ErrorKind::Forbidden, None, None);
        assert_eq!(err.to_string(), "Access to the resource is denied");
    }
}
