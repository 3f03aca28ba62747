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

//! Base code for authentication.

use std::fmt::{self, Debug};
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};

use crate::{Error, ErrorKind, Result};

/// Endpoint interface type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum InterfaceType {
    /// Public interface (used by default).
    #[default]
    Public,
    /// Internal interface.
    Internal,
    /// Administrator interface.
    Admin,
}

/// Filters for picking an endpoint from the service catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointFilters {
    /// Acceptable interfaces, in the order of preference.
    pub interfaces: Vec<InterfaceType>,
    /// Region (if any).
    pub region: Option<String>,
}

/// Trait for an authentication type.
///
/// An authentication type decorates every request and knows where services
/// live. One call of `authenticate` is made per physical HTTP request.
#[async_trait]
pub trait AuthType: Debug + Sync + Send {
    /// Authenticate a request.
    async fn authenticate(&self, client: &Client, request: RequestBuilder)
        -> Result<RequestBuilder>;

    /// Get a URL for the requested service.
    async fn get_endpoint(
        &self,
        client: &Client,
        service_type: &str,
        filters: &EndpointFilters,
    ) -> Result<Url>;

    /// Refresh the authentication (renew the token, etc).
    async fn refresh(&self, client: &Client) -> Result<()>;

    /// Whether `refresh` can produce a new token.
    ///
    /// If true, a request rejected with 401 is repeated once after a refresh.
    fn renewable(&self) -> bool {
        false
    }
}

impl InterfaceType {
    /// Name of the interface as used in the service catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceType::Public => "public",
            InterfaceType::Internal => "internal",
            InterfaceType::Admin => "admin",
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterfaceType {
    type Err = Error;

    /// Parse an interface, accepting the legacy `publicURL` spelling.
    fn from_str(s: &str) -> Result<InterfaceType> {
        let lower = s.to_lowercase();
        match lower.strip_suffix("url").unwrap_or(&lower) {
            "public" => Ok(InterfaceType::Public),
            "internal" => Ok(InterfaceType::Internal),
            "admin" => Ok(InterfaceType::Admin),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid endpoint interface: {}", s),
            )),
        }
    }
}

impl PartialEq<str> for InterfaceType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<String> for InterfaceType {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

impl Default for EndpointFilters {
    fn default() -> EndpointFilters {
        EndpointFilters {
            interfaces: vec![InterfaceType::Public],
            region: None,
        }
    }
}

impl EndpointFilters {
    /// Filters with a single interface and an optional region.
    pub fn new(interface: InterfaceType, region: Option<String>) -> EndpointFilters {
        EndpointFilters {
            interfaces: vec![interface],
            region,
        }
    }

    /// Position of the interface in the preference list.
    pub fn interface_rank(&self, interface: &str) -> Option<usize> {
        self.interfaces.iter().position(|item| item == interface)
    }

    /// Whether the region matches.
    pub fn region_matches(&self, region: Option<&str>) -> bool {
        match (self.region.as_deref(), region) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted == actual,
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::{EndpointFilters, InterfaceType};

    #[test]
    fn test_interface_from_str() {
        assert_eq!(
            "public".parse::<InterfaceType>().unwrap(),
            InterfaceType::Public
        );
        assert_eq!(
            "publicURL".parse::<InterfaceType>().unwrap(),
            InterfaceType::Public
        );
        assert_eq!(
            "internalURL".parse::<InterfaceType>().unwrap(),
            InterfaceType::Internal
        );
        assert_eq!(
            "Admin".parse::<InterfaceType>().unwrap(),
            InterfaceType::Admin
        );
        "private".parse::<InterfaceType>().err().unwrap();
    }

    #[test]
    fn test_filters() {
        let filters = EndpointFilters::new(InterfaceType::Internal, Some("RegionOne".into()));
        assert_eq!(filters.interface_rank("internal"), Some(0));
        assert_eq!(filters.interface_rank("public"), None);
        assert!(filters.region_matches(Some("RegionOne")));
        assert!(!filters.region_matches(Some("RegionTwo")));
        assert!(!filters.region_matches(None));
        assert!(EndpointFilters::default().region_matches(None));
    }
}
