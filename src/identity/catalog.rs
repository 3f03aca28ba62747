// Copyright 2021 Dmitry Tantsur <dtantsur@protonmail.com>
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

//! Service catalog returned with a Keystone token.

use reqwest::Url;

use super::protocol::{CatalogRecord, Endpoint};
use crate::auth::EndpointFilters;
use crate::{Error, ErrorKind, Result};

/// Services and their endpoints as known to the Identity service.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    records: Vec<CatalogRecord>,
}

impl ServiceCatalog {
    pub(crate) fn new(records: Vec<CatalogRecord>) -> ServiceCatalog {
        ServiceCatalog { records }
    }

    /// Endpoints registered for a service type (empty if it is unknown).
    fn endpoints_of<'c>(&'c self, service_type: &'c str) -> impl Iterator<Item = &'c Endpoint> {
        self.records
            .iter()
            .filter(move |record| record.service_type == service_type)
            .flat_map(|record| record.endpoints.iter())
    }

    /// Pick the endpoint of a service matching the filters.
    ///
    /// The region must match if one is requested. Among the rest, the
    /// interface that comes first in `filters.interfaces` is chosen.
    pub fn find_endpoint(&self, service_type: &str, filters: &EndpointFilters) -> Result<Url> {
        let mut best: Option<(usize, &Endpoint)> = None;
        for candidate in self.endpoints_of(service_type) {
            if !filters.region_matches(candidate.region.as_deref()) {
                continue;
            }
            if let Some(rank) = filters.interface_rank(&candidate.interface) {
                if best.map_or(true, |(current, _)| rank < current) {
                    best = Some((rank, candidate));
                }
            }
        }

        let (_, chosen) = best.ok_or_else(|| {
            warn!(
                "No {} endpoint matches {:?} in the service catalog",
                service_type, filters
            );
            Error::new_endpoint_not_found(service_type)
        })?;
        debug!("Using {} endpoint {}", service_type, chosen.url);
        Url::parse(&chosen.url).map_err(|e| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!(
                    "Service catalog contains an invalid {} URL {}: {}",
                    service_type, chosen.url, e
                ),
            )
            .with_source(e)
        })
    }
}
