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

//! Keystone token issuing and caching shared by the identity methods.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use reqwest::{Client, RequestBuilder, Response, Url};
use tokio::sync::RwLock;

use super::catalog::ServiceCatalog;
use super::protocol::{AuthRoot, Identity, Project, Scope, TokenRoot};
use super::IdOrName;
use crate::auth::EndpointFilters;
use crate::common::protocol::deserialize_fault;
use crate::error::from_fault;
use crate::utils;
use crate::{Error, ErrorKind, Result};

/// Header carrying the issued token in Keystone responses.
const SUBJECT_TOKEN: &str = "x-subject-token";

/// A token is renewed once it has less than this many minutes left.
const EXPIRY_MARGIN_MINUTES: i64 = 10;

/// A token issued by Keystone together with its service catalog.
#[derive(Clone)]
struct IssuedToken {
    value: String,
    expires_at: DateTime<FixedOffset>,
    catalog: ServiceCatalog,
}

impl IssuedToken {
    fn is_fresh(&self) -> bool {
        let left = self.expires_at.signed_duration_since(Utc::now());
        trace!("Cached token expires in {}", left);
        left > Duration::minutes(EXPIRY_MARGIN_MINUTES)
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("catalog", &self.catalog)
            .finish()
    }
}

/// Issues tokens from the Keystone v3 API and keeps the last one.
#[derive(Debug)]
pub(crate) struct Keystone {
    request: AuthRoot,
    tokens_url: Url,
    issued: RwLock<Option<IssuedToken>>,
}

impl Keystone {
    /// Prepare authentication against `auth_url` with an identity method.
    ///
    /// `auth_url` may point either at the Identity root or at its `v3`
    /// version endpoint.
    pub fn new(auth_url: &str, identity: Identity) -> Result<Keystone> {
        let base = Url::parse(auth_url).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Invalid authentication URL {}: {}", auth_url, e),
            )
            .with_source(e)
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("Authentication URL {} cannot have a path", auth_url),
            ));
        }

        let has_version = base
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            == Some("v3");
        let tokens_url = if has_version {
            utils::extend_url(base, &["auth", "tokens"])
        } else {
            utils::extend_url(base, &["v3", "auth", "tokens"])
        };

        Ok(Keystone {
            request: AuthRoot {
                auth: super::protocol::Auth {
                    identity,
                    scope: None,
                },
            },
            tokens_url,
            issued: RwLock::new(None),
        })
    }

    /// Scope future tokens to a project.
    pub fn scope_to_project(&mut self, project: IdOrName, domain: Option<IdOrName>) {
        self.request.auth.scope = Some(Scope::Project(Project { project, domain }));
        // A token issued for another scope must not be reused.
        self.issued = RwLock::new(None);
    }

    /// User of password authentication.
    pub fn user(&self) -> Option<&IdOrName> {
        match self.request.auth.identity {
            Identity::Password(ref credentials) => Some(&credentials.user),
            Identity::Token(_) => None,
        }
    }

    /// Project the tokens are scoped to.
    pub fn project(&self) -> Option<&IdOrName> {
        match self.request.auth.scope {
            Some(Scope::Project(ref scope)) => Some(&scope.project),
            None => None,
        }
    }

    #[cfg(test)]
    pub fn tokens_url(&self) -> &Url {
        &self.tokens_url
    }

    /// Add the current token to a request.
    pub async fn authenticate(
        &self,
        client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        let token = self.current(client).await?;
        Ok(request.header("x-auth-token", token.value))
    }

    /// Look up a service in the catalog of the current token.
    pub async fn endpoint(
        &self,
        client: &Client,
        service_type: &str,
        filters: &EndpointFilters,
    ) -> Result<Url> {
        debug!(
            "Looking up service {} in the catalog with {:?}",
            service_type, filters
        );
        self.current(client)
            .await?
            .catalog
            .find_endpoint(service_type, filters)
    }

    /// Issue a new token, replacing the cached one.
    pub async fn renew(&self, client: &Client) -> Result<()> {
        let mut slot = self.issued.write().await;
        *slot = Some(self.issue(client).await?);
        Ok(())
    }

    /// A fresh token, issuing one if the cache is empty or about to expire.
    async fn current(&self, client: &Client) -> Result<IssuedToken> {
        if let Some(token) = self.issued.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.clone());
        }

        let mut slot = self.issued.write().await;
        // Another task may have renewed the token while we waited.
        if let Some(token) = slot.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.clone());
        }
        let token = self.issue(client).await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    async fn issue(&self, client: &Client) -> Result<IssuedToken> {
        debug!("Requesting a new token from {}", self.tokens_url);
        let resp = client
            .post(self.tokens_url.clone())
            .json(&self.request)
            .send()
            .await
            .map_err(|e| {
                Error::new(
                    ErrorKind::ConnectionFailed,
                    format!("Cannot reach the Identity service: {}", e),
                )
                .with_source(e)
            })?;
        let resp = check_status(resp).await?;

        let value = resp
            .headers()
            .get(SUBJECT_TOKEN)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidResponse,
                    "Missing X-Subject-Token header",
                )
            })?
            .to_str()
            .map_err(|_| {
                Error::new(
                    ErrorKind::InvalidResponse,
                    "Invalid X-Subject-Token header",
                )
            })?
            .to_string();

        let root = resp.json::<TokenRoot>().await?;
        debug!("Received a token expiring at {}", root.token.expires_at);
        trace!("Received catalog {:?}", root.token.catalog);
        Ok(IssuedToken {
            value,
            expires_at: root.token.expires_at,
            catalog: ServiceCatalog::new(root.token.catalog),
        })
    }
}

impl Clone for Keystone {
    /// Clones start with an empty token cache.
    fn clone(&self) -> Keystone {
        Keystone {
            request: self.request.clone(),
            tokens_url: self.tokens_url.clone(),
            issued: RwLock::new(None),
        }
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    error!("Identity service returned {}: {}", status, text);
    Err(from_fault(status, &deserialize_fault(&text)))
}
