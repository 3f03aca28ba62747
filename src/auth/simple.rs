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

//! Simple authentication methods.

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, RequestBuilder, Url};

use super::{AuthType, EndpointFilters};
use crate::Result;

/// Authentication method that bypasses the Identity service.
///
/// Always returns a pre-defined endpoint. If a token is provided, it is sent
/// with every request (this is the `--os-token` + `--os-url` mode).
#[derive(Clone, Debug)]
pub struct NoAuth {
    endpoint: Url,
    token: Option<String>,
}

impl NoAuth {
    /// Create a new fake authentication method using a fixed endpoint.
    pub fn new<U>(endpoint: U) -> Result<NoAuth>
    where
        U: IntoUrl,
    {
        Ok(NoAuth {
            endpoint: endpoint.into_url()?,
            token: None,
        })
    }

    /// Send a pre-issued token with every request.
    pub fn with_token<S: Into<String>>(mut self, token: S) -> NoAuth {
        self.token = Some(token.into());
        self
    }
}

#[async_trait]
impl AuthType for NoAuth {
    async fn authenticate(
        &self,
        _client: &Client,
        request: RequestBuilder,
    ) -> Result<RequestBuilder> {
        Ok(match self.token {
            Some(ref token) => request.header("x-auth-token", token),
            None => request,
        })
    }

    /// Get a predefined endpoint for all service types
    async fn get_endpoint(
        &self,
        _client: &Client,
        _service_type: &str,
        _filters: &EndpointFilters,
    ) -> Result<Url> {
        Ok(self.endpoint.clone())
    }

    async fn refresh(&self, _client: &Client) -> Result<()> {
        Ok(())
    }
}
