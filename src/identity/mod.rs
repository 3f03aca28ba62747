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

//! Keystone authentication for Tacker.
//!
//! Supports [Password](struct.Password.html) and [Token](struct.Token.html)
//! methods of Identity API v3. Tokens are cached until they are about to
//! expire, and the Tacker endpoint is taken from the catalog of the token
//! (service type `nfv-orchestration`).

mod catalog;
mod keystone;
mod password;
pub(crate) mod protocol;
mod token;

pub use self::password::Password;
pub use self::token::Token;

/// An ID or a name of an Identity object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdOrName {
    /// Resource ID.
    Id(String),
    /// Resource name.
    Name(String),
}

/// Implements `AuthType` for a wrapper around `Keystone`.
macro_rules! keystone_auth_type {
    ($name:ident) => {
        #[async_trait::async_trait]
        impl $crate::auth::AuthType for $name {
            async fn authenticate(
                &self,
                client: &reqwest::Client,
                request: reqwest::RequestBuilder,
            ) -> $crate::Result<reqwest::RequestBuilder> {
                self.keystone.authenticate(client, request).await
            }

            async fn get_endpoint(
                &self,
                client: &reqwest::Client,
                service_type: &str,
                filters: &$crate::auth::EndpointFilters,
            ) -> $crate::Result<reqwest::Url> {
                self.keystone.endpoint(client, service_type, filters).await
            }

            async fn refresh(&self, client: &reqwest::Client) -> $crate::Result<()> {
                self.keystone.renew(client).await
            }

            fn renewable(&self) -> bool {
                true
            }
        }
    };
}

pub(crate) use keystone_auth_type;
