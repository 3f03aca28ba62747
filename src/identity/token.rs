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

//! Token authentication.

use static_assertions::assert_impl_all;

use super::keystone::Keystone;
use super::protocol::Identity;
use super::{keystone_auth_type, IdOrName};
use crate::Result;

/// Token authentication using Identity API v3.
///
/// Exchanges an existing token (`OS_TOKEN` together with `OS_AUTH_URL`) for
/// a project-scoped one that carries the service catalog. To skip Keystone
/// entirely, use [NoAuth](../auth/struct.NoAuth.html) with a token instead.
///
/// ```rust,no_run
/// use tackerclient::identity::{IdOrName, Token};
/// let auth = Token::new("https://cloud.local/identity", "gAAAA...")
///     .expect("Invalid auth_url")
///     .with_project_scope(IdOrName::Id("4f5c1f5e".into()), None);
///
/// let session = tackerclient::Session::new(auth);
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    keystone: Keystone,
}

assert_impl_all!(Token: Send, Sync);

impl Token {
    /// Create a token authentication.
    pub fn new<U, S>(auth_url: U, token: S) -> Result<Token>
    where
        U: AsRef<str>,
        S: Into<String>,
    {
        Ok(Token {
            keystone: Keystone::new(auth_url.as_ref(), Identity::Token(token.into()))?,
        })
    }

    /// Scope authentication to the given project.
    pub fn set_project_scope(&mut self, project: IdOrName, domain: impl Into<Option<IdOrName>>) {
        self.keystone.scope_to_project(project, domain.into());
    }

    /// Scope authentication to the given project (builder style).
    #[inline]
    pub fn with_project_scope(
        mut self,
        project: IdOrName,
        domain: impl Into<Option<IdOrName>>,
    ) -> Token {
        self.set_project_scope(project, domain);
        self
    }

    /// Project name or ID (if project scoped).
    #[inline]
    pub fn project(&self) -> Option<&IdOrName> {
        self.keystone.project()
    }
}

keystone_auth_type!(Token);
