// Copyright 2019 Dmitry Tantsur <divius.inside@gmail.com>
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

//! Password authentication.

use static_assertions::assert_impl_all;

use super::keystone::Keystone;
use super::protocol::{Identity, UserAndPassword};
use super::{keystone_auth_type, IdOrName};
use crate::Result;

/// Password authentication using Identity API v3.
///
/// This is what `tacker --os-username ... --os-password ...` uses. Besides
/// the `auth_url` of Keystone it needs the user with its domain and,
/// usually, a project to scope the token to.
///
/// ```rust,no_run
/// use tackerclient::identity::{IdOrName, Password};
/// let auth = Password::new(
///     "https://cloud.local/identity",
///     IdOrName::Name("nfv_user".into()),
///     "devstack",
///     IdOrName::Name("Default".into()),
/// )
/// .expect("Invalid auth_url")
/// .with_project_scope(IdOrName::Name("nfv".into()), IdOrName::Name("Default".into()));
///
/// let session = tackerclient::Session::new(auth);
/// ```
///
/// The token is cached while it is valid. A 401 from Tacker makes the
/// session request a new one.
#[derive(Debug, Clone)]
pub struct Password {
    keystone: Keystone,
}

assert_impl_all!(Password: Send, Sync);

impl Password {
    /// Create a password authentication.
    pub fn new<U, S>(
        auth_url: U,
        user: IdOrName,
        password: S,
        user_domain: impl Into<Option<IdOrName>>,
    ) -> Result<Password>
    where
        U: AsRef<str>,
        S: Into<String>,
    {
        let credentials = UserAndPassword {
            user,
            password: password.into(),
            domain: user_domain.into(),
        };
        Ok(Password {
            keystone: Keystone::new(auth_url.as_ref(), Identity::Password(credentials))?,
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
    ) -> Password {
        self.set_project_scope(project, domain);
        self
    }

    /// User name or ID.
    #[inline]
    pub fn user(&self) -> Option<&IdOrName> {
        self.keystone.user()
    }

    /// Project name or ID (if project scoped).
    #[inline]
    pub fn project(&self) -> Option<&IdOrName> {
        self.keystone.project()
    }
}

keystone_auth_type!(Password);

#[cfg(test)]
pub mod test {
    use super::Password;
    use crate::auth::AuthType;
    use crate::identity::IdOrName;

    fn password(auth_url: &str) -> Password {
        Password::new(
            auth_url,
            IdOrName::Name("nfv_user".into()),
            "devstack",
            IdOrName::Name("Default".into()),
        )
        .unwrap()
        .with_project_scope(IdOrName::Name("nfv".into()), IdOrName::Name("Default".into()))
    }

    #[test]
    fn test_password_new() {
        let auth = password("http://127.0.0.1:5000/");
        assert_eq!(
            auth.keystone.tokens_url().as_str(),
            "http://127.0.0.1:5000/v3/auth/tokens"
        );
        assert_eq!(auth.user(), Some(&IdOrName::Name("nfv_user".into())));
        assert_eq!(auth.project(), Some(&IdOrName::Name("nfv".into())));
        assert!(auth.renewable());
    }

    #[test]
    fn test_tokens_url_variants() {
        for auth_url in &[
            "http://10.0.0.1/identity",
            "http://10.0.0.1/identity/",
            "http://10.0.0.1/identity/v3",
            "http://10.0.0.1/identity/v3/",
        ] {
            assert_eq!(
                password(auth_url).keystone.tokens_url().as_str(),
                "http://10.0.0.1/identity/v3/auth/tokens"
            );
        }
    }

    #[test]
    fn test_password_invalid_url() {
        Password::new(
            "http://127.0.0.1 5000/",
            IdOrName::Name("admin".into()),
            "devstack",
            None,
        )
        .err()
        .unwrap();
    }
}
