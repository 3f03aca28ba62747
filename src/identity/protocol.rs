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

//! JSON structures and protocol bits for the Identity V3 API.

#![allow(missing_docs)]

use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::IdOrName;

#[derive(Clone, Debug, Serialize)]
pub struct UserAndPassword {
    #[serde(flatten)]
    pub user: IdOrName,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<IdOrName>,
}

#[derive(Clone, Debug)]
pub enum Identity {
    Password(UserAndPassword),
    Token(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct Project {
    #[serde(flatten)]
    pub project: IdOrName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<IdOrName>,
}

#[derive(Clone, Debug, Serialize)]
pub enum Scope {
    #[serde(rename = "project")]
    Project(Project),
}

#[derive(Clone, Debug, Serialize)]
pub struct Auth {
    pub identity: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AuthRoot {
    pub auth: Auth,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Endpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "type")]
    pub service_type: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Token {
    pub expires_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub catalog: Vec<CatalogRecord>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenRoot {
    pub token: Token,
}

#[derive(Serialize)]
struct TokenId<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct PasswordUser<'a> {
    user: &'a UserAndPassword,
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Identity::Password(user) => {
                map.serialize_entry("methods", &["password"])?;
                map.serialize_entry("password", &PasswordUser { user })?;
            }
            Identity::Token(token) => {
                map.serialize_entry("methods", &["token"])?;
                map.serialize_entry("token", &TokenId { id: token })?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
pub mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_password_body() {
        let body = AuthRoot {
            auth: Auth {
                identity: Identity::Password(UserAndPassword {
                    user: IdOrName::Name("admin".into()),
                    password: "pa$$w0rd".into(),
                    domain: Some(IdOrName::Name("Default".into())),
                }),
                scope: Some(Scope::Project(Project {
                    project: IdOrName::Name("nfv".into()),
                    domain: Some(IdOrName::Id("default".into())),
                })),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "auth": {
                    "identity": {
                        "methods": ["password"],
                        "password": {
                            "user": {
                                "name": "admin",
                                "password": "pa$$w0rd",
                                "domain": {"name": "Default"}
                            }
                        }
                    },
                    "scope": {
                        "project": {"name": "nfv", "domain": {"id": "default"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_token_body() {
        let body = AuthRoot {
            auth: Auth {
                identity: Identity::Token("abcd".into()),
                scope: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "auth": {
                    "identity": {"methods": ["token"], "token": {"id": "abcd"}}
                }
            })
        );
    }
}
