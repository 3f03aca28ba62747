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

//! Cloud configuration from `clouds.yaml` or environment variables.
//!
//! A [CloudConfig](struct.CloudConfig.html) describes how to reach Tacker:
//! credentials, endpoint selection, TLS and retry options. It is converted
//! into a [Session](../struct.Session.html) with
//! [into_session](struct.CloudConfig.html#method.into_session).

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, Client, Url};

use crate::auth::{AuthType, InterfaceType, NoAuth};
use crate::identity::{IdOrName, Password, Token};
use crate::session::Session;
use crate::{Error, ErrorKind, Result};

const DEFAULT_DOMAIN: &str = "Default";

/// Credentials part of a cloud configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthConfig {
    /// Keystone URL.
    #[serde(default)]
    pub auth_url: Option<String>,
    /// User name.
    #[serde(default)]
    pub username: Option<String>,
    /// User ID.
    #[serde(default)]
    pub user_id: Option<String>,
    /// User password.
    #[serde(default)]
    pub password: Option<String>,
    /// Project name.
    #[serde(default, alias = "tenant_name")]
    pub project_name: Option<String>,
    /// Project ID.
    #[serde(default, alias = "tenant_id")]
    pub project_id: Option<String>,
    /// Domain name of the user.
    #[serde(default)]
    pub user_domain_name: Option<String>,
    /// Domain ID of the user.
    #[serde(default)]
    pub user_domain_id: Option<String>,
    /// Domain name of the project.
    #[serde(default)]
    pub project_domain_name: Option<String>,
    /// Domain ID of the project.
    #[serde(default)]
    pub project_domain_id: Option<String>,
    /// Pre-issued token.
    #[serde(default)]
    pub token: Option<String>,
}

/// Configuration of one cloud.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CloudConfig {
    /// Credentials.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Authentication type: `password`, `token` or `none`.
    ///
    /// Guessed from the credentials if missing.
    #[serde(default)]
    pub auth_type: Option<String>,
    /// Tacker endpoint, bypassing the service catalog.
    #[serde(
        default,
        alias = "nfv_orchestration_endpoint_override",
        alias = "nfv-orchestration_endpoint_override"
    )]
    pub endpoint_override: Option<String>,
    /// Region name.
    #[serde(default)]
    pub region_name: Option<String>,
    /// Endpoint interface (`public`, `internal`, `admin`).
    #[serde(default, alias = "endpoint_type")]
    pub interface: Option<String>,
    /// Path to a CA certificate bundle.
    #[serde(default)]
    pub cacert: Option<String>,
    /// Whether to verify TLS certificates.
    #[serde(default)]
    pub verify: Option<bool>,
    /// Number of retries for idempotent requests.
    #[serde(default)]
    pub retries: Option<u32>,
    /// Interval between retries in seconds.
    #[serde(default)]
    pub retry_interval: Option<f64>,
    /// Request timeout in seconds.
    #[serde(default, alias = "api_timeout")]
    pub timeout: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Root {
    clouds: HashMap<String, CloudConfig>,
}

fn find_config() -> Option<PathBuf> {
    let current = Path::new("./clouds.yaml");
    if current.is_file() {
        match current.canonicalize() {
            Ok(val) => return Some(val),
            Err(e) => warn!("Cannot canonicalize {:?}: {}", current, e),
        }
    }

    if let Some(mut home) = dirs::home_dir() {
        home.push(".config/openstack/clouds.yaml");
        if home.is_file() {
            return Some(home);
        }
    } else {
        warn!("Cannot find home directory");
    }

    let abs = PathBuf::from("/etc/openstack/clouds.yaml");
    if abs.is_file() {
        Some(abs)
    } else {
        None
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn seconds(what: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Invalid {} value {}: {}", what, value, e),
        )
    })
}

fn overlay<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

impl CloudConfig {
    /// Load a named cloud from the first `clouds.yaml` found.
    ///
    /// The file is searched in the current directory,
    /// `~/.config/openstack` and `/etc/openstack`.
    pub fn from_clouds_yaml<S: AsRef<str>>(cloud_name: S) -> Result<CloudConfig> {
        let path = find_config().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                "clouds.yaml was not found in any location",
            )
        })?;
        CloudConfig::from_file(path, cloud_name)
    }

    /// Load a named cloud from the given file.
    pub fn from_file<P, S>(path: P, cloud_name: S) -> Result<CloudConfig>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        debug!("Loading cloud configuration from {:?}", path);
        let file = File::open(path).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot read {:?}: {}", path, e),
            )
            .with_source(e)
        })?;
        let root: Root = serde_yaml::from_reader(file).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot parse {:?}: {}", path, e),
            )
            .with_source(e)
        })?;
        CloudConfig::from_root(root, cloud_name.as_ref())
    }

    /// Load a named cloud from a YAML document in the `clouds.yaml` format.
    pub fn from_yaml_str<S: AsRef<str>>(yaml: &str, cloud_name: S) -> Result<CloudConfig> {
        let root: Root = serde_yaml::from_str(yaml)?;
        CloudConfig::from_root(root, cloud_name.as_ref())
    }

    fn from_root(mut root: Root, name: &str) -> Result<CloudConfig> {
        root.clouds.remove(name).ok_or_else(|| {
            Error::new(ErrorKind::InvalidConfig, format!("No such cloud: {}", name))
        })
    }

    /// Create a configuration from the `OS_*` environment variables.
    ///
    /// `OS_CLOUD` selects a cloud from `clouds.yaml`, then the other
    /// variables override its values.
    pub fn from_env() -> Result<CloudConfig> {
        let config = CloudConfig::from_vars(|name| std::env::var(name).ok());
        match std::env::var("OS_CLOUD") {
            Ok(cloud) if !cloud.is_empty() => {
                Ok(CloudConfig::from_clouds_yaml(cloud)?.overlay(config))
            }
            _ => Ok(config),
        }
    }

    /// Create a configuration from `OS_*` variables provided by a lookup
    /// function.
    ///
    /// Unset and empty variables are ignored.
    pub fn from_vars<F>(lookup: F) -> CloudConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.is_empty())
        };

        CloudConfig {
            auth: AuthConfig {
                auth_url: get(&["OS_AUTH_URL"]),
                username: get(&["OS_USERNAME"]),
                user_id: get(&["OS_USER_ID"]),
                password: get(&["OS_PASSWORD"]),
                project_name: get(&["OS_PROJECT_NAME", "OS_TENANT_NAME"]),
                project_id: get(&["OS_PROJECT_ID", "OS_TENANT_ID"]),
                user_domain_name: get(&["OS_USER_DOMAIN_NAME"]),
                user_domain_id: get(&["OS_USER_DOMAIN_ID"]),
                project_domain_name: get(&["OS_PROJECT_DOMAIN_NAME"]),
                project_domain_id: get(&["OS_PROJECT_DOMAIN_ID"]),
                token: get(&["OS_TOKEN", "OS_AUTH_TOKEN"]),
            },
            auth_type: get(&["OS_AUTH_TYPE"]),
            endpoint_override: get(&["OS_URL"]),
            region_name: get(&["OS_REGION_NAME"]),
            interface: get(&["OS_INTERFACE", "OS_ENDPOINT_TYPE"]),
            cacert: get(&["OS_CACERT"]),
            verify: get(&["OS_INSECURE"]).map(|value| !truthy(&value)),
            retries: None,
            retry_interval: None,
            timeout: None,
        }
    }

    /// Override values in this configuration with the ones set in `other`.
    pub fn overlay(mut self, other: CloudConfig) -> CloudConfig {
        let auth = &mut self.auth;
        overlay(&mut auth.auth_url, other.auth.auth_url);
        overlay(&mut auth.username, other.auth.username);
        overlay(&mut auth.user_id, other.auth.user_id);
        overlay(&mut auth.password, other.auth.password);
        overlay(&mut auth.project_name, other.auth.project_name);
        overlay(&mut auth.project_id, other.auth.project_id);
        overlay(&mut auth.user_domain_name, other.auth.user_domain_name);
        overlay(&mut auth.user_domain_id, other.auth.user_domain_id);
        overlay(&mut auth.project_domain_name, other.auth.project_domain_name);
        overlay(&mut auth.project_domain_id, other.auth.project_domain_id);
        overlay(&mut auth.token, other.auth.token);
        overlay(&mut self.auth_type, other.auth_type);
        overlay(&mut self.endpoint_override, other.endpoint_override);
        overlay(&mut self.region_name, other.region_name);
        overlay(&mut self.interface, other.interface);
        overlay(&mut self.cacert, other.cacert);
        overlay(&mut self.verify, other.verify);
        overlay(&mut self.retries, other.retries);
        overlay(&mut self.retry_interval, other.retry_interval);
        overlay(&mut self.timeout, other.timeout);
        self
    }

    /// Whether TLS verification is disabled.
    #[inline]
    pub fn insecure(&self) -> bool {
        self.verify == Some(false)
    }

    /// Normalized authentication type.
    ///
    /// Returns `none`, `token` or `password`.
    pub fn effective_auth_type(&self) -> Result<&'static str> {
        match self.auth_type.as_deref().map(str::to_lowercase).as_deref() {
            Some("none") | Some("noauth") | Some("admin_token") => Ok("none"),
            Some("token") | Some("v3token") => Ok("token"),
            Some("password") | Some("v3password") => Ok("password"),
            Some(other) => Err(Error::new(
                ErrorKind::InvalidConfig,
                format!("Unsupported authentication type {}", other),
            )),
            None if self.auth.auth_url.is_none() && self.endpoint_override.is_some() => {
                Ok("none")
            }
            None if self.auth.token.is_some() && self.auth.password.is_none() => Ok("token"),
            None => Ok("password"),
        }
    }

    /// Build the HTTP client with the TLS options of this configuration.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(ref path) = self.cacert {
            let pem = std::fs::read(path).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidConfig,
                    format!("Cannot read CA certificate {}: {}", path, e),
                )
                .with_source(e)
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidConfig,
                    format!("Invalid CA certificate {}: {}", path, e),
                )
                .with_source(e)
            })?;
            builder = builder.add_root_certificate(cert);
        }
        if self.insecure() {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        builder.build().map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot build HTTP client: {}", e),
            )
            .with_source(e)
        })
    }

    /// Create a session from this configuration.
    pub fn into_session(self) -> Result<Session> {
        let client = self.http_client()?;
        match self.effective_auth_type()? {
            "none" => {
                let endpoint = self.endpoint_override.as_deref().ok_or_else(|| {
                    Error::new(
                        ErrorKind::InvalidConfig,
                        "An endpoint (OS_URL) is required when authentication is disabled",
                    )
                })?;
                let mut auth = NoAuth::new(endpoint)?;
                if let Some(ref token) = self.auth.token {
                    auth = auth.with_token(token.clone());
                }
                self.finish(client, auth)
            }
            "token" => {
                let token = self.auth.token.as_deref().ok_or_else(|| {
                    Error::new(ErrorKind::InvalidConfig, "A token (OS_TOKEN) is required")
                })?;
                let mut auth = Token::new(self.auth_url()?, token)?;
                if let Some((project, domain)) = self.project_scope() {
                    auth.set_project_scope(project, domain);
                }
                self.finish(client, auth)
            }
            _ => {
                let user = match (&self.auth.user_id, &self.auth.username) {
                    (Some(id), _) => IdOrName::Id(id.clone()),
                    (None, Some(name)) => IdOrName::Name(name.clone()),
                    (None, None) => {
                        return Err(Error::new(
                            ErrorKind::InvalidConfig,
                            "A user name (OS_USERNAME) or ID (OS_USER_ID) is required",
                        ))
                    }
                };
                let password = self.auth.password.as_deref().ok_or_else(|| {
                    Error::new(
                        ErrorKind::InvalidConfig,
                        "A password (OS_PASSWORD) is required",
                    )
                })?;
                let user_domain = self.user_domain(&user);
                let mut auth = Password::new(self.auth_url()?, user, password, user_domain)?;
                if let Some((project, domain)) = self.project_scope() {
                    auth.set_project_scope(project, domain);
                }
                self.finish(client, auth)
            }
        }
    }

    fn auth_url(&self) -> Result<&str> {
        self.auth.auth_url.as_deref().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidConfig,
                "An authentication URL (OS_AUTH_URL) is required",
            )
        })
    }

    fn user_domain(&self, user: &IdOrName) -> Option<IdOrName> {
        match (&self.auth.user_domain_id, &self.auth.user_domain_name, user) {
            (Some(id), _, _) => Some(IdOrName::Id(id.clone())),
            (None, Some(name), _) => Some(IdOrName::Name(name.clone())),
            (None, None, IdOrName::Name(_)) => Some(IdOrName::Name(DEFAULT_DOMAIN.into())),
            (None, None, IdOrName::Id(_)) => None,
        }
    }

    fn project_scope(&self) -> Option<(IdOrName, Option<IdOrName>)> {
        let auth = &self.auth;
        if let Some(ref id) = auth.project_id {
            return Some((IdOrName::Id(id.clone()), None));
        }
        let name = auth.project_name.clone()?;
        let domain = match (&auth.project_domain_id, &auth.project_domain_name) {
            (Some(id), _) => IdOrName::Id(id.clone()),
            (None, Some(name)) => IdOrName::Name(name.clone()),
            (None, None) => IdOrName::Name(DEFAULT_DOMAIN.into()),
        };
        Some((IdOrName::Name(name), Some(domain)))
    }

    fn finish<A: AuthType + 'static>(self, client: Client, auth: A) -> Result<Session> {
        let mut session = Session::new_with_client(client, auth);
        if let Some(ref endpoint) = self.endpoint_override {
            session = session.with_endpoint_override(Url::parse(endpoint)?);
        }
        if let Some(region) = self.region_name {
            session = session.with_region(region);
        }
        if let Some(ref interface) = self.interface {
            session = session.with_endpoint_interface(interface.parse::<InterfaceType>()?);
        }
        if let Some(retries) = self.retries {
            session = session.with_retries(retries);
        }
        if let Some(interval) = self.retry_interval {
            session = session.with_retry_interval(seconds("retry interval", interval)?);
        }
        if let Some(timeout) = self.timeout {
            session = session.with_timeout(seconds("timeout", timeout)?);
        }
        Ok(session)
    }
}

#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use super::CloudConfig;
    use crate::identity::IdOrName;
    use crate::ErrorKind;

    const CLOUDS: &str = r#"
clouds:
  devstack:
    auth:
      auth_url: http://keystone:5000/v3
      username: admin
      password: secret
      project_name: demo
      user_domain_name: Default
    region_name: RegionOne
    interface: internal
    api_timeout: 30
  bypass:
    auth_type: none
    nfv_orchestration_endpoint_override: http://tacker:9890/
    verify: false
"#;

    fn vars(items: &[(&str, &str)]) -> CloudConfig {
        let map: HashMap<String, String> = items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CloudConfig::from_vars(|name| map.get(name).cloned())
    }

    #[test]
    fn test_from_yaml() {
        let cfg = CloudConfig::from_yaml_str(CLOUDS, "devstack").unwrap();
        assert_eq!(cfg.auth.auth_url.as_deref(), Some("http://keystone:5000/v3"));
        assert_eq!(cfg.auth.username.as_deref(), Some("admin"));
        assert_eq!(cfg.region_name.as_deref(), Some("RegionOne"));
        assert_eq!(cfg.interface.as_deref(), Some("internal"));
        assert_eq!(cfg.timeout, Some(30.0));
        assert!(!cfg.insecure());
        assert_eq!(cfg.effective_auth_type().unwrap(), "password");

        let cfg = CloudConfig::from_yaml_str(CLOUDS, "bypass").unwrap();
        assert_eq!(cfg.endpoint_override.as_deref(), Some("http://tacker:9890/"));
        assert!(cfg.insecure());
        assert_eq!(cfg.effective_auth_type().unwrap(), "none");
    }

    #[test]
    fn test_from_yaml_no_such_cloud() {
        let err = CloudConfig::from_yaml_str(CLOUDS, "prod").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert_eq!(err.to_string(), "No such cloud: prod");
    }

    #[test]
    fn test_from_vars() {
        let cfg = vars(&[
            ("OS_AUTH_URL", "http://keystone:5000"),
            ("OS_USERNAME", "admin"),
            ("OS_PASSWORD", "secret"),
            ("OS_TENANT_NAME", "demo"),
            ("OS_ENDPOINT_TYPE", "publicURL"),
            ("OS_INSECURE", "True"),
            ("OS_REGION_NAME", ""),
        ]);
        assert_eq!(cfg.auth.project_name.as_deref(), Some("demo"));
        assert_eq!(cfg.interface.as_deref(), Some("publicURL"));
        assert_eq!(cfg.region_name, None);
        assert!(cfg.insecure());
        assert_eq!(
            cfg.project_scope(),
            Some((
                IdOrName::Name("demo".into()),
                Some(IdOrName::Name("Default".into()))
            ))
        );
    }

    #[test]
    fn test_auth_type_guess() {
        let cfg = vars(&[("OS_URL", "http://tacker:9890/"), ("OS_TOKEN", "abc")]);
        assert_eq!(cfg.effective_auth_type().unwrap(), "none");

        let cfg = vars(&[("OS_AUTH_URL", "http://keystone:5000"), ("OS_TOKEN", "abc")]);
        assert_eq!(cfg.effective_auth_type().unwrap(), "token");

        let cfg = vars(&[("OS_AUTH_TYPE", "saml2")]);
        assert_eq!(
            cfg.effective_auth_type().err().unwrap().kind(),
            ErrorKind::InvalidConfig
        );
    }

    #[test]
    fn test_overlay() {
        let base = CloudConfig::from_yaml_str(CLOUDS, "devstack").unwrap();
        let cfg = base.overlay(vars(&[("OS_PASSWORD", "other"), ("OS_REGION_NAME", "R2")]));
        assert_eq!(cfg.auth.password.as_deref(), Some("other"));
        assert_eq!(cfg.auth.username.as_deref(), Some("admin"));
        assert_eq!(cfg.region_name.as_deref(), Some("R2"));
    }

    #[tokio::test]
    async fn test_into_session_noauth() {
        let cfg = vars(&[("OS_URL", "http://tacker:9890/"), ("OS_AUTH_TYPE", "none")]);
        let session = cfg.into_session().unwrap();
        assert_eq!(
            session.get_endpoint().await.unwrap().as_str(),
            "http://tacker:9890/"
        );
    }

    #[test]
    fn test_into_session_errors() {
        let err = vars(&[("OS_AUTH_TYPE", "none")]).into_session().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        let err = vars(&[("OS_AUTH_URL", "http://keystone:5000")])
            .into_session()
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        let cfg = vars(&[
            ("OS_AUTH_URL", "http://keystone:5000"),
            ("OS_USERNAME", "admin"),
            ("OS_PASSWORD", "secret"),
            ("OS_INTERFACE", "sideways"),
        ]);
        assert_eq!(
            cfg.into_session().err().unwrap().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_invalid_timeout() {
        let mut cfg = vars(&[("OS_URL", "http://tacker:9890/")]);
        cfg.timeout = Some(-1.0);
        assert_eq!(
            cfg.into_session().err().unwrap().kind(),
            ErrorKind::InvalidConfig
        );
    }
}
