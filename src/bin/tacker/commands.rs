// Copyright 2026 Tacker Client Developers
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

//! Command implementations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use tackerclient::common::{bulk_delete, find_resource_id};
use tackerclient::config::AuthConfig;
use tackerclient::legacy::{self, ScaleType, API_ROOT};
use tackerclient::vnflcm::{self, CancelMode, LcmVersion};
use tackerclient::vnfpkgm::{self, VnfdFormat};
use tackerclient::{vnffm, vnfpm, CloudConfig, Query, Session};

use crate::cli::*;
use crate::output::{format_list, format_one, OutputFormat};

const VNFD_COLUMNS: &[&str] = &["id", "name", "template_source", "description"];
const VNF_COLUMNS: &[&str] = &["id", "name", "mgmt_ip_address", "status", "vim_id", "vnfd_id"];
const VIM_COLUMNS: &[&str] = &["id", "tenant_id", "name", "type", "is_default", "status"];
const EVENT_COLUMNS: &[&str] = &[
    "id",
    "resource_type",
    "resource_id",
    "resource_state",
    "event_type",
    "timestamp",
];
const VNFFG_COLUMNS: &[&str] = &["id", "name", "status", "vnffgd_id"];
const NFP_COLUMNS: &[&str] = &["id", "name", "status", "vnffg_id", "path_id"];
const SFC_COLUMNS: &[&str] = &["id", "status", "nfp_id"];
const CLASSIFIER_COLUMNS: &[&str] = &["id", "name", "status", "nfp_id", "chain_id"];
const NS_COLUMNS: &[&str] = &["id", "name", "nsd_id", "vim_id", "status"];
const EXTENSION_COLUMNS: &[&str] = &["alias", "name"];
const PACKAGE_COLUMNS: &[&str] = &[
    "id",
    "vnfProductName",
    "onboardingState",
    "usageState",
    "operationalState",
];
const INSTANCE_COLUMNS: &[&str] = &[
    "id",
    "vnfInstanceName",
    "instantiationState",
    "vnfProvider",
    "vnfProductName",
];
const OP_OCC_COLUMNS: &[&str] = &["id", "operationState", "vnfInstanceId", "operation"];
const SUBSCRIPTION_COLUMNS: &[&str] = &["id", "callbackUri"];
const ALARM_COLUMNS: &[&str] = &[
    "id",
    "managedObjectId",
    "ackState",
    "eventType",
    "perceivedSeverity",
    "probableCause",
];
const PM_JOB_COLUMNS: &[&str] = &["id", "objectType"];
const THRESHOLD_COLUMNS: &[&str] = &["id", "objectType", "objectInstanceId"];

/// Execution context of a command.
struct Runner {
    session: Session,
    format: OutputFormat,
    lcm_version: LcmVersion,
}

impl Runner {
    fn print_list(&self, items: &[Value], columns: &[&str]) -> Result<()> {
        print!("{}", ensure_newline(format_list(self.format, items, columns)?));
        Ok(())
    }

    fn print_one(&self, item: &Value) -> Result<()> {
        print!("{}", ensure_newline(format_one(self.format, item)?));
        Ok(())
    }

    async fn resolve(&self, resource: &str, name_or_id: &str) -> Result<String> {
        Ok(find_resource_id(&self.session, &[API_ROOT], resource, name_or_id).await?)
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cloud_config(&cli.global)?;
    let lcm_version = match cli.global.os_tacker_api_version {
        Some(ref version) => version.parse::<LcmVersion>()?,
        None => LcmVersion::default(),
    };
    let session = config
        .into_session()
        .context("Cannot create a session")?;
    let ctx = Runner {
        session,
        format: cli.global.format,
        lcm_version,
    };

    match cli.command {
        Command::Vnfd(cmd) => vnfd(&ctx, cmd).await,
        Command::Vnf(cmd) => vnf(&ctx, cmd).await,
        Command::Vim(cmd) => vim(&ctx, cmd).await,
        Command::Event(cmd) => event(&ctx, cmd).await,
        Command::Vnffgd(cmd) => vnffgd(&ctx, cmd).await,
        Command::Vnffg(cmd) => vnffg(&ctx, cmd).await,
        Command::Nsd(cmd) => nsd(&ctx, cmd).await,
        Command::Ns(cmd) => ns(&ctx, cmd).await,
        Command::Extension(cmd) => extension(&ctx, cmd).await,
        Command::VnfPackage(cmd) => vnf_package(&ctx, cmd).await,
        Command::Vnflcm(cmd) => vnflcm_cmd(&ctx, cmd).await,
        Command::Vnffm(cmd) => vnffm_cmd(&ctx, cmd).await,
        Command::Vnfpm(cmd) => vnfpm_cmd(&ctx, cmd).await,
    }
}

/// Merge `clouds.yaml`, environment variables and command-line options.
pub fn cloud_config(global: &GlobalArgs) -> Result<CloudConfig> {
    let base = match global.os_cloud {
        Some(ref cloud) => CloudConfig::from_clouds_yaml(cloud)
            .with_context(|| format!("Cannot load cloud {}", cloud))?,
        None => CloudConfig::default(),
    };
    let env = CloudConfig::from_vars(|name| std::env::var(name).ok());
    let flags = CloudConfig {
        auth: AuthConfig {
            auth_url: global.os_auth_url.clone(),
            username: global.os_username.clone(),
            user_id: global.os_user_id.clone(),
            password: global.os_password.clone(),
            project_name: global.os_project_name.clone(),
            project_id: global.os_project_id.clone(),
            user_domain_name: global.os_user_domain_name.clone(),
            project_domain_name: global.os_project_domain_name.clone(),
            token: global.os_token.clone(),
            ..AuthConfig::default()
        },
        auth_type: global.os_auth_type.clone(),
        endpoint_override: global.os_url.clone(),
        region_name: global.os_region_name.clone(),
        interface: global.os_interface.clone(),
        cacert: global.os_cacert.clone(),
        verify: if global.insecure { Some(false) } else { None },
        retries: global.retries,
        retry_interval: global.retry_interval,
        timeout: global.http_timeout,
    };
    Ok(base.overlay(env).overlay(flags))
}

/// Load a JSON or YAML document from a file.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&text)
        .with_context(|| format!("{} is not a valid JSON or YAML document", path.display()))?;
    if !value.is_object() {
        bail!("{} must contain a mapping", path.display());
    }
    Ok(value)
}

fn legacy_query(list: &ListArgs) -> Query {
    let mut query = Query::new();
    for (key, value) in &list.filters {
        query.push_str(key.clone(), value.clone());
    }
    for field in &list.fields {
        query.push_str("fields", field.clone());
    }
    if let Some(limit) = list.limit {
        query.push("limit", limit);
    }
    if let Some(ref key) = list.sort_key {
        query.push_str("sort_key", key.clone());
    }
    if let Some(ref dir) = list.sort_dir {
        query.push_str("sort_dir", dir.clone());
    }
    query
}

fn etsi_query(list: &EtsiListArgs) -> Query {
    let mut query = Query::new();
    if let Some(ref filter) = list.filter {
        query.push_str("filter", filter.clone());
    }
    if list.all_fields {
        query.push_str("all_fields", "");
    }
    if let Some(ref fields) = list.fields {
        query.push_str("fields", fields.clone());
    }
    if let Some(ref fields) = list.exclude_fields {
        query.push_str("exclude_fields", fields.clone());
    }
    if list.exclude_default {
        query.push_str("exclude_default", "");
    }
    query
}

fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        let _ = body.insert(key.into(), Value::String(value));
    }
}

fn deleted(resource: &str) {
    println!("All specified {}(s) deleted successfully", resource);
}

/// Build the body of a VIM from its configuration file.
///
/// The file has the same layout as the one accepted by `tacker vim-register`:
/// `auth_url`, `username`, `password`, `project_name` and friends, or
/// `bearer_token` and `ssl_ca_cert` for Kubernetes.
pub fn vim_body(config: &Value) -> Result<Map<String, Value>> {
    let get = |key: &str| config.get(key).cloned();
    let mut body = Map::new();

    let vim_type = config
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("openstack")
        .to_string();
    if let Some(auth_url) = get("auth_url") {
        let _ = body.insert("auth_url".into(), auth_url);
    }

    let mut project = Map::new();
    if let Some(id) = get("project_id") {
        let _ = project.insert("id".into(), id);
    }
    if let Some(name) = get("project_name") {
        let _ = project.insert("name".into(), name);
    }
    if let Some(domain) = get("project_domain_name") {
        let _ = project.insert("project_domain_name".into(), domain);
    }

    let mut cred = Map::new();
    for key in &["username", "user_id", "password", "user_domain_name"] {
        if let Some(value) = get(key) {
            let _ = cred.insert(key.to_string(), value);
        }
    }
    if vim_type == "kubernetes" {
        for key in &["bearer_token", "ssl_ca_cert"] {
            if let Some(value) = get(key) {
                let _ = cred.insert(key.to_string(), value);
            }
        }
        if !cred.contains_key("bearer_token") && !cred.contains_key("password") {
            bail!("Kubernetes VIM requires bearer_token or username and password");
        }
    } else {
        let cert_verify = match config.get("cert_verify") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => true,
        };
        let _ = cred.insert("cert_verify".into(), json!(cert_verify.to_string()));
    }

    if !project.is_empty() {
        let _ = body.insert("vim_project".into(), Value::Object(project));
    }
    if !cred.is_empty() {
        let _ = body.insert("auth_cred".into(), Value::Object(cred));
    }
    let _ = body.insert("type".into(), Value::String(vim_type));
    Ok(body)
}

/// Build a VNF mapping from `VNFD1:vnf1,VNFD2:vnf2`.
async fn vnf_mapping(ctx: &Runner, mapping: &str) -> Result<Value> {
    let mut result = Map::new();
    for pair in mapping.split(',').filter(|p| !p.is_empty()) {
        let (vnfd, vnf) = pair
            .split_once(':')
            .with_context(|| format!("Invalid VNF mapping {}, expected VNFD:VNF", pair))?;
        let vnf_id = ctx.resolve("vnf", vnf).await?;
        let _ = result.insert(vnfd.to_string(), Value::String(vnf_id));
    }
    Ok(Value::Object(result))
}

async fn vnfd(ctx: &Runner, cmd: VnfdCommand) -> Result<()> {
    match cmd {
        VnfdCommand::Create {
            name,
            vnfd_file,
            description,
        } => {
            let template = load_document(&vnfd_file)?;
            let mut body = Map::new();
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            let _ = body.insert("attributes".into(), json!({ "vnfd": template }));
            let vnfd = legacy::create_vnfd(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&vnfd)
        }
        VnfdCommand::List {
            template_source,
            list,
        } => {
            let mut query = legacy_query(&list);
            if let Some(source) = template_source {
                query.push_str("template_source", source);
            }
            let vnfds = legacy::list_vnfds(&ctx.session, &query).await?;
            ctx.print_list(&vnfds, VNFD_COLUMNS)
        }
        VnfdCommand::Show(args) => {
            let id = ctx.resolve("vnfd", &args.id).await?;
            let vnfd = legacy::show_vnfd(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&vnfd)
        }
        VnfdCommand::Template(args) => {
            let id = ctx.resolve("vnfd", &args.id).await?;
            let query = Query::new().with("fields", "attributes");
            let vnfd = legacy::show_vnfd(&ctx.session, &id, &query).await?;
            let template = vnfd
                .pointer("/attributes/vnfd")
                .cloned()
                .unwrap_or(Value::Null);
            print_template(ctx.format, &template)
        }
        VnfdCommand::Delete(args) => {
            let session = &ctx.session;
            bulk_delete("vnfd", &args.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "vnfd", &name).await?;
                legacy::delete_vnfd(session, &id).await
            })
            .await?;
            deleted("vnfd");
            Ok(())
        }
    }
}

/// Templates are stored as YAML strings or as parsed documents.
fn print_template(format: OutputFormat, template: &Value) -> Result<()> {
    match (format, template) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(template)?),
        (_, Value::String(text)) => println!("{}", text),
        (_, other) => print!("{}", serde_yaml::to_string(other)?),
    }
    Ok(())
}

async fn vnf(ctx: &Runner, cmd: VnfCommand) -> Result<()> {
    match cmd {
        VnfCommand::Create {
            name,
            vnfd,
            vnfd_template,
            vim,
            vim_region_name,
            config_file,
            param_file,
            description,
        } => {
            let mut body = Map::new();
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            match (vnfd, vnfd_template) {
                (Some(vnfd), _) => {
                    let id = ctx.resolve("vnfd", &vnfd).await?;
                    let _ = body.insert("vnfd_id".into(), Value::String(id));
                }
                (None, Some(path)) => {
                    let _ = body.insert("vnfd_template".into(), load_document(&path)?);
                }
                (None, None) => bail!("Either --vnfd or --vnfd-template is required"),
            }
            if let Some(vim) = vim {
                let id = ctx.resolve("vim", &vim).await?;
                let _ = body.insert("vim_id".into(), Value::String(id));
            }
            if let Some(region) = vim_region_name {
                let _ = body.insert("placement_attr".into(), json!({ "region_name": region }));
            }
            let mut attributes = Map::new();
            if let Some(path) = config_file {
                let _ = attributes.insert("config".into(), load_document(&path)?);
            }
            if let Some(path) = param_file {
                let _ = attributes.insert("param_values".into(), load_document(&path)?);
            }
            if !attributes.is_empty() {
                let _ = body.insert("attributes".into(), Value::Object(attributes));
            }
            let vnf = legacy::create_vnf(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&vnf)
        }
        VnfCommand::List { list } => {
            let vnfs = legacy::list_vnfs(&ctx.session, &legacy_query(&list)).await?;
            ctx.print_list(&vnfs, VNF_COLUMNS)
        }
        VnfCommand::Show(args) => {
            let id = ctx.resolve("vnf", &args.id).await?;
            let vnf = legacy::show_vnf(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&vnf)
        }
        VnfCommand::Update {
            id,
            config_file,
            param_file,
        } => {
            let attributes = match (config_file, param_file) {
                (Some(path), _) => json!({ "config": load_document(&path)? }),
                (None, Some(path)) => json!({ "param_values": load_document(&path)? }),
                (None, None) => bail!("Either --config-file or --param-file is required"),
            };
            let id = ctx.resolve("vnf", &id).await?;
            let vnf = legacy::update_vnf(&ctx.session, &id, json!({ "attributes": attributes }))
                .await?;
            ctx.print_one(&vnf)
        }
        VnfCommand::Delete { ids, force } => {
            let session = &ctx.session;
            bulk_delete("vnf", &ids.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "vnf", &name).await?;
                legacy::delete_vnf(session, &id, force).await
            })
            .await?;
            deleted("vnf");
            Ok(())
        }
        VnfCommand::Scale {
            id,
            scaling_type,
            policy,
        } => {
            let id = ctx.resolve("vnf", &id).await?;
            let scale_type = match scaling_type {
                ScalingType::In => ScaleType::In,
                ScalingType::Out => ScaleType::Out,
            };
            legacy::scale_vnf(&ctx.session, &id, scale_type, &policy).await?;
            println!("Scaling of VNF {} has been requested", id);
            Ok(())
        }
        VnfCommand::Resources(args) => {
            let id = ctx.resolve("vnf", &args.id).await?;
            let resources = legacy::list_vnf_resources(&ctx.session, &id).await?;
            ctx.print_list(&resources, &["name", "id", "type"])
        }
    }
}

async fn vim(ctx: &Runner, cmd: VimCommand) -> Result<()> {
    match cmd {
        VimCommand::Register {
            name,
            config_file,
            description,
            is_default,
        } => {
            let mut body = vim_body(&load_document(&config_file)?)?;
            if !body.contains_key("auth_url") {
                bail!("auth_url is missing in {}", config_file.display());
            }
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            let _ = body.insert("is_default".into(), Value::Bool(is_default));
            let vim = legacy::create_vim(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&vim)
        }
        VimCommand::List { list } => {
            let vims = legacy::list_vims(&ctx.session, &legacy_query(&list)).await?;
            ctx.print_list(&vims, VIM_COLUMNS)
        }
        VimCommand::Show(args) => {
            let id = ctx.resolve("vim", &args.id).await?;
            let vim = legacy::show_vim(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&vim)
        }
        VimCommand::Update {
            id,
            config_file,
            name,
            description,
            is_default,
        } => {
            let mut body = match config_file {
                Some(path) => {
                    let mut body = vim_body(&load_document(&path)?)?;
                    // The type and URL of a VIM cannot be changed.
                    let _ = body.remove("type");
                    let _ = body.remove("auth_url");
                    body
                }
                None => Map::new(),
            };
            insert_opt(&mut body, "name", name);
            insert_opt(&mut body, "description", description);
            if let Some(is_default) = is_default {
                let _ = body.insert("is_default".into(), Value::Bool(is_default));
            }
            if body.is_empty() {
                bail!("Nothing to update");
            }
            let id = ctx.resolve("vim", &id).await?;
            let vim = legacy::update_vim(&ctx.session, &id, Value::Object(body)).await?;
            ctx.print_one(&vim)
        }
        VimCommand::Delete(args) => {
            let session = &ctx.session;
            bulk_delete("vim", &args.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "vim", &name).await?;
                legacy::delete_vim(session, &id).await
            })
            .await?;
            deleted("vim");
            Ok(())
        }
    }
}

async fn event(ctx: &Runner, cmd: EventCommand) -> Result<()> {
    match cmd {
        EventCommand::List {
            resource_type,
            resource_id,
            event_type,
            list,
        } => {
            let mut query = legacy_query(&list);
            if let Some(value) = resource_type {
                query.push_str("resource_type", value);
            }
            if let Some(value) = resource_id {
                query.push_str("resource_id", value);
            }
            if let Some(value) = event_type {
                query.push_str("event_type", value);
            }
            let events = legacy::list_events(&ctx.session, &query).await?;
            ctx.print_list(&events, EVENT_COLUMNS)
        }
        EventCommand::Show { id } => {
            let event = legacy::show_event(&ctx.session, &id).await?;
            ctx.print_one(&event)
        }
    }
}

async fn vnffgd(ctx: &Runner, cmd: VnffgdCommand) -> Result<()> {
    match cmd {
        VnffgdCommand::Create {
            name,
            vnffgd_file,
            description,
        } => {
            let template = load_document(&vnffgd_file)?;
            let mut body = Map::new();
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            let _ = body.insert("template".into(), json!({ "vnffgd": template }));
            let vnffgd = legacy::create_vnffgd(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&vnffgd)
        }
        VnffgdCommand::List { list } => {
            let vnffgds = legacy::list_vnffgds(&ctx.session, &legacy_query(&list)).await?;
            ctx.print_list(&vnffgds, VNFD_COLUMNS)
        }
        VnffgdCommand::Show(args) => {
            let id = ctx.resolve("vnffgd", &args.id).await?;
            let vnffgd = legacy::show_vnffgd(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&vnffgd)
        }
        VnffgdCommand::Delete(args) => {
            let session = &ctx.session;
            bulk_delete("vnffgd", &args.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "vnffgd", &name).await?;
                legacy::delete_vnffgd(session, &id).await
            })
            .await?;
            deleted("vnffgd");
            Ok(())
        }
    }
}

async fn vnffg(ctx: &Runner, cmd: VnffgCommand) -> Result<()> {
    match cmd {
        VnffgCommand::Create {
            name,
            vnffgd,
            vnf_mapping: mapping,
            symmetrical,
            param_file,
            description,
        } => {
            let mut body = Map::new();
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            let vnffgd_id = ctx.resolve("vnffgd", &vnffgd).await?;
            let _ = body.insert("vnffgd_id".into(), Value::String(vnffgd_id));
            let _ = body.insert("symmetrical".into(), Value::Bool(symmetrical));
            if let Some(mapping) = mapping {
                let _ = body.insert("vnf_mapping".into(), vnf_mapping(ctx, &mapping).await?);
            }
            if let Some(path) = param_file {
                let _ = body.insert(
                    "attributes".into(),
                    json!({ "param_values": load_document(&path)? }),
                );
            }
            let vnffg = legacy::create_vnffg(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&vnffg)
        }
        VnffgCommand::List { list } => {
            let vnffgs = legacy::list_vnffgs(&ctx.session, &legacy_query(&list)).await?;
            ctx.print_list(&vnffgs, VNFFG_COLUMNS)
        }
        VnffgCommand::Show(args) => {
            let id = ctx.resolve("vnffg", &args.id).await?;
            let vnffg = legacy::show_vnffg(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&vnffg)
        }
        VnffgCommand::Update {
            id,
            vnf_mapping: mapping,
            symmetrical,
            vnffgd_template,
        } => {
            let mut body = Map::new();
            if let Some(mapping) = mapping {
                let _ = body.insert("vnf_mapping".into(), vnf_mapping(ctx, &mapping).await?);
            }
            if let Some(symmetrical) = symmetrical {
                let _ = body.insert("symmetrical".into(), Value::Bool(symmetrical));
            }
            if let Some(path) = vnffgd_template {
                let _ = body.insert("vnffgd_template".into(), load_document(&path)?);
            }
            if body.is_empty() {
                bail!("Nothing to update");
            }
            let id = ctx.resolve("vnffg", &id).await?;
            let vnffg = legacy::update_vnffg(&ctx.session, &id, Value::Object(body)).await?;
            ctx.print_one(&vnffg)
        }
        VnffgCommand::Delete(args) => {
            let session = &ctx.session;
            bulk_delete("vnffg", &args.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "vnffg", &name).await?;
                legacy::delete_vnffg(session, &id).await
            })
            .await?;
            deleted("vnffg");
            Ok(())
        }
        VnffgCommand::Nfp(cmd) => match cmd {
            ComponentCommand::List { list } => {
                let nfps = legacy::list_nfps(&ctx.session, &legacy_query(&list)).await?;
                ctx.print_list(&nfps, NFP_COLUMNS)
            }
            ComponentCommand::Show(args) => {
                let id = ctx.resolve("nfp", &args.id).await?;
                ctx.print_one(&legacy::show_nfp(&ctx.session, &id, &Query::new()).await?)
            }
        },
        VnffgCommand::Chain(cmd) => match cmd {
            ComponentCommand::List { list } => {
                let sfcs = legacy::list_sfcs(&ctx.session, &legacy_query(&list)).await?;
                ctx.print_list(&sfcs, SFC_COLUMNS)
            }
            ComponentCommand::Show(args) => {
                let sfc = legacy::show_sfc(&ctx.session, &args.id, &Query::new()).await?;
                ctx.print_one(&sfc)
            }
        },
        VnffgCommand::Classifier(cmd) => match cmd {
            ComponentCommand::List { list } => {
                let items = legacy::list_classifiers(&ctx.session, &legacy_query(&list)).await?;
                ctx.print_list(&items, CLASSIFIER_COLUMNS)
            }
            ComponentCommand::Show(args) => {
                let id = ctx.resolve("classifier", &args.id).await?;
                let item = legacy::show_classifier(&ctx.session, &id, &Query::new()).await?;
                ctx.print_one(&item)
            }
        },
    }
}

async fn nsd(ctx: &Runner, cmd: NsdCommand) -> Result<()> {
    match cmd {
        NsdCommand::Create {
            name,
            nsd_file,
            description,
        } => {
            let template = load_document(&nsd_file)?;
            let mut body = Map::new();
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            let _ = body.insert("attributes".into(), json!({ "nsd": template }));
            let nsd = legacy::create_nsd(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&nsd)
        }
        NsdCommand::List {
            template_source,
            list,
        } => {
            let mut query = legacy_query(&list);
            if let Some(source) = template_source {
                query.push_str("template_source", source);
            }
            let nsds = legacy::list_nsds(&ctx.session, &query).await?;
            ctx.print_list(&nsds, VNFD_COLUMNS)
        }
        NsdCommand::Show(args) => {
            let id = ctx.resolve("nsd", &args.id).await?;
            let nsd = legacy::show_nsd(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&nsd)
        }
        NsdCommand::Template(args) => {
            let id = ctx.resolve("nsd", &args.id).await?;
            let query = Query::new().with("fields", "attributes");
            let nsd = legacy::show_nsd(&ctx.session, &id, &query).await?;
            let template = nsd
                .pointer("/attributes/nsd")
                .cloned()
                .unwrap_or(Value::Null);
            print_template(ctx.format, &template)
        }
        NsdCommand::Delete(args) => {
            let session = &ctx.session;
            bulk_delete("nsd", &args.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "nsd", &name).await?;
                legacy::delete_nsd(session, &id).await
            })
            .await?;
            deleted("nsd");
            Ok(())
        }
    }
}

async fn ns(ctx: &Runner, cmd: NsCommand) -> Result<()> {
    match cmd {
        NsCommand::Create {
            name,
            nsd,
            nsd_template,
            vim,
            param_file,
            description,
        } => {
            let mut body = Map::new();
            let _ = body.insert("name".into(), Value::String(name));
            insert_opt(&mut body, "description", description);
            let mut attributes = Map::new();
            match (nsd, nsd_template) {
                (Some(nsd), _) => {
                    let id = ctx.resolve("nsd", &nsd).await?;
                    let _ = body.insert("nsd_id".into(), Value::String(id));
                }
                (None, Some(path)) => {
                    let _ = body.insert("nsd_template".into(), load_document(&path)?);
                }
                (None, None) => bail!("Either --nsd or --nsd-template is required"),
            }
            if let Some(vim) = vim {
                let id = ctx.resolve("vim", &vim).await?;
                let _ = body.insert("vim_id".into(), Value::String(id));
            }
            if let Some(path) = param_file {
                let _ = attributes.insert("param_values".into(), load_document(&path)?);
            }
            if !attributes.is_empty() {
                let _ = body.insert("attributes".into(), Value::Object(attributes));
            }
            let ns = legacy::create_ns(&ctx.session, Value::Object(body)).await?;
            ctx.print_one(&ns)
        }
        NsCommand::List { list } => {
            let nss = legacy::list_nss(&ctx.session, &legacy_query(&list)).await?;
            ctx.print_list(&nss, NS_COLUMNS)
        }
        NsCommand::Show(args) => {
            let id = ctx.resolve("ns", &args.id).await?;
            let ns = legacy::show_ns(&ctx.session, &id, &Query::new()).await?;
            ctx.print_one(&ns)
        }
        NsCommand::Delete { ids, force } => {
            let session = &ctx.session;
            bulk_delete("ns", &ids.ids, |name| async move {
                let id = find_resource_id(session, &[API_ROOT], "ns", &name).await?;
                legacy::delete_ns(session, &id, force).await
            })
            .await?;
            deleted("ns");
            Ok(())
        }
    }
}

async fn extension(ctx: &Runner, cmd: ExtensionCommand) -> Result<()> {
    match cmd {
        ExtensionCommand::List => {
            let items = legacy::list_extensions(&ctx.session, &Query::new()).await?;
            ctx.print_list(&items, EXTENSION_COLUMNS)
        }
        ExtensionCommand::Show { alias } => {
            ctx.print_one(&legacy::show_extension(&ctx.session, &alias).await?)
        }
    }
}

fn user_data(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("Cannot write {}", path.display()))
}

async fn vnf_package(ctx: &Runner, cmd: VnfPackageCommand) -> Result<()> {
    let session = &ctx.session;
    match cmd {
        VnfPackageCommand::Create { user_data: data } => {
            let body = json!({ "userDefinedData": user_data(data) });
            ctx.print_one(&vnfpkgm::create_vnf_package(session, body).await?)
        }
        VnfPackageCommand::List { list } => {
            let items = vnfpkgm::list_vnf_packages(session, &etsi_query(&list)).await?;
            ctx.print_list(&items, PACKAGE_COLUMNS)
        }
        VnfPackageCommand::Show(args) => {
            ctx.print_one(&vnfpkgm::show_vnf_package(session, &args.id).await?)
        }
        VnfPackageCommand::Update {
            id,
            operational_state,
            user_data: data,
            delete_keys,
        } => {
            let mut body = Map::new();
            insert_opt(&mut body, "operationalState", operational_state);
            let mut data = user_data(data);
            for key in delete_keys {
                let _ = data.insert(key, Value::Null);
            }
            if !data.is_empty() {
                let _ = body.insert("userDefinedData".into(), Value::Object(data));
            }
            if body.is_empty() {
                bail!("Nothing to update");
            }
            let result = vnfpkgm::update_vnf_package(session, &id, Value::Object(body)).await?;
            ctx.print_one(&result)
        }
        VnfPackageCommand::Delete(args) => {
            bulk_delete("vnf package", &args.ids, |id| async move {
                vnfpkgm::delete_vnf_package(session, &id).await
            })
            .await?;
            deleted("vnf package");
            Ok(())
        }
        VnfPackageCommand::Upload {
            id,
            path,
            url,
            user_name,
            password,
        } => {
            match (path, url) {
                (Some(path), _) => vnfpkgm::upload_vnf_package_file(session, &id, path).await?,
                (None, Some(url)) => {
                    let mut body = Map::new();
                    let _ = body.insert("addressInformation".into(), Value::String(url));
                    insert_opt(&mut body, "userName", user_name);
                    insert_opt(&mut body, "password", password);
                    vnfpkgm::upload_vnf_package_from_uri(session, &id, Value::Object(body))
                        .await?
                }
                (None, None) => bail!("Either --path or --url is required"),
            }
            println!("Upload request for VNF package {} has been accepted.", id);
            Ok(())
        }
        VnfPackageCommand::Download { id, file } => {
            let data = vnfpkgm::download_vnf_package(session, &id).await?;
            write_output(&file, &data)
        }
        VnfPackageCommand::DownloadVnfd {
            id,
            file,
            vnfd_format,
        } => {
            let format: VnfdFormat = vnfd_format.parse()?;
            let data = vnfpkgm::download_vnfd(session, &id, format).await?;
            match file {
                Some(file) => write_output(&file, &data),
                None if format == VnfdFormat::Text => {
                    println!("{}", String::from_utf8_lossy(&data));
                    Ok(())
                }
                None => bail!("--file is required for ZIP archives"),
            }
        }
        VnfPackageCommand::Artifact {
            id,
            artifact_path,
            file,
        } => {
            let data = vnfpkgm::fetch_artifact(session, &id, &artifact_path).await?;
            write_output(&file, &data)
        }
    }
}

async fn vnflcm_cmd(ctx: &Runner, cmd: VnflcmCommand) -> Result<()> {
    let session = &ctx.session;
    let version = ctx.lcm_version;
    match cmd {
        VnflcmCommand::Create {
            vnfd_id,
            name,
            description,
            instantiate_file,
        } => {
            let mut body = Map::new();
            let _ = body.insert("vnfdId".into(), Value::String(vnfd_id));
            insert_opt(&mut body, "vnfInstanceName", name);
            insert_opt(&mut body, "vnfInstanceDescription", description);
            // Read the file first so that a typo does not leave an orphan instance.
            let instantiate = match instantiate_file {
                Some(path) => Some(load_document(&path)?),
                None => None,
            };
            let instance =
                vnflcm::create_vnf_instance(session, version, Value::Object(body)).await?;
            ctx.print_one(&instance)?;
            if let Some(request) = instantiate {
                let id = instance
                    .get("id")
                    .and_then(Value::as_str)
                    .context("The created VNF instance has no ID")?;
                vnflcm::instantiate_vnf_instance(session, version, id, request).await?;
                println!("Instantiate request for VNF Instance {} has been accepted.", id);
            }
            Ok(())
        }
        VnflcmCommand::List { list } => {
            let items = vnflcm::list_vnf_instances(session, version, &etsi_query(&list)).await?;
            ctx.print_list(&items, INSTANCE_COLUMNS)
        }
        VnflcmCommand::Show(args) => {
            ctx.print_one(&vnflcm::show_vnf_instance(session, version, &args.id).await?)
        }
        VnflcmCommand::Update { id, file } => {
            vnflcm::update_vnf_instance(session, version, &id, load_document(&file)?).await?;
            println!("Update vnf:{} ", id);
            Ok(())
        }
        VnflcmCommand::Delete(args) => {
            bulk_delete("vnf instance", &args.ids, |id| async move {
                vnflcm::delete_vnf_instance(session, version, &id).await
            })
            .await?;
            deleted("vnf instance");
            Ok(())
        }
        VnflcmCommand::Instantiate { id, file } => {
            vnflcm::instantiate_vnf_instance(session, version, &id, load_document(&file)?).await?;
            println!("Instantiate request for VNF Instance {} has been accepted.", id);
            Ok(())
        }
        VnflcmCommand::Terminate {
            id,
            graceful,
            graceful_termination_timeout,
            delete,
        } => {
            let mut body = Map::new();
            let mode = if graceful { "GRACEFUL" } else { "FORCEFUL" };
            let _ = body.insert("terminationType".into(), Value::String(mode.into()));
            if let Some(timeout) = graceful_termination_timeout {
                let _ = body.insert("gracefulTerminationTimeout".into(), json!(timeout));
            }
            vnflcm::terminate_vnf_instance(session, version, &id, Value::Object(body)).await?;
            println!("Terminate request for VNF Instance '{}' has been accepted.", id);
            if delete {
                wait_for_termination(session, version, &id).await?;
                vnflcm::delete_vnf_instance(session, version, &id).await?;
                println!("VNF Instance '{}' is deleted successfully", id);
            }
            Ok(())
        }
        VnflcmCommand::Heal {
            id,
            cause,
            vnfc_instances,
            additional_param_file,
        } => {
            let mut body = Map::new();
            insert_opt(&mut body, "cause", cause);
            if !vnfc_instances.is_empty() {
                let _ = body.insert("vnfcInstanceId".into(), json!(vnfc_instances));
            }
            if let Some(path) = additional_param_file {
                let _ = body.insert("additionalParams".into(), load_document(&path)?);
            }
            vnflcm::heal_vnf_instance(session, version, &id, Value::Object(body)).await?;
            println!("Heal request for VNF Instance {} has been accepted.", id);
            Ok(())
        }
        VnflcmCommand::Scale {
            id,
            scale_type,
            aspect_id,
            number_of_steps,
            additional_param_file,
        } => {
            let mut body = Map::new();
            let _ = body.insert("type".into(), Value::String(scale_type));
            let _ = body.insert("aspectId".into(), Value::String(aspect_id));
            let _ = body.insert("numberOfSteps".into(), json!(number_of_steps));
            if let Some(path) = additional_param_file {
                let _ = body.insert("additionalParams".into(), load_document(&path)?);
            }
            vnflcm::scale_vnf_instance(session, version, &id, Value::Object(body)).await?;
            println!("Scale request for VNF Instance {} has been accepted.", id);
            Ok(())
        }
        VnflcmCommand::ChangeExtConn { id, file } => {
            vnflcm::change_ext_conn_vnf_instance(session, version, &id, load_document(&file)?)
                .await?;
            println!(
                "Change External VNF Connectivity for VNF Instance {} has been accepted.",
                id
            );
            Ok(())
        }
        VnflcmCommand::ChangeVnfpkg { id, file } => {
            vnflcm::change_vnfpkg_vnf_instance(session, version, &id, load_document(&file)?)
                .await?;
            println!("Change Current VNF Package for VNF Instance {} has been accepted.", id);
            Ok(())
        }
        VnflcmCommand::Versions { major_version } => {
            let major = match major_version {
                Some(v) => Some(v.parse::<LcmVersion>()?),
                None => None,
            };
            ctx.print_one(&vnflcm::show_api_versions(session, major).await?)
        }
        VnflcmCommand::Op(cmd) => match cmd {
            OpCommand::List { list } => {
                let items =
                    vnflcm::list_vnf_lcm_op_occs(session, version, &etsi_query(&list)).await?;
                ctx.print_list(&items, OP_OCC_COLUMNS)
            }
            OpCommand::Show(args) => {
                ctx.print_one(&vnflcm::show_vnf_lcm_op_occ(session, version, &args.id).await?)
            }
            OpCommand::Rollback(args) => {
                vnflcm::rollback_vnf_lcm_op_occ(session, version, &args.id).await?;
                println!("Rollback request for LCM operation {} has been accepted", args.id);
                Ok(())
            }
            OpCommand::Retry(args) => {
                vnflcm::retry_vnf_lcm_op_occ(session, version, &args.id).await?;
                println!("Retry request for LCM operation {} has been accepted", args.id);
                Ok(())
            }
            OpCommand::Fail(args) => {
                ctx.print_one(&vnflcm::fail_vnf_lcm_op_occ(session, version, &args.id).await?)
            }
            OpCommand::Cancel { id, cancel_mode } => {
                let mode: CancelMode = cancel_mode.parse()?;
                vnflcm::cancel_vnf_lcm_op_occ(session, version, &id, mode).await?;
                println!("Cancel request for LCM operation {} has been accepted", id);
                Ok(())
            }
        },
        VnflcmCommand::Subsc(cmd) => match cmd {
            SubscriptionCommand::Create { file } => {
                let body = load_document(&file)?;
                ctx.print_one(&vnflcm::create_lccn_subscription(session, version, body).await?)
            }
            SubscriptionCommand::List { list } => {
                let items =
                    vnflcm::list_lccn_subscriptions(session, version, &etsi_query(&list)).await?;
                ctx.print_list(&items, SUBSCRIPTION_COLUMNS)
            }
            SubscriptionCommand::Show(args) => {
                ctx.print_one(&vnflcm::show_lccn_subscription(session, version, &args.id).await?)
            }
            SubscriptionCommand::Delete(args) => {
                bulk_delete("subscription", &args.ids, |id| async move {
                    vnflcm::delete_lccn_subscription(session, version, &id).await
                })
                .await?;
                deleted("subscription");
                Ok(())
            }
        },
    }
}

/// Poll a VNF instance until it is no longer instantiated.
async fn wait_for_termination(session: &Session, version: LcmVersion, id: &str) -> Result<()> {
    const ATTEMPTS: u32 = 60;
    const INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);
    for _ in 0..ATTEMPTS {
        let instance = vnflcm::show_vnf_instance(session, version, id).await?;
        if instance.get("instantiationState").and_then(Value::as_str) == Some("NOT_INSTANTIATED")
        {
            return Ok(());
        }
        log::debug!("VNF instance {} is still instantiated, waiting", id);
        tokio::time::sleep(INTERVAL).await;
    }
    bail!(
        "VNF instance {} is still instantiated after {} seconds",
        id,
        ATTEMPTS as u64 * INTERVAL.as_secs()
    )
}

async fn vnffm_cmd(ctx: &Runner, cmd: VnffmCommand) -> Result<()> {
    let session = &ctx.session;
    match cmd {
        VnffmCommand::Alarm(cmd) => match cmd {
            AlarmCommand::List { list } => {
                let items = vnffm::list_alarms(session, &etsi_query(&list)).await?;
                ctx.print_list(&items, ALARM_COLUMNS)
            }
            AlarmCommand::Show(args) => ctx.print_one(&vnffm::show_alarm(session, &args.id).await?),
            AlarmCommand::Update { id, ack_state } => {
                let body = json!({ "ackState": ack_state });
                ctx.print_one(&vnffm::update_alarm(session, &id, body).await?)
            }
        },
        VnffmCommand::Subsc(cmd) => match cmd {
            SubscriptionCommand::Create { file } => {
                let body = load_document(&file)?;
                ctx.print_one(&vnffm::create_fm_subscription(session, body).await?)
            }
            SubscriptionCommand::List { list } => {
                let items = vnffm::list_fm_subscriptions(session, &etsi_query(&list)).await?;
                ctx.print_list(&items, SUBSCRIPTION_COLUMNS)
            }
            SubscriptionCommand::Show(args) => {
                ctx.print_one(&vnffm::show_fm_subscription(session, &args.id).await?)
            }
            SubscriptionCommand::Delete(args) => {
                bulk_delete("vnf fm subscription", &args.ids, |id| async move {
                    vnffm::delete_fm_subscription(session, &id).await
                })
                .await?;
                deleted("vnf fm subscription");
                Ok(())
            }
        },
    }
}

async fn vnfpm_cmd(ctx: &Runner, cmd: VnfpmCommand) -> Result<()> {
    let session = &ctx.session;
    match cmd {
        VnfpmCommand::Job(cmd) => match cmd {
            PmCommand::Create { file } => {
                ctx.print_one(&vnfpm::create_pm_job(session, load_document(&file)?).await?)
            }
            PmCommand::List { list } => {
                let items = vnfpm::list_pm_jobs(session, &etsi_query(&list)).await?;
                ctx.print_list(&items, PM_JOB_COLUMNS)
            }
            PmCommand::Show(args) => ctx.print_one(&vnfpm::show_pm_job(session, &args.id).await?),
            PmCommand::Update { id, file } => {
                let result = vnfpm::update_pm_job(session, &id, load_document(&file)?).await?;
                ctx.print_one(&result)
            }
            PmCommand::Delete(args) => {
                bulk_delete("vnf pm job", &args.ids, |id| async move {
                    vnfpm::delete_pm_job(session, &id).await
                })
                .await?;
                deleted("vnf pm job");
                Ok(())
            }
        },
        VnfpmCommand::Report(ReportCommand::Show { job_id, report_id }) => {
            ctx.print_one(&vnfpm::show_report(session, &job_id, &report_id).await?)
        }
        VnfpmCommand::Threshold(cmd) => match cmd {
            PmCommand::Create { file } => {
                ctx.print_one(&vnfpm::create_threshold(session, load_document(&file)?).await?)
            }
            PmCommand::List { list } => {
                let items = vnfpm::list_thresholds(session, &etsi_query(&list)).await?;
                ctx.print_list(&items, THRESHOLD_COLUMNS)
            }
            PmCommand::Show(args) => {
                ctx.print_one(&vnfpm::show_threshold(session, &args.id).await?)
            }
            PmCommand::Update { id, file } => {
                let result = vnfpm::update_threshold(session, &id, load_document(&file)?).await?;
                ctx.print_one(&result)
            }
            PmCommand::Delete(args) => {
                bulk_delete("vnf pm threshold", &args.ids, |id| async move {
                    vnfpm::delete_threshold(session, &id).await
                })
                .await?;
                deleted("vnf pm threshold");
                Ok(())
            }
        },
    }
}
