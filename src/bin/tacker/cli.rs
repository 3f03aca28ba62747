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

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Command-line interface to the OpenStack Tacker API.
#[derive(Parser, Debug)]
#[command(name = "tacker", version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by all commands.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Cloud name in clouds.yaml
    #[arg(long, env = "OS_CLOUD", global = true)]
    pub os_cloud: Option<String>,

    /// Authentication URL
    #[arg(long, env = "OS_AUTH_URL", global = true)]
    pub os_auth_url: Option<String>,

    /// Authentication type (password, token, none)
    #[arg(long, env = "OS_AUTH_TYPE", global = true)]
    pub os_auth_type: Option<String>,

    /// User name
    #[arg(long, env = "OS_USERNAME", global = true)]
    pub os_username: Option<String>,

    /// User ID
    #[arg(long, env = "OS_USER_ID", global = true)]
    pub os_user_id: Option<String>,

    /// User password
    #[arg(long, env = "OS_PASSWORD", hide_env_values = true, global = true)]
    pub os_password: Option<String>,

    /// Project name
    #[arg(long, alias = "os-tenant-name", env = "OS_PROJECT_NAME", global = true)]
    pub os_project_name: Option<String>,

    /// Project ID
    #[arg(long, alias = "os-tenant-id", env = "OS_PROJECT_ID", global = true)]
    pub os_project_id: Option<String>,

    /// Domain name of the user
    #[arg(long, env = "OS_USER_DOMAIN_NAME", global = true)]
    pub os_user_domain_name: Option<String>,

    /// Domain name of the project
    #[arg(long, env = "OS_PROJECT_DOMAIN_NAME", global = true)]
    pub os_project_domain_name: Option<String>,

    /// Pre-issued authentication token
    #[arg(long, alias = "os-auth-token", env = "OS_TOKEN", hide_env_values = true, global = true)]
    pub os_token: Option<String>,

    /// Tacker endpoint, bypassing the service catalog
    #[arg(long, env = "OS_URL", global = true)]
    pub os_url: Option<String>,

    /// Region name
    #[arg(long, env = "OS_REGION_NAME", global = true)]
    pub os_region_name: Option<String>,

    /// Endpoint interface (public, internal, admin)
    #[arg(long, alias = "os-endpoint-type", env = "OS_INTERFACE", global = true)]
    pub os_interface: Option<String>,

    /// CA certificate bundle
    #[arg(long, env = "OS_CACERT", global = true)]
    pub os_cacert: Option<String>,

    /// Do not verify TLS certificates
    #[arg(long, env = "OS_INSECURE", global = true)]
    pub insecure: bool,

    /// Major version of the VNF LCM API
    #[arg(long, env = "OS_TACKER_API_VERSION", global = true)]
    pub os_tacker_api_version: Option<String>,

    /// Number of retries on connection failures
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Seconds between retries
    #[arg(long, global = true)]
    pub retry_interval: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub http_timeout: Option<f64>,

    /// Print debugging output
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

/// Top-level command groups.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// VNF descriptors
    #[command(subcommand)]
    Vnfd(VnfdCommand),
    /// VNFs
    #[command(subcommand)]
    Vnf(VnfCommand),
    /// VIMs
    #[command(subcommand)]
    Vim(VimCommand),
    /// Events
    #[command(subcommand)]
    Event(EventCommand),
    /// VNF forwarding graph descriptors
    #[command(subcommand)]
    Vnffgd(VnffgdCommand),
    /// VNF forwarding graphs and their components
    #[command(subcommand)]
    Vnffg(VnffgCommand),
    /// Network service descriptors
    #[command(subcommand)]
    Nsd(NsdCommand),
    /// Network services
    #[command(subcommand)]
    Ns(NsCommand),
    /// API extensions
    #[command(subcommand)]
    Extension(ExtensionCommand),
    /// VNF packages
    #[command(subcommand)]
    VnfPackage(VnfPackageCommand),
    /// VNF lifecycle management
    #[command(subcommand)]
    Vnflcm(VnflcmCommand),
    /// VNF fault management
    #[command(subcommand)]
    Vnffm(VnffmCommand),
    /// VNF performance management
    #[command(subcommand)]
    Vnfpm(VnfpmCommand),
}

/// Filters of a legacy list.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by KEY=VALUE (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Return only these fields (repeatable)
    #[arg(long = "field", short = 'F')]
    pub fields: Vec<String>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort key
    #[arg(long)]
    pub sort_key: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long)]
    pub sort_dir: Option<String>,
}

/// Filters of an ETSI list.
#[derive(Args, Debug, Default)]
pub struct EtsiListArgs {
    /// Attribute-based filter expression, e.g. "(eq,vnfdId,abc)"
    #[arg(long)]
    pub filter: Option<String>,

    /// Include all complex attributes
    #[arg(long)]
    pub all_fields: bool,

    /// Complex attributes to include
    #[arg(long)]
    pub fields: Option<String>,

    /// Complex attributes to exclude
    #[arg(long)]
    pub exclude_fields: Option<String>,

    /// Exclude the default complex attributes
    #[arg(long)]
    pub exclude_default: bool,
}

/// A resource given by its name or ID.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Name or ID
    pub id: String,
}

/// One or more resources to delete.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Names or IDs
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// VNFD commands.
#[derive(Subcommand, Debug)]
pub enum VnfdCommand {
    /// Create a VNFD
    Create {
        /// Name of the VNFD
        name: String,
        /// YAML file with the VNFD template
        #[arg(long)]
        vnfd_file: PathBuf,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List VNFDs
    List {
        /// Template source (onboarded, inline, all)
        #[arg(long)]
        template_source: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a VNFD
    Show(ShowArgs),
    /// Show the template of a VNFD
    Template(ShowArgs),
    /// Delete VNFDs
    Delete(DeleteArgs),
}

/// VNF commands.
#[derive(Subcommand, Debug)]
pub enum VnfCommand {
    /// Create a VNF
    Create {
        /// Name of the VNF
        name: String,
        /// VNFD name or ID
        #[arg(long, conflicts_with = "vnfd_template")]
        vnfd: Option<String>,
        /// YAML file with an inline VNFD template
        #[arg(long)]
        vnfd_template: Option<PathBuf>,
        /// VIM name or ID
        #[arg(long)]
        vim: Option<String>,
        /// Region of the VIM
        #[arg(long)]
        vim_region_name: Option<String>,
        /// YAML file with the VNF configuration
        #[arg(long)]
        config_file: Option<PathBuf>,
        /// YAML file with template parameter values
        #[arg(long)]
        param_file: Option<PathBuf>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List VNFs
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a VNF
    Show(ShowArgs),
    /// Update a VNF
    Update {
        /// Name or ID
        id: String,
        /// YAML file with the new VNF configuration
        #[arg(long, conflicts_with = "param_file")]
        config_file: Option<PathBuf>,
        /// YAML file with new template parameter values
        #[arg(long)]
        param_file: Option<PathBuf>,
    },
    /// Delete VNFs
    Delete {
        #[command(flatten)]
        ids: DeleteArgs,
        /// Force the deletion
        #[arg(long)]
        force: bool,
    },
    /// Scale a VNF
    Scale {
        /// Name or ID
        id: String,
        /// Scaling direction
        #[arg(long = "scaling-type", value_enum)]
        scaling_type: ScalingType,
        /// Name of the scaling policy
        #[arg(long = "scaling-policy-name")]
        policy: String,
    },
    /// List resources of a VNF
    Resources(ShowArgs),
}

/// Direction of VNF scaling.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalingType {
    /// Remove instances
    In,
    /// Add instances
    Out,
}

/// VIM commands.
#[derive(Subcommand, Debug)]
pub enum VimCommand {
    /// Register a VIM
    Register {
        /// Name of the VIM
        name: String,
        /// YAML file with the VIM configuration
        #[arg(long)]
        config_file: PathBuf,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Make this VIM the default one
        #[arg(long)]
        is_default: bool,
    },
    /// List VIMs
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a VIM
    Show(ShowArgs),
    /// Update a VIM
    Update {
        /// Name or ID
        id: String,
        /// YAML file with the new VIM configuration
        #[arg(long)]
        config_file: Option<PathBuf>,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// Whether this VIM is the default one
        #[arg(long)]
        is_default: Option<bool>,
    },
    /// Deregister VIMs
    Delete(DeleteArgs),
}

/// Event commands.
#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// List events
    List {
        /// Resource type of the events
        #[arg(long)]
        resource_type: Option<String>,
        /// ID of the resource
        #[arg(long)]
        resource_id: Option<String>,
        /// Event type
        #[arg(long)]
        event_type: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show an event
    Show {
        /// Event ID
        id: String,
    },
}

/// VNFFGD commands.
#[derive(Subcommand, Debug)]
pub enum VnffgdCommand {
    /// Create a VNFFGD
    Create {
        /// Name of the VNFFGD
        name: String,
        /// YAML file with the VNFFGD template
        #[arg(long)]
        vnffgd_file: PathBuf,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List VNFFGDs
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a VNFFGD
    Show(ShowArgs),
    /// Delete VNFFGDs
    Delete(DeleteArgs),
}

/// VNFFG commands.
#[derive(Subcommand, Debug)]
pub enum VnffgCommand {
    /// Create a VNFFG
    Create {
        /// Name of the VNFFG
        name: String,
        /// VNFFGD name or ID
        #[arg(long)]
        vnffgd: String,
        /// Mapping of VNFD names to VNF names or IDs, e.g. VNFD1:vnf1,VNFD2:vnf2
        #[arg(long)]
        vnf_mapping: Option<String>,
        /// Create a symmetrical chain
        #[arg(long)]
        symmetrical: bool,
        /// YAML file with template parameter values
        #[arg(long)]
        param_file: Option<PathBuf>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List VNFFGs
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a VNFFG
    Show(ShowArgs),
    /// Update a VNFFG
    Update {
        /// Name or ID
        id: String,
        /// Mapping of VNFD names to VNF names or IDs
        #[arg(long)]
        vnf_mapping: Option<String>,
        /// Make the chain symmetrical
        #[arg(long)]
        symmetrical: Option<bool>,
        /// YAML file with the new VNFFGD template
        #[arg(long)]
        vnffgd_template: Option<PathBuf>,
    },
    /// Delete VNFFGs
    Delete(DeleteArgs),
    /// Network forwarding paths
    #[command(subcommand)]
    Nfp(ComponentCommand),
    /// Service function chains
    #[command(subcommand)]
    Chain(ComponentCommand),
    /// Flow classifiers
    #[command(subcommand)]
    Classifier(ComponentCommand),
}

/// Read-only VNFFG components.
#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// List items
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show an item
    Show(ShowArgs),
}

/// NSD commands.
#[derive(Subcommand, Debug)]
pub enum NsdCommand {
    /// Create an NSD
    Create {
        /// Name of the NSD
        name: String,
        /// YAML file with the NSD template
        #[arg(long)]
        nsd_file: PathBuf,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List NSDs
    List {
        /// Template source (onboarded, inline, all)
        #[arg(long)]
        template_source: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show an NSD
    Show(ShowArgs),
    /// Show the template of an NSD
    Template(ShowArgs),
    /// Delete NSDs
    Delete(DeleteArgs),
}

/// NS commands.
#[derive(Subcommand, Debug)]
pub enum NsCommand {
    /// Create a network service
    Create {
        /// Name of the network service
        name: String,
        /// NSD name or ID
        #[arg(long, conflicts_with = "nsd_template")]
        nsd: Option<String>,
        /// YAML file with an inline NSD template
        #[arg(long)]
        nsd_template: Option<PathBuf>,
        /// VIM name or ID
        #[arg(long)]
        vim: Option<String>,
        /// YAML file with template parameter values
        #[arg(long)]
        param_file: Option<PathBuf>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List network services
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a network service
    Show(ShowArgs),
    /// Delete network services
    Delete {
        #[command(flatten)]
        ids: DeleteArgs,
        /// Force the deletion
        #[arg(long)]
        force: bool,
    },
}

/// Extension commands.
#[derive(Subcommand, Debug)]
pub enum ExtensionCommand {
    /// List API extensions
    List,
    /// Show an API extension
    Show {
        /// Extension alias
        alias: String,
    },
}

/// VNF package commands.
#[derive(Subcommand, Debug)]
pub enum VnfPackageCommand {
    /// Create a VNF package
    Create {
        /// User defined data as KEY=VALUE (repeatable)
        #[arg(long = "user-data", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        user_data: Vec<(String, String)>,
    },
    /// List VNF packages
    List {
        #[command(flatten)]
        list: EtsiListArgs,
    },
    /// Show a VNF package
    Show(ShowArgs),
    /// Update a VNF package
    Update {
        /// VNF package ID
        id: String,
        /// New operational state (ENABLED, DISABLED)
        #[arg(long)]
        operational_state: Option<String>,
        /// User defined data to set as KEY=VALUE (repeatable)
        #[arg(long = "user-data", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        user_data: Vec<(String, String)>,
        /// User defined data keys to remove (repeatable)
        #[arg(long = "user-data-delete-key")]
        delete_keys: Vec<String>,
    },
    /// Delete VNF packages
    Delete(DeleteArgs),
    /// Upload the content of a VNF package
    Upload {
        /// VNF package ID
        id: String,
        /// Local ZIP file
        #[arg(long, required_unless_present = "url", conflicts_with = "url")]
        path: Option<PathBuf>,
        /// URL to fetch the package from
        #[arg(long)]
        url: Option<String>,
        /// User name for the URL
        #[arg(long, requires = "url")]
        user_name: Option<String>,
        /// Password for the URL
        #[arg(long, requires = "url")]
        password: Option<String>,
    },
    /// Download the content of a VNF package
    Download {
        /// VNF package ID
        id: String,
        /// Output file
        #[arg(long)]
        file: PathBuf,
    },
    /// Download the VNFD of a VNF package
    DownloadVnfd {
        /// VNF package ID
        id: String,
        /// Output file (stdout for text VNFDs if not set)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Format: zip, text or both
        #[arg(long, default_value = "zip")]
        vnfd_format: String,
    },
    /// Fetch an artifact of a VNF package
    Artifact {
        /// VNF package ID
        id: String,
        /// Artifact path inside the package
        artifact_path: String,
        /// Output file
        #[arg(long)]
        file: PathBuf,
    },
}

/// VNF LCM commands.
#[derive(Subcommand, Debug)]
pub enum VnflcmCommand {
    /// Create a VNF instance identifier
    Create {
        /// VNFD ID
        vnfd_id: String,
        /// Name of the VNF instance
        #[arg(long)]
        name: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Instantiate the VNF with this request file right after creation
        #[arg(long = "instantiate-file", short = 'I')]
        instantiate_file: Option<PathBuf>,
    },
    /// List VNF instances
    List {
        #[command(flatten)]
        list: EtsiListArgs,
    },
    /// Show a VNF instance
    Show(ShowArgs),
    /// Update a VNF instance
    Update {
        /// VNF instance ID
        id: String,
        /// JSON or YAML file with the modifications
        #[arg(long = "I")]
        file: PathBuf,
    },
    /// Delete VNF instance identifiers
    Delete(DeleteArgs),
    /// Instantiate a VNF
    Instantiate {
        /// VNF instance ID
        id: String,
        /// JSON or YAML file with the instantiation request
        file: PathBuf,
    },
    /// Terminate a VNF
    Terminate {
        /// VNF instance ID
        id: String,
        /// Terminate gracefully
        #[arg(long)]
        graceful: bool,
        /// Graceful termination timeout in seconds
        #[arg(long, requires = "graceful")]
        graceful_termination_timeout: Option<u64>,
        /// Delete the VNF instance identifier after termination
        #[arg(long = "D")]
        delete: bool,
    },
    /// Heal a VNF
    Heal {
        /// VNF instance ID
        id: String,
        /// Cause of healing
        #[arg(long)]
        cause: Option<String>,
        /// VNFC instances to heal (repeatable)
        #[arg(long = "vnfc-instance")]
        vnfc_instances: Vec<String>,
        /// JSON or YAML file with additional parameters
        #[arg(long)]
        additional_param_file: Option<PathBuf>,
    },
    /// Scale a VNF
    Scale {
        /// VNF instance ID
        id: String,
        /// Scaling type
        #[arg(long = "type", value_parser = ["SCALE_IN", "SCALE_OUT"])]
        scale_type: String,
        /// Scaling aspect
        #[arg(long)]
        aspect_id: String,
        /// Number of scaling steps
        #[arg(long, default_value_t = 1)]
        number_of_steps: u32,
        /// JSON or YAML file with additional parameters
        #[arg(long)]
        additional_param_file: Option<PathBuf>,
    },
    /// Change external connectivity of a VNF
    ChangeExtConn {
        /// VNF instance ID
        id: String,
        /// JSON or YAML file with the request
        file: PathBuf,
    },
    /// Change the VNF package of a VNF (API version 2)
    ChangeVnfpkg {
        /// VNF instance ID
        id: String,
        /// JSON or YAML file with the request
        file: PathBuf,
    },
    /// Show supported API versions
    Versions {
        /// Major version (1 or 2)
        #[arg(long)]
        major_version: Option<String>,
    },
    /// LCM operation occurrences
    #[command(subcommand)]
    Op(OpCommand),
    /// Lifecycle change notification subscriptions
    #[command(subcommand)]
    Subsc(SubscriptionCommand),
}

/// VNF LCM operation occurrence commands.
#[derive(Subcommand, Debug)]
pub enum OpCommand {
    /// List operation occurrences
    List {
        #[command(flatten)]
        list: EtsiListArgs,
    },
    /// Show an operation occurrence
    Show(ShowArgs),
    /// Roll back a failed operation
    Rollback(ShowArgs),
    /// Retry a failed operation
    Retry(ShowArgs),
    /// Mark a failed operation as finally failed
    Fail(ShowArgs),
    /// Cancel an operation
    Cancel {
        /// Operation occurrence ID
        id: String,
        /// GRACEFUL or FORCEFUL
        #[arg(long, default_value = "GRACEFUL")]
        cancel_mode: String,
    },
}

/// Subscription commands.
#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// Create a subscription
    Create {
        /// JSON or YAML file with the subscription request
        file: PathBuf,
    },
    /// List subscriptions
    List {
        #[command(flatten)]
        list: EtsiListArgs,
    },
    /// Show a subscription
    Show(ShowArgs),
    /// Delete subscriptions
    Delete(DeleteArgs),
}

/// VNF FM commands.
#[derive(Subcommand, Debug)]
pub enum VnffmCommand {
    /// Alarms
    #[command(subcommand)]
    Alarm(AlarmCommand),
    /// Fault management subscriptions
    #[command(subcommand)]
    Subsc(SubscriptionCommand),
}

/// Alarm commands.
#[derive(Subcommand, Debug)]
pub enum AlarmCommand {
    /// List alarms
    List {
        #[command(flatten)]
        list: EtsiListArgs,
    },
    /// Show an alarm
    Show(ShowArgs),
    /// Acknowledge or unacknowledge an alarm
    Update {
        /// Alarm ID
        id: String,
        /// ACKNOWLEDGED or UNACKNOWLEDGED
        #[arg(long, value_parser = ["ACKNOWLEDGED", "UNACKNOWLEDGED"])]
        ack_state: String,
    },
}

/// VNF PM commands.
#[derive(Subcommand, Debug)]
pub enum VnfpmCommand {
    /// PM jobs
    #[command(subcommand)]
    Job(PmCommand),
    /// PM reports
    #[command(subcommand)]
    Report(ReportCommand),
    /// PM thresholds
    #[command(subcommand)]
    Threshold(PmCommand),
}

/// PM job and threshold commands.
#[derive(Subcommand, Debug)]
pub enum PmCommand {
    /// Create an item
    Create {
        /// JSON or YAML file with the request
        file: PathBuf,
    },
    /// List items
    List {
        #[command(flatten)]
        list: EtsiListArgs,
    },
    /// Show an item
    Show(ShowArgs),
    /// Update an item
    Update {
        /// ID
        id: String,
        /// JSON or YAML file with the modifications
        file: PathBuf,
    },
    /// Delete items
    Delete(DeleteArgs),
}

/// PM report commands.
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Show a report
    Show {
        /// PM job ID
        job_id: String,
        /// Report ID
        report_id: String,
    },
}

/// Parse a KEY=VALUE pair.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {}", s)),
    }
}

#[cfg(test)]
pub mod test {
    use clap::{CommandFactory, Parser};

    use super::{parse_key_value, Cli, Command, VnfCommand};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_vnf_delete() {
        let cli = Cli::parse_from(["tacker", "--retries", "3", "vnf", "delete", "a", "b", "--force"]);
        assert_eq!(cli.global.retries, Some(3));
        match cli.command {
            Command::Vnf(VnfCommand::Delete { ids, force }) => {
                assert_eq!(ids.ids, vec!["a", "b"]);
                assert!(force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("key=a=b").unwrap(),
            ("key".to_string(), "a=b".to_string())
        );
        parse_key_value("=x").err().unwrap();
        parse_key_value("novalue").err().unwrap();
    }
}
