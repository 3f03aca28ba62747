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

//! OpenStack Tacker client in Rust.
//!
//! The goal of this project is to provide a simple API for working with the
//! Tacker NFV orchestration service: the legacy `/v1.0` API (VNFDs, VNFs,
//! VIMs, VNF forwarding graphs, network services) and the ETSI SOL APIs
//! (VNF packages, VNF lifecycle management, fault management and
//! performance management).
//!
//! # Usage
//!
//! Start with creating a [Session](struct.Session.html), either from an
//! [authentication type](auth/index.html) or from a
//! [CloudConfig](config/struct.CloudConfig.html), then pass a reference to it
//! to the API functions:
//!
//! ```rust,no_run
//! use tackerclient::auth::NoAuth;
//! use tackerclient::{legacy, Session};
//!
//! # async fn example() -> tackerclient::Result<()> {
//! let auth = NoAuth::new("http://tacker.local:9890/")?.with_token("gAAAA...");
//! let session = Session::new(auth).with_retries(3);
//! for vnf in legacy::list_vnfs(&session, &Default::default()).await? {
//!     println!("{}", vnf["name"]);
//! }
//! # Ok(()) }
//! ```
//!
//! # Features
//!
//! * `legacy`: the `/v1.0` API.
//! * `vnfpkgm`, `vnflcm`, `vnffm`, `vnfpm`: the ETSI SOL APIs.
//! * `cli`: the `tacker` command-line tool.
//! * `native-tls` (default) or `rustls`: TLS implementation.

#![crate_name = "tackerclient"]
#![crate_type = "lib"]
// NOTE: we do not use generic deny(warnings) to avoid breakages with new
// versions of the compiler. Add more warnings here as you discover them.
// Taken from https://github.com/rust-unofficial/patterns/
#![deny(
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    while_true
)]
#![cfg_attr(test, allow(missing_docs, unused_qualifications, unused_results))]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod auth;
pub mod common;
pub mod config;
mod error;
pub mod identity;
#[cfg(feature = "legacy")]
pub mod legacy;
mod session;
pub mod utils;
#[cfg(feature = "vnffm")]
pub mod vnffm;
#[cfg(feature = "vnflcm")]
pub mod vnflcm;
#[cfg(feature = "vnfpkgm")]
pub mod vnfpkgm;
#[cfg(feature = "vnfpm")]
pub mod vnfpm;

pub use crate::common::{Plurals, ResourceView};
pub use crate::config::CloudConfig;
pub use crate::error::{fault_kind, from_fault, status_kind, Error, ErrorKind, Result, MAX_URI_LEN};
pub use crate::session::{Request, RequestBody, Session, DEFAULT_RETRY_INTERVAL, SERVICE_TYPE};
pub use crate::utils::Query;
