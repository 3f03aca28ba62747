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

//! Authentication modules.
//!
//! Accessing Tacker requires a Keystone token in most deployments. This
//! module defines the [AuthType](trait.AuthType.html) trait implemented by
//! the [identity](../identity/index.html) authentication types, as well as a
//! [NoAuth](struct.NoAuth.html) type for talking to a known endpoint
//! directly.
//!
//! The usual workflow for connecting to Tacker is as follows:
//!
//! 1. Create a suitable authentication type.
//! 2. Create a [Session](../session/struct.Session.html) with it.
//! 3. Pass a reference to the session to the API functions.
//!
//! # Examples
//!
//! Talking to an endpoint directly with a pre-issued token:
//!
//! ```
//! use tackerclient::auth::NoAuth;
//! use tackerclient::Session;
//!
//! let auth = NoAuth::new("http://tacker.local:9890/").unwrap().with_token("gAAAA...");
//! let session = Session::new(auth);
//! ```

mod base;
mod simple;

pub use self::base::{AuthType, EndpointFilters, InterfaceType};
pub use self::simple::NoAuth;
