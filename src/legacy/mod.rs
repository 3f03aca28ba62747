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

//! Legacy `/v1.0` NFV orchestration API.
//!
//! Bodies are JSON objects wrapped under the resource name on the wire
//! (`{"vnf": {...}}`). The functions here accept and return the inner
//! objects. Collection names are taken from the session's
//! [Plurals](../common/struct.Plurals.html).

mod api;
mod protocol;

pub use self::api::{
    create_ns, create_nsd, create_vim, create_vnf, create_vnfd, create_vnffg, create_vnffgd,
    delete_ns, delete_nsd, delete_vim, delete_vnf, delete_vnfd, delete_vnffg, delete_vnffgd,
    list_classifiers, list_events, list_extensions, list_nfps, list_nsds, list_nss, list_sfcs,
    list_vims, list_vnf_resources, list_vnfds, list_vnffgds, list_vnffgs, list_vnfs, scale_vnf,
    show_classifier, show_event, show_extension, show_nfp, show_ns, show_nsd, show_sfc, show_vim,
    show_vnf, show_vnfd, show_vnffg, show_vnffgd, update_vim, update_vnf, update_vnffg,
};
pub use self::protocol::{ScaleType, API_ROOT, DEFAULT_DESC_LENGTH, DEFAULT_ERROR_REASON_LENGTH};
