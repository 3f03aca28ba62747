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

//! VNF lifecycle management API (`/vnflcm/v1` and `/vnflcm/v2`).
//!
//! Every call takes the [LcmVersion](enum.LcmVersion.html) to use. Version 2
//! requests carry the `Version: 2.0.0` header.

mod api;
mod protocol;

pub use self::api::{
    cancel_vnf_lcm_op_occ, change_ext_conn_vnf_instance, change_vnfpkg_vnf_instance,
    create_lccn_subscription, create_vnf_instance, delete_lccn_subscription, delete_vnf_instance,
    fail_vnf_lcm_op_occ, heal_vnf_instance, instantiate_vnf_instance, list_lccn_subscriptions,
    list_vnf_instances, list_vnf_lcm_op_occs, retry_vnf_lcm_op_occ, rollback_vnf_lcm_op_occ,
    scale_vnf_instance, show_api_versions, show_lccn_subscription, show_vnf_instance,
    show_vnf_lcm_op_occ, terminate_vnf_instance, update_vnf_instance,
};
pub use self::protocol::{CancelMode, LcmVersion};
