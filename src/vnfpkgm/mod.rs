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

//! VNF package management API (`/vnfpkgm/v1`).

mod api;
mod protocol;

pub use self::api::{
    create_vnf_package, delete_vnf_package, download_vnf_package, download_vnfd, fetch_artifact,
    list_vnf_packages, show_vnf_package, update_vnf_package, upload_vnf_package_content,
    upload_vnf_package_file, upload_vnf_package_from_uri,
};
pub use self::protocol::{VnfdFormat, API_ROOT};
