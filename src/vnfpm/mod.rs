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

//! VNF performance management API (`/vnfpm/v2`).

mod api;

pub use self::api::{
    create_pm_job, create_threshold, delete_pm_job, delete_threshold, list_pm_jobs,
    list_thresholds, show_pm_job, show_report, show_threshold, update_pm_job, update_threshold,
    API_ROOT, API_VERSION,
};
