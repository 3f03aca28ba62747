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

//! VNF fault management API (`/vnffm/v1`).

mod api;

pub use self::api::{
    create_fm_subscription, delete_fm_subscription, list_alarms, list_fm_subscriptions,
    show_alarm, show_fm_subscription, update_alarm, API_ROOT, API_VERSION,
};
