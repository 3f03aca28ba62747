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

//! Types and helpers shared by all API parts.

mod bulk;
mod find;
pub mod pagination;
pub(crate) mod protocol;
mod types;

pub use self::bulk::bulk_delete;
pub use self::find::{find_in_list, find_resource_id};
pub use self::pagination::{linked_pages, list_all, list_all_linked, pages};
pub use self::types::{Plurals, ResourceView};
