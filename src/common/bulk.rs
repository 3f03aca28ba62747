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

//! Deleting several resources at once.

use std::future::Future;

use crate::{Error, ErrorKind, Result};

/// Delete every resource in `ids`, continuing past failures.
///
/// Deletions run one after another in the given order. If any of them fails,
/// the returned error lists every failed ID with its cause.
pub async fn bulk_delete<I, S, F, Fut>(resource: &str, ids: I, mut deleter: F) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut total = 0;
    let mut failures = Vec::new();
    for id in ids {
        let id = id.as_ref().to_string();
        total += 1;
        match deleter(id.clone()).await {
            Ok(()) => info!("{} '{}' deleted successfully", resource, id),
            Err(err) => {
                debug!("Failed to delete {} {}: {}", resource, id, err);
                failures.push((id, err));
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::CommandError,
            failure_message(resource, total, &failures),
        ))
    }
}

fn failure_message(resource: &str, total: usize, failures: &[(String, Error)]) -> String {
    let mut msg = format!(
        "Failed to delete {} of {} {}(s).",
        failures.len(),
        total,
        resource
    );
    for (id, err) in failures {
        msg.push_str(&format!("\nCannot delete {}: {}", id, err));
    }
    msg
}
