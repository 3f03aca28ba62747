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

//! Legacy API details.

use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorKind, Result};

/// Root of the legacy API.
pub const API_ROOT: &str = "v1.0";

/// Length at which `error_reason` of VNFs is cut in listings.
pub const DEFAULT_ERROR_REASON_LENGTH: usize = 100;

/// Length at which descriptions of VNFDs and NSDs are cut in listings.
pub const DEFAULT_DESC_LENGTH: usize = 25;

/// Direction of a VNF scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    /// Remove instances.
    In,
    /// Add instances.
    Out,
}

impl ScaleType {
    /// String representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleType::In => "in",
            ScaleType::Out => "out",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<ScaleType> {
        match s {
            "in" => Ok(ScaleType::In),
            "out" => Ok(ScaleType::Out),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid scaling type {}, expected in or out", s),
            )),
        }
    }
}
