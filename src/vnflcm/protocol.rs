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

//! VNF lifecycle management API details.

use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorKind, Result};

pub(crate) const API_NAME: &str = "vnflcm";
pub(crate) const INSTANCES: &str = "vnf_instances";
pub(crate) const OP_OCCS: &str = "vnf_lcm_op_occs";
pub(crate) const SUBSCRIPTIONS: &str = "subscriptions";

/// Major version of the VNF LCM API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LcmVersion {
    /// SOL003 v2.6.1 based API.
    #[default]
    V1,
    /// SOL003 v3.3.1 based API.
    V2,
}

impl LcmVersion {
    /// Path segment of this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            LcmVersion::V1 => "v1",
            LcmVersion::V2 => "v2",
        }
    }

    /// Value of the `Version` header, if the API needs one.
    pub fn header(&self) -> Option<&'static str> {
        match self {
            LcmVersion::V1 => None,
            LcmVersion::V2 => Some("2.0.0"),
        }
    }
}

impl fmt::Display for LcmVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LcmVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<LcmVersion> {
        match s {
            "1" | "v1" => Ok(LcmVersion::V1),
            "2" | "v2" => Ok(LcmVersion::V2),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Unsupported VNF LCM API version {}", s),
            )),
        }
    }
}

/// Mode of cancelling an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CancelMode {
    /// Wait for the current resource operation to finish.
    Graceful,
    /// Stop immediately.
    Forceful,
}

impl FromStr for CancelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<CancelMode> {
        match s.to_uppercase().as_str() {
            "GRACEFUL" => Ok(CancelMode::Graceful),
            "FORCEFUL" => Ok(CancelMode::Forceful),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid cancel mode {}", s),
            )),
        }
    }
}

#[cfg(test)]
pub mod test {
    use serde_json::json;

    use super::{CancelMode, LcmVersion};

    #[test]
    fn test_version() {
        assert_eq!("2".parse::<LcmVersion>().unwrap(), LcmVersion::V2);
        assert_eq!(LcmVersion::V2.header(), Some("2.0.0"));
        assert_eq!(LcmVersion::V1.header(), None);
        "3".parse::<LcmVersion>().err().unwrap();
    }

    #[test]
    fn test_cancel_mode() {
        let mode: CancelMode = "forceful".parse().unwrap();
        assert_eq!(serde_json::to_value(mode).unwrap(), json!("FORCEFUL"));
    }
}
