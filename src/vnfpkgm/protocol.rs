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

//! VNF package management API details.

use std::str::FromStr;

use crate::common::protocol::ZIP;
use crate::{Error, ErrorKind, Result};

/// Root of the API.
pub const API_ROOT: &[&str] = &["vnfpkgm", "v1"];
pub(crate) const PACKAGES: &str = "vnf_packages";
pub(crate) const CONTENT: &str = "package_content";

/// Format in which to download a VNFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VnfdFormat {
    /// ZIP archive with all VNFD files.
    #[default]
    Zip,
    /// A single YAML file (only works for single-file VNFDs).
    Text,
    /// Let the server decide between the two.
    Both,
}

impl VnfdFormat {
    /// Value of the `Accept` header.
    pub fn accept(&self) -> &'static str {
        match self {
            VnfdFormat::Zip => ZIP,
            VnfdFormat::Text => "text/plain",
            VnfdFormat::Both => "text/plain,application/zip",
        }
    }
}

impl FromStr for VnfdFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<VnfdFormat> {
        match s {
            "application/zip" | "zip" => Ok(VnfdFormat::Zip),
            "text/plain" | "text" => Ok(VnfdFormat::Text),
            "both" => Ok(VnfdFormat::Both),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid VNFD format {}", s),
            )),
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::VnfdFormat;

    #[test]
    fn test_vnfd_format() {
        assert_eq!("text/plain".parse::<VnfdFormat>().unwrap(), VnfdFormat::Text);
        assert_eq!("zip".parse::<VnfdFormat>().unwrap().accept(), "application/zip");
        assert_eq!(VnfdFormat::Both.accept(), "text/plain,application/zip");
        "tar".parse::<VnfdFormat>().err().unwrap();
    }
}
