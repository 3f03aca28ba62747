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

//! Command-line client for OpenStack Tacker.

#![deny(unsafe_code, unused_qualifications)]

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod output;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let debug = cli.global.debug;

    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    tokio::select! {
        result = commands::run(cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                if debug {
                    eprintln!("{:?}", err);
                } else {
                    eprintln!("{:#}", err);
                }
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            ExitCode::from(130)
        }
    }
}
