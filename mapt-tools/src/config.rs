//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use std::time::Duration;

use mapt_oracle::PollPolicy;
use mapt_oracle::topology::Topology;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // Scenarios to run. Empty means all of them.
    pub scenarios: Vec<String>,
    pub logging: Logging,
    pub poll: Poll,
    pub topology: Topology,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub stdout: LoggingStdout,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingStdout {
    pub enabled: bool,
    pub style: LoggingFmtStyle,
    pub colors: bool,
    pub show_thread_id: bool,
    pub show_source: bool,
}

#[derive(Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFmtStyle {
    Compact,
    Full,
    Json,
    Pretty,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Poll {
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

// ===== impl Config =====

impl Config {
    const DFLT_FILEPATH: &'static str = "/etc/mapt.toml";

    pub(crate) fn load(config_file: Option<&str>) -> Config {
        let config_file = config_file.unwrap_or(Config::DFLT_FILEPATH);

        match std::fs::read_to_string(config_file) {
            Ok(config_str) => match Config::parse(&config_str) {
                Ok(config) => config,
                Err(error) => {
                    eprintln!("Failed to parse configuration file: {error}");
                    std::process::exit(1);
                }
            },
            Err(error) => {
                eprintln!("Failed to load configuration file: {error}");
                eprintln!("Falling back to default configuration...");
                Config::default()
            }
        }
    }

    pub(crate) fn parse(config_str: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(config_str)
    }
}

// ===== impl LoggingStdout =====

impl Default for LoggingStdout {
    fn default() -> LoggingStdout {
        LoggingStdout {
            enabled: true,
            style: LoggingFmtStyle::Compact,
            colors: false,
            show_thread_id: false,
            show_source: false,
        }
    }
}

// ===== impl Poll =====

impl Poll {
    pub(crate) fn policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_millis(self.interval_ms),
            Duration::from_millis(self.timeout_ms),
        )
    }
}

impl Default for Poll {
    fn default() -> Poll {
        let policy = PollPolicy::default();
        Poll {
            interval_ms: policy.interval.as_millis() as u64,
            timeout_ms: policy.timeout.as_millis() as u64,
        }
    }
}

// ===== unit tests =====
