//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::Arc;

use regex::Regex;

use crate::debug::Debug;
use crate::device::Device;
use crate::error::{Error, Query};
use crate::poll::PollPolicy;

// Follows a device log, matching each expected line after the previous one.
pub struct LogWatcher {
    device: Arc<dyn Device>,
    // Number of log lines already consumed.
    position: usize,
}

// ===== impl LogWatcher =====

impl LogWatcher {
    // Starts watching from the current end of the device log.
    pub async fn new(device: Arc<dyn Device>) -> Result<LogWatcher, Error> {
        let position = device.read_log().await?.lines().count();
        Ok(LogWatcher { device, position })
    }

    // Starts watching from the beginning of the device log.
    pub fn from_start(device: Arc<dyn Device>) -> LogWatcher {
        LogWatcher {
            device,
            position: 0,
        }
    }

    // Waits for a line matching `pattern` past the last matched line.
    pub async fn await_line(
        &mut self,
        pattern: &str,
        poll: &PollPolicy,
    ) -> Result<String, Error> {
        let regex = compile(pattern)?;
        let device = &*self.device;
        let position = self.position;
        let regex = &regex;
        let found = poll
            .poll(move || async move {
                let log = device.read_log().await?;
                let found = log
                    .lines()
                    .enumerate()
                    .skip(position)
                    .find(|(_, line)| regex.is_match(line))
                    .map(|(idx, line)| (idx, line.to_owned()));
                Ok(found)
            })
            .await?;

        match found {
            Some((idx, line)) => {
                Debug::LogLineMatch(self.device.name(), &line).log();
                self.position = idx + 1;
                Ok(line)
            }
            None => Err(not_found(&*self.device, pattern)),
        }
    }
}

impl std::fmt::Debug for LogWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogWatcher")
            .field("device", &self.device.name())
            .field("position", &self.position)
            .finish()
    }
}

// ===== global functions =====

// Waits for any line of the device log to match `pattern`.
pub async fn await_log_line(
    device: Arc<dyn Device>,
    pattern: &str,
    poll: &PollPolicy,
) -> Result<String, Error> {
    LogWatcher::from_start(device).await_line(pattern, poll).await
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern)
        .map_err(|error| Error::InvalidPattern(pattern.to_owned(), error))
}

fn not_found(device: &dyn Device, pattern: &str) -> Error {
    let query = Query::LogLine(device.name().to_owned(), pattern.to_owned());
    Debug::PollExhausted(&query).log();
    Error::NotFound(query)
}

// ===== unit tests =====
