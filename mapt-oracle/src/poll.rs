//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::Error;

// Bounded retry policy used while waiting for an expected observation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

// ===== impl PollPolicy =====

impl PollPolicy {
    pub const DFLT_INTERVAL: Duration = Duration::from_millis(100);
    pub const DFLT_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn new(interval: Duration, timeout: Duration) -> PollPolicy {
        PollPolicy { interval, timeout }
    }

    // Retries `attempt` until it yields a value or the timeout expires.
    //
    // The first attempt is always made, even with a zero timeout. Errors
    // returned by `attempt` end the poll immediately.
    pub async fn poll<T, F, Fut>(&self, mut attempt: F) -> Result<Option<T>, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, Error>>,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(value) = attempt().await? {
                return Ok(Some(value));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(self.interval.min(deadline - now)).await;
        }
    }
}

impl Default for PollPolicy {
    fn default() -> PollPolicy {
        PollPolicy {
            interval: Self::DFLT_INTERVAL,
            timeout: Self::DFLT_TIMEOUT,
        }
    }
}

// ===== unit tests =====
