//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![cfg_attr(
    feature = "testing",
    allow(dead_code, unused_variables, unused_imports)
)]

pub mod capture;
pub mod debug;
pub mod device;
pub mod error;
pub mod exchange;
pub mod invariant;
pub mod log;
pub mod message;
pub mod poll;
pub mod scenario;
#[cfg(feature = "sim")]
pub mod sim;
#[cfg(feature = "testing")]
pub mod test;
pub mod topology;

pub use capture::{Capture, MessageFilter};
pub use error::Error;
pub use message::{CapturedMessage, Envelope};
pub use poll::PollPolicy;
pub use scenario::{Scenario, ScenarioOutcome, TestBed, run_scenario};
pub use topology::Topology;
