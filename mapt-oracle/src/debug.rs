//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use mapt_cmdu::{Cmdu, SchemaError};
use mapt_utils::mac_addr::MacAddr;
use tracing::{debug, debug_span};

use crate::capture::MalformedFrame;
use crate::device::CapturedFrame;
use crate::error::Query;
use crate::message::CapturedMessage;

// Oracle debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    ScenarioStart,
    ScenarioPass,
    ScenarioSkip(&'a str),
    // Exchange
    CmduTx(&'a str, &'a MacAddr, &'a Cmdu),
    // Capture
    CaptureStart(&'a str),
    CaptureReset(usize),
    CmduCaptured(&'a CapturedMessage),
    CaptureMalformed(&'a MalformedFrame),
    CaptureUnregistered(&'a CapturedFrame, &'a SchemaError),
    PollExhausted(&'a Query),
    LogLineMatch(&'a str, &'a str),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::ScenarioStart | Debug::ScenarioPass => {
                // Parent span(s): scenario
                debug!("{}", self);
            }
            Debug::ScenarioSkip(reason) => {
                // Parent span(s): scenario
                debug!(%reason, "{}", self);
            }
            Debug::CmduTx(device, dst, cmdu) => {
                // Parent span(s): scenario
                debug_span!("exchange").in_scope(|| {
                    let data = serde_json::to_string(&cmdu).unwrap();
                    debug!(%device, %dst, msg_id = %cmdu.msg_id, %data, "{}", self);
                })
            }
            Debug::CaptureStart(label) => {
                // Parent span(s): scenario
                debug_span!("capture").in_scope(|| {
                    debug!(%label, "{}", self);
                })
            }
            Debug::CaptureReset(seen) => {
                // Parent span(s): scenario
                debug_span!("capture").in_scope(|| {
                    debug!(%seen, "{}", self);
                })
            }
            Debug::CmduCaptured(msg) => {
                // Parent span(s): scenario
                debug_span!("capture").in_scope(|| {
                    let data = serde_json::to_string(&msg.cmdu).unwrap();
                    debug!(seq = %msg.seq, src = %msg.src, dst = %msg.dst, %data, "{}", self);
                })
            }
            Debug::CaptureMalformed(frame) => {
                // Parent span(s): scenario
                debug_span!("capture").in_scope(|| {
                    debug!(src = %frame.src, dst = %frame.dst, error = %frame.error, "{}", self);
                })
            }
            Debug::CaptureUnregistered(frame, error) => {
                // Parent span(s): scenario
                debug_span!("capture").in_scope(|| {
                    debug!(src = %frame.src, dst = %frame.dst, %error, "{}", self);
                })
            }
            Debug::PollExhausted(query) => {
                // Parent span(s): scenario
                debug!(%query, "{}", self);
            }
            Debug::LogLineMatch(device, line) => {
                // Parent span(s): scenario
                debug!(%device, %line, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::ScenarioStart => {
                write!(f, "starting scenario")
            }
            Debug::ScenarioPass => {
                write!(f, "scenario passed")
            }
            Debug::ScenarioSkip(..) => {
                write!(f, "skipping scenario")
            }
            Debug::CmduTx(_, _, cmdu) => {
                write!(f, "sending {}", cmdu.msg_type)
            }
            Debug::CaptureStart(..) => {
                write!(f, "capture started")
            }
            Debug::CaptureReset(..) => {
                write!(f, "capture window reset")
            }
            Debug::CmduCaptured(msg) => {
                write!(f, "captured {}", msg.cmdu.msg_type)
            }
            Debug::CaptureMalformed(..) => {
                write!(f, "captured malformed frame")
            }
            Debug::CaptureUnregistered(..) => {
                write!(f, "dropped frame outside the registry")
            }
            Debug::PollExhausted(..) => {
                write!(f, "poll bound exhausted")
            }
            Debug::LogLineMatch(..) => {
                write!(f, "log line matched")
            }
        }
    }
}
