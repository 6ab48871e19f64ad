//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use mapt_cmdu::{Cmdu, DecodeError, MessageType};
use mapt_utils::UnboundedReceiver;
use mapt_utils::mac_addr::MacAddr;
use mapt_utils::task::Task;
use serde::{Deserialize, Serialize};

use crate::debug::Debug;
use crate::device::CapturedFrame;
use crate::error::{Error, Query};
use crate::message::CapturedMessage;
use crate::poll::PollPolicy;

// Append-only buffer of captured messages.
//
// Cloning yields another handle to the same buffer. Queries only consider
// messages captured since the last reset.
#[derive(Clone, Debug, Default)]
pub struct Capture {
    buffer: Arc<Mutex<CaptureBuffer>>,
}

#[derive(Debug, Default)]
struct CaptureBuffer {
    messages: Vec<Arc<CapturedMessage>>,
    malformed: Vec<MalformedFrame>,
    next_seq: u64,
    // Start of the current window.
    window_start: usize,
    malformed_start: usize,
}

// Captured frame that couldn't be decoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MalformedFrame {
    pub src: MacAddr,
    pub dst: MacAddr,
    pub data: Bytes,
    pub error: DecodeError,
}

// Message predicate. Unset fields match anything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct MessageFilter {
    pub msg_type: Option<MessageType>,
    pub src: Option<MacAddr>,
    pub dst: Option<MacAddr>,
    pub msg_id: Option<u16>,
}

// ===== impl Capture =====

impl Capture {
    pub fn new() -> Capture {
        Default::default()
    }

    // Spawns the background collector feeding this buffer from a sniffer.
    pub fn start_collector(
        &self,
        mut frames_rx: UnboundedReceiver<CapturedFrame>,
    ) -> Task<()> {
        let capture = self.clone();
        Task::spawn(async move {
            while let Some(frame) = frames_rx.recv().await {
                capture.ingest(frame);
            }
        })
    }

    // Decodes a raw frame and appends it to the buffer.
    //
    // Frames carrying message types outside the registry are not part of
    // any exchange under test and are dropped after logging.
    pub fn ingest(&self, frame: CapturedFrame) {
        match Cmdu::decode(&frame.data) {
            Ok(cmdu) => {
                self.push(frame.src, frame.dst, cmdu);
            }
            Err(DecodeError::Schema(error)) => {
                Debug::CaptureUnregistered(&frame, &error).log();
            }
            Err(error) => {
                let frame = MalformedFrame {
                    src: frame.src,
                    dst: frame.dst,
                    data: frame.data,
                    error,
                };
                Debug::CaptureMalformed(&frame).log();
                self.buffer.lock().unwrap().malformed.push(frame);
            }
        }
    }

    // Appends an already decoded message to the buffer.
    pub fn push(
        &self,
        src: MacAddr,
        dst: MacAddr,
        cmdu: Cmdu,
    ) -> Arc<CapturedMessage> {
        let mut buffer = self.buffer.lock().unwrap();
        let msg = Arc::new(CapturedMessage {
            seq: buffer.next_seq,
            src,
            dst,
            cmdu,
        });
        buffer.next_seq += 1;
        buffer.messages.push(msg.clone());
        Debug::CmduCaptured(&msg).log();
        msg
    }

    // Starts a new query window. Previously captured messages are kept but
    // no longer considered by queries.
    pub fn reset(&self) {
        let mut buffer = self.buffer.lock().unwrap();
        buffer.window_start = buffer.messages.len();
        buffer.malformed_start = buffer.malformed.len();
        Debug::CaptureReset(buffer.window_start).log();
    }

    // Returns the messages of the current window, in capture order.
    pub fn snapshot(&self) -> Vec<Arc<CapturedMessage>> {
        let buffer = self.buffer.lock().unwrap();
        buffer.messages[buffer.window_start..].to_vec()
    }

    // Returns all messages of the current window matching `filter`.
    pub fn find_all(&self, filter: &MessageFilter) -> Vec<Arc<CapturedMessage>> {
        self.snapshot()
            .into_iter()
            .filter(|msg| filter.matches(msg))
            .collect()
    }

    // Returns the only message of the current window matching `filter`.
    pub fn find_single(
        &self,
        filter: &MessageFilter,
    ) -> Result<Arc<CapturedMessage>, Error> {
        let mut matches = self.find_all(filter);
        match matches.len() {
            0 => Err(Error::NotFound(Query::Message(filter.clone()))),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousMatch(
                Query::Message(filter.clone()),
                matches.iter().map(|msg| msg.to_string()).collect(),
            )),
        }
    }

    // Waits for exactly one message matching `filter`.
    //
    // An ambiguous match ends the wait immediately.
    pub async fn find_single_within(
        &self,
        filter: &MessageFilter,
        poll: &PollPolicy,
    ) -> Result<Arc<CapturedMessage>, Error> {
        let found = poll
            .poll(move || async move {
                match self.find_single(filter) {
                    Ok(msg) => Ok(Some(msg)),
                    Err(Error::NotFound(_)) => Ok(None),
                    Err(error) => Err(error),
                }
            })
            .await?;

        found.ok_or_else(|| {
            let query = Query::Message(filter.clone());
            Debug::PollExhausted(&query).log();
            Error::NotFound(query)
        })
    }

    // Fails if any frame of the current window couldn't be decoded.
    pub fn check_malformed(&self) -> Result<(), Error> {
        let buffer = self.buffer.lock().unwrap();
        match buffer.malformed[buffer.malformed_start..].first() {
            Some(frame) => Err(Error::Decode(frame.error.clone())),
            None => Ok(()),
        }
    }
}

// ===== impl MessageFilter =====

impl MessageFilter {
    pub fn new() -> MessageFilter {
        Default::default()
    }

    pub fn msg_type(mut self, msg_type: MessageType) -> MessageFilter {
        self.msg_type = Some(msg_type);
        self
    }

    pub fn src(mut self, src: MacAddr) -> MessageFilter {
        self.src = Some(src);
        self
    }

    pub fn dst(mut self, dst: MacAddr) -> MessageFilter {
        self.dst = Some(dst);
        self
    }

    pub fn msg_id(mut self, msg_id: u16) -> MessageFilter {
        self.msg_id = Some(msg_id);
        self
    }

    pub fn matches(&self, msg: &CapturedMessage) -> bool {
        self.msg_type.is_none_or(|msg_type| msg_type == msg.msg_type())
            && self.src.is_none_or(|src| src == msg.src)
            && self.dst.is_none_or(|dst| dst == msg.dst)
            && self.msg_id.is_none_or(|msg_id| msg_id == msg.msg_id())
    }
}

impl std::fmt::Display for MessageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields = vec![];
        if let Some(msg_type) = &self.msg_type {
            fields.push(format!("type {msg_type}"));
        }
        if let Some(src) = &self.src {
            fields.push(format!("src {src}"));
        }
        if let Some(dst) = &self.dst {
            fields.push(format!("dst {dst}"));
        }
        if let Some(msg_id) = &self.msg_id {
            fields.push(format!("mid {msg_id:#06x}"));
        }
        if fields.is_empty() {
            write!(f, "any")
        } else {
            write!(f, "{}", fields.join(", "))
        }
    }
}

// ===== unit tests =====
