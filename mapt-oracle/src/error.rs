//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use mapt_cmdu::{DecodeError, EncodeError, SchemaError, TlvType};
use mapt_utils::mac_addr::MacAddr;
use tracing::{warn, warn_span};

use crate::capture::MessageFilter;

// Verification errors.
//
// Any of these aborts the running scenario.
#[derive(Debug)]
pub enum Error {
    // Codec errors
    Schema(SchemaError),
    Encode(EncodeError),
    Decode(DecodeError),
    // Query errors
    NotFound(Query),
    AmbiguousMatch(Query, Vec<String>),
    InvalidPattern(String, regex::Error),
    // Judgement errors
    Invariant(InvariantViolation),
    Protocol(ProtocolError),
    // Test bed errors
    Precondition(String),
    MissingRole(String),
    Device(String, String),
}

// Description of what a failed query was looking for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Query {
    Message(MessageFilter),
    Tlv(TlvType, String),
    LogLine(String, String),
}

// Protocol rule violated by an observed value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvariantViolation {
    ZeroAddress(String),
    NoInterfaces(String, MacAddr),
    Duplicates(String, Vec<(String, usize)>),
    PeerSetMismatch {
        what: String,
        missing: Vec<MacAddr>,
        unexpected: Vec<MacAddr>,
    },
    UnexpectedValue {
        field: String,
        expected: String,
        found: String,
    },
    OrderViolation {
        event: String,
        occurrence: usize,
        after: Option<String>,
    },
}

// Errors in the exchange itself, as opposed to the observed behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    MessageIdCollision(u16),
}

// ===== impl Error =====

impl Error {
    pub(crate) fn log(&self) {
        match self {
            Error::Schema(error) => {
                warn!(%error, "{}", self);
            }
            Error::Encode(error) => {
                warn_span!("exchange").in_scope(|| {
                    warn!(%error, "{}", self);
                });
            }
            Error::Decode(error) => {
                warn_span!("capture").in_scope(|| {
                    warn!(%error, "{}", self);
                });
            }
            Error::NotFound(query) => {
                warn_span!("capture").in_scope(|| {
                    warn!(%query, "{}", self);
                });
            }
            Error::AmbiguousMatch(query, matches) => {
                warn_span!("capture").in_scope(|| {
                    warn!(%query, ?matches, "{}", self);
                });
            }
            Error::InvalidPattern(pattern, error) => {
                warn!(%pattern, %error, "{}", self);
            }
            Error::Invariant(violation) => {
                warn!(%violation, "{}", self);
            }
            Error::Protocol(error) => {
                warn_span!("exchange").in_scope(|| {
                    warn!(%error, "{}", self);
                });
            }
            Error::Precondition(reason) => {
                warn!(%reason, "{}", self);
            }
            Error::MissingRole(name) => {
                warn!(%name, "{}", self);
            }
            Error::Device(device, reason) => {
                warn!(%device, %reason, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Schema(error) => {
                write!(f, "schema error: {error}")
            }
            Error::Encode(error) => {
                write!(f, "failed to encode TLV literal: {error}")
            }
            Error::Decode(error) => {
                write!(f, "failed to decode captured frame: {error}")
            }
            Error::NotFound(query) => {
                write!(f, "no match for {query}")
            }
            Error::AmbiguousMatch(query, matches) => {
                write!(
                    f,
                    "{} matches for {query}: {}",
                    matches.len(),
                    matches.join("; ")
                )
            }
            Error::InvalidPattern(pattern, _) => {
                write!(f, "invalid log pattern {pattern:?}")
            }
            Error::Invariant(violation) => {
                write!(f, "invariant violation: {violation}")
            }
            Error::Protocol(error) => {
                write!(f, "protocol error: {error}")
            }
            Error::Precondition(reason) => {
                write!(f, "unsatisfiable precondition: {reason}")
            }
            Error::MissingRole(name) => {
                write!(f, "role {name} not present in the topology")
            }
            Error::Device(device, reason) => {
                write!(f, "device {device}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Schema(error) => Some(error),
            Error::Encode(error) => Some(error),
            Error::Decode(error) => Some(error),
            Error::InvalidPattern(_, error) => Some(error),
            _ => None,
        }
    }
}

impl From<SchemaError> for Error {
    fn from(error: SchemaError) -> Error {
        Error::Schema(error)
    }
}

impl From<EncodeError> for Error {
    fn from(error: EncodeError) -> Error {
        match error {
            EncodeError::Schema(error) => Error::Schema(error),
            error => Error::Encode(error),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(error: DecodeError) -> Error {
        match error {
            DecodeError::Schema(error) => Error::Schema(error),
            error => Error::Decode(error),
        }
    }
}

impl From<InvariantViolation> for Error {
    fn from(violation: InvariantViolation) -> Error {
        Error::Invariant(violation)
    }
}

impl From<ProtocolError> for Error {
    fn from(error: ProtocolError) -> Error {
        Error::Protocol(error)
    }
}

// ===== impl Query =====

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Message(filter) => {
                write!(f, "message [{filter}]")
            }
            Query::Tlv(tlv_type, msg) => {
                write!(f, "{tlv_type} TLV in {msg}")
            }
            Query::LogLine(device, pattern) => {
                write!(f, "log line {pattern:?} on {device}")
            }
        }
    }
}

// ===== impl InvariantViolation =====

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::ZeroAddress(field) => {
                write!(f, "{field} is the all-zero address")
            }
            InvariantViolation::NoInterfaces(what, neighbor) => {
                write!(f, "{what} towards {neighbor} has no interface pair")
            }
            InvariantViolation::Duplicates(what, entries) => {
                write!(f, "{what} expected to appear only once:")?;
                for (key, count) in entries {
                    write!(f, " {key} (x{count})")?;
                }
                Ok(())
            }
            InvariantViolation::PeerSetMismatch {
                what,
                missing,
                unexpected,
            } => {
                write!(f, "{what} peer set mismatch")?;
                if !missing.is_empty() {
                    write!(f, "; never observed: {}", join_addrs(missing))?;
                }
                if !unexpected.is_empty() {
                    write!(f, "; not expected: {}", join_addrs(unexpected))?;
                }
                Ok(())
            }
            InvariantViolation::UnexpectedValue {
                field,
                expected,
                found,
            } => {
                write!(f, "{field}: expected {expected}, found {found}")
            }
            InvariantViolation::OrderViolation {
                event,
                occurrence,
                after,
            } => {
                write!(
                    f,
                    "{event} ({} occurrence) not observed",
                    ordinal(*occurrence)
                )?;
                if let Some(after) = after {
                    write!(f, " after {after}")?;
                }
                Ok(())
            }
        }
    }
}

// ===== impl ProtocolError =====

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::MessageIdCollision(msg_id) => {
                write!(f, "message id {msg_id:#06x} is already in flight")
            }
        }
    }
}

// ===== global functions =====

// Renders a 1-based position as an English ordinal ("1st", "2nd", ...).
pub(crate) fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn join_addrs(addrs: &[MacAddr]) -> String {
    addrs
        .iter()
        .map(|addr| addr.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== unit tests =====
