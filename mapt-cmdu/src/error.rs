//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::TryGetError;
use serde::{Deserialize, Serialize};

use crate::consts::TlvType;
use crate::literal::NodeKind;

// Type aliases.
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;

// Unknown message or TLV type.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum SchemaError {
    UnknownMessageType(u16),
    UnknownTlvType(u8),
}

// CMDU decoding errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum DecodeError {
    ReadOutOfBounds,
    // CMDU header
    IncompleteHeader(usize),
    InvalidVersion(u8),
    Schema(SchemaError),
    // TLVs
    InvalidTlvLength(u8, u16),
    InvalidTlvValue(TlvType, String),
    MissingEndOfMessage,
}

// TLV literal parsing and encoding errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EncodeError {
    // Literal syntax
    InvalidToken(usize, String),
    UnbalancedGroup(usize),
    UnboundPlaceholder(usize),
    // Literal shape
    MissingField(&'static str),
    UnexpectedNode {
        field: &'static str,
        expected: NodeKind,
        found: NodeKind,
    },
    ScalarWidth {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    CountMismatch {
        field: &'static str,
        declared: usize,
        found: usize,
    },
    InvalidValue {
        field: &'static str,
        value: u64,
    },
    TrailingNodes(usize),
    NoLiteralForm(TlvType),
    // Wire limits
    TooManyEntries {
        field: &'static str,
        count: usize,
    },
    ValueTooLong(u8, usize),
    Schema(SchemaError),
}

// ===== impl SchemaError =====

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::UnknownMessageType(msg_type) => {
                write!(f, "unknown message type: {msg_type:#06x}")
            }
            SchemaError::UnknownTlvType(tlv_type) => {
                write!(f, "unknown TLV type: {tlv_type:#04x}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

// ===== impl DecodeError =====

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::ReadOutOfBounds => {
                write!(f, "attempt to read out of bounds")
            }
            DecodeError::IncompleteHeader(len) => {
                write!(f, "incomplete CMDU header: {len} bytes")
            }
            DecodeError::InvalidVersion(version) => {
                write!(f, "invalid CMDU version: {version}")
            }
            DecodeError::Schema(error) => error.fmt(f),
            DecodeError::InvalidTlvLength(tlv_type, len) => {
                write!(f, "invalid TLV length: type {tlv_type:#04x} length {len}")
            }
            DecodeError::InvalidTlvValue(tlv_type, field) => {
                write!(f, "invalid {tlv_type} TLV value: {field}")
            }
            DecodeError::MissingEndOfMessage => {
                write!(f, "missing End of Message TLV")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Schema(error) => Some(error),
            _ => None,
        }
    }
}

impl From<TryGetError> for DecodeError {
    fn from(_error: TryGetError) -> DecodeError {
        DecodeError::ReadOutOfBounds
    }
}

impl From<SchemaError> for DecodeError {
    fn from(error: SchemaError) -> DecodeError {
        DecodeError::Schema(error)
    }
}

// ===== impl EncodeError =====

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::InvalidToken(pos, token) => {
                write!(f, "invalid token at offset {pos}: {token:?}")
            }
            EncodeError::UnbalancedGroup(pos) => {
                write!(f, "unbalanced brace at offset {pos}")
            }
            EncodeError::UnboundPlaceholder(index) => {
                write!(f, "no argument bound to placeholder ${index}")
            }
            EncodeError::MissingField(field) => {
                write!(f, "missing field: {field}")
            }
            EncodeError::UnexpectedNode {
                field,
                expected,
                found,
            } => {
                write!(f, "field {field}: expected {expected}, found {found}")
            }
            EncodeError::ScalarWidth {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field {field}: expected {expected}-byte scalar, found {found}-byte scalar"
                )
            }
            EncodeError::CountMismatch {
                field,
                declared,
                found,
            } => {
                write!(
                    f,
                    "field {field}: count declares {declared} entries, found {found}"
                )
            }
            EncodeError::InvalidValue { field, value } => {
                write!(f, "field {field}: invalid value {value:#x}")
            }
            EncodeError::TrailingNodes(count) => {
                write!(f, "{count} unexpected trailing literal node(s)")
            }
            EncodeError::NoLiteralForm(tlv_type) => {
                write!(f, "{tlv_type} TLV has no literal form")
            }
            EncodeError::TooManyEntries { field, count } => {
                write!(f, "field {field}: {count} entries exceed the 8-bit count")
            }
            EncodeError::ValueTooLong(tlv_type, len) => {
                write!(
                    f,
                    "TLV type {tlv_type:#04x}: {len}-byte value exceeds the 16-bit length"
                )
            }
            EncodeError::Schema(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Schema(error) => Some(error),
            _ => None,
        }
    }
}

impl From<SchemaError> for EncodeError {
    fn from(error: SchemaError) -> EncodeError {
        EncodeError::Schema(error)
    }
}
