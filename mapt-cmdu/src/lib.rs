//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]
#![cfg_attr(
    feature = "testing",
    allow(dead_code, unused_variables, unused_imports)
)]

pub mod cmdu;
pub mod consts;
pub mod error;
pub mod literal;
pub mod tlv;

pub use cmdu::Cmdu;
pub use consts::{MessageType, TlvType};
pub use error::{DecodeError, EncodeError, SchemaError};
pub use tlv::{Tlv, TlvKind};
