//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::consts::{CmduFlags, MessageType, TlvType};
use crate::error::{DecodeError, DecodeResult, EncodeResult};
use crate::tlv::{TLV_HDR_SIZE, Tlv, tlv_encode_end, tlv_encode_start};

//
// CMDU.
//
// Encoding format (header):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |    Version    |   Reserved    |          Message Type         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |           Message ID          |  Fragment ID  |L|R| Reserved  |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                          TLVs (variable)                      ~
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  End of Message TLV (type 0, length 0)        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Cmdu {
    pub msg_type: MessageType,
    pub msg_id: u16,
    pub fragment_id: u8,
    pub flags: CmduFlags,
    pub tlvs: Vec<Tlv>,
}

// ===== impl Cmdu =====

impl Cmdu {
    pub const VERSION: u8 = 0;
    pub const HDR_SIZE: usize = 8;

    // Creates a single-fragment CMDU.
    pub fn new(msg_type: MessageType, msg_id: u16, tlvs: Vec<Tlv>) -> Cmdu {
        Cmdu {
            msg_type,
            msg_id,
            fragment_id: 0,
            flags: CmduFlags::LAST_FRAGMENT,
            tlvs,
        }
    }

    pub fn encode(&self) -> EncodeResult<Bytes> {
        let mut buf = BytesMut::with_capacity(64);

        // Header.
        buf.put_u8(Self::VERSION);
        buf.put_u8(0);
        buf.put_u16(self.msg_type as u16);
        buf.put_u16(self.msg_id);
        buf.put_u8(self.fragment_id);
        buf.put_u8(self.flags.bits());

        // TLVs.
        for tlv in &self.tlvs {
            tlv.encode(&mut buf)?;
        }

        // End of Message TLV.
        let start_pos = tlv_encode_start(&mut buf, TlvType::EndOfMessage as u8);
        tlv_encode_end(&mut buf, start_pos)?;

        Ok(buf.freeze())
    }

    pub fn decode(data: &[u8]) -> DecodeResult<Cmdu> {
        if data.len() < Self::HDR_SIZE {
            return Err(DecodeError::IncompleteHeader(data.len()));
        }
        let mut buf = Bytes::copy_from_slice(data);

        // Parse and validate the header.
        let version = buf.try_get_u8()?;
        if version != Self::VERSION {
            return Err(DecodeError::InvalidVersion(version));
        }
        let _reserved = buf.try_get_u8()?;
        let msg_type = MessageType::decode(buf.try_get_u16()?)?;
        let msg_id = buf.try_get_u16()?;
        let fragment_id = buf.try_get_u8()?;
        let flags = CmduFlags::from_bits_truncate(buf.try_get_u8()?);

        // Parse TLVs up to and including the End of Message TLV. Anything
        // after it is Ethernet padding.
        let mut tlvs = vec![];
        loop {
            if !buf.has_remaining() {
                return Err(DecodeError::MissingEndOfMessage);
            }
            if buf.remaining() < TLV_HDR_SIZE {
                return Err(DecodeError::ReadOutOfBounds);
            }
            let tlv_type = buf.try_get_u8()?;
            let tlv_len = buf.try_get_u16()?;
            if tlv_len as usize > buf.remaining() {
                return Err(DecodeError::InvalidTlvLength(tlv_type, tlv_len));
            }
            if tlv_type == TlvType::EndOfMessage as u8 {
                if tlv_len != 0 {
                    return Err(DecodeError::InvalidTlvLength(
                        tlv_type, tlv_len,
                    ));
                }
                break;
            }
            let value = buf.split_to(tlv_len as usize);
            tlvs.push(Tlv::decode_value(tlv_type, value)?);
        }

        Ok(Cmdu {
            msg_type,
            msg_id,
            fragment_id,
            flags,
            tlvs,
        })
    }
}
