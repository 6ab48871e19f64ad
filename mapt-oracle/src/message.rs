//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use mapt_cmdu::{Cmdu, MessageType, Tlv, TlvKind, TlvType};
use mapt_utils::mac_addr::MacAddr;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Query};

// Outbound message, before a message id is assigned.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Envelope {
    pub msg_type: MessageType,
    pub destination: MacAddr,
    pub tlvs: Vec<Tlv>,
}

// Message observed on the wire.
//
// Immutable once captured.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct CapturedMessage {
    // Capture order, monotonically increasing.
    pub seq: u64,
    pub src: MacAddr,
    pub dst: MacAddr,
    pub cmdu: Cmdu,
}

// ===== impl Envelope =====

impl Envelope {
    pub fn new(
        msg_type: MessageType,
        destination: MacAddr,
        tlvs: Vec<Tlv>,
    ) -> Envelope {
        Envelope {
            msg_type,
            destination,
            tlvs,
        }
    }

    // Creates an envelope from a message type wire value.
    pub fn with_raw_type(
        msg_type: u16,
        destination: MacAddr,
        tlvs: Vec<Tlv>,
    ) -> Result<Envelope, Error> {
        let msg_type = MessageType::decode(msg_type)?;
        Ok(Envelope::new(msg_type, destination, tlvs))
    }

    pub(crate) fn into_cmdu(self, msg_id: u16) -> Cmdu {
        Cmdu::new(self.msg_type, msg_id, self.tlvs)
    }
}

// ===== impl CapturedMessage =====

impl CapturedMessage {
    pub fn msg_type(&self) -> MessageType {
        self.cmdu.msg_type
    }

    pub fn msg_id(&self) -> u16 {
        self.cmdu.msg_id
    }

    pub fn tlvs(&self) -> &[Tlv] {
        &self.cmdu.tlvs
    }

    // Returns all TLVs of the given type, in order. May be empty.
    pub fn find_tlvs_by_type(&self, tlv_type: TlvType) -> Vec<&Tlv> {
        self.cmdu
            .tlvs
            .iter()
            .filter(|tlv| tlv.tlv_type() == tlv_type as u8)
            .collect()
    }

    // Returns all typed TLVs of type `T`, in order. May be empty.
    pub fn find_tlvs<T: TlvKind>(&self) -> Vec<&T> {
        self.cmdu.tlvs.iter().filter_map(T::from_tlv).collect()
    }

    // Returns the only TLV of type `T`.
    pub fn find_tlv_single<T: TlvKind>(&self) -> Result<&T, Error> {
        let tlvs = self.find_tlvs::<T>();
        match tlvs.as_slice() {
            [tlv] => Ok(*tlv),
            [] => Err(Error::NotFound(self.tlv_query(T::TLV_TYPE))),
            _ => Err(Error::AmbiguousMatch(
                self.tlv_query(T::TLV_TYPE),
                tlvs.iter().map(|tlv| format!("{tlv:?}")).collect(),
            )),
        }
    }

    fn tlv_query(&self, tlv_type: TlvType) -> Query {
        Query::Tlv(tlv_type, self.to_string())
    }
}

impl std::fmt::Display for CapturedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} {} -> {} mid {:#06x}",
            self.seq,
            self.cmdu.msg_type,
            self.src,
            self.dst,
            self.cmdu.msg_id
        )
    }
}

// ===== unit tests =====
