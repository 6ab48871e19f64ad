//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod cmdu;
mod literal;
mod tlv;

use std::sync::LazyLock as Lazy;

use bytes::BytesMut;
use mapt_cmdu::consts::*;
use mapt_cmdu::tlv::*;
use mapt_cmdu::{Cmdu, DecodeError, EncodeError, SchemaError};
use mapt_utils::assert_eq_hex;
use mapt_utils::mac_addr::MacAddr;
use num_traits::FromPrimitive;

const AL1: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
const AL2: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);
const IF1: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x01, 0x00, 0x01]);
const IF2: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x02, 0x00, 0x01]);
const BSSID1: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x01, 0x00]);
const BSSID2: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x02, 0x00]);
const STA: MacAddr = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0xaa, 0x01]);

//
// Helper functions.
//

fn test_encode_tlv(bytes_expected: &[u8], tlv: &Tlv) {
    let mut bytes_actual = BytesMut::with_capacity(256);
    tlv.encode(&mut bytes_actual).unwrap();
    assert_eq_hex!(bytes_expected, &bytes_actual[..]);
}

fn test_decode_tlv(bytes: &[u8], tlv_expected: &Tlv) {
    let tlv_actual =
        Tlv::decode_typed(bytes[0], &bytes[TLV_HDR_SIZE..]).unwrap();
    assert_eq!(*tlv_expected, tlv_actual);
}

fn test_literal_tlv(text: &str, args: &[MacAddr], tlv_expected: &Tlv) {
    let tlv_actual =
        Tlv::from_literal(tlv_expected.tlv_type(), text, args).unwrap();
    assert_eq!(*tlv_expected, tlv_actual);
}

fn test_encode_cmdu(bytes_expected: &[u8], cmdu: &Cmdu) {
    let bytes_actual = cmdu.encode().unwrap();
    assert_eq_hex!(bytes_expected, &bytes_actual[..]);
}

fn test_decode_cmdu(bytes: &[u8], cmdu_expected: &Cmdu) {
    let cmdu_actual = Cmdu::decode(bytes).unwrap();
    assert_eq!(*cmdu_expected, cmdu_actual);
}
