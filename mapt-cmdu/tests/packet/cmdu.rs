use super::*;

static CMDU1: Lazy<(Vec<u8>, Cmdu)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x00, 0x00, 0x05, 0x12, 0x34, 0x00, 0x80, 0x08, 0x00, 0x02,
            0x00, 0x02, 0x00, 0x00, 0x00,
        ],
        Cmdu::new(
            MessageType::LinkMetricQuery,
            0x1234,
            vec![
                LinkMetricQueryTlv::all_neighbors(
                    LinkMetricsRequested::BothTxRx,
                )
                .into(),
            ],
        ),
    )
});

static CMDU2: Lazy<(Vec<u8>, Cmdu)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x00, 0x80, 0x00, 0x00, 0x07, 0x00, 0x80, 0x00, 0x00, 0x00,
        ],
        Cmdu::new(MessageType::Ack, 7, vec![]),
    )
});

#[test]
fn test_encode_cmdu1() {
    let (ref bytes, ref cmdu) = *CMDU1;
    test_encode_cmdu(bytes, cmdu);
}

#[test]
fn test_decode_cmdu1() {
    let (ref bytes, ref cmdu) = *CMDU1;
    test_decode_cmdu(bytes, cmdu);
}

#[test]
fn test_encode_cmdu2() {
    let (ref bytes, ref cmdu) = *CMDU2;
    test_encode_cmdu(bytes, cmdu);
}

#[test]
fn test_decode_cmdu2() {
    let (ref bytes, ref cmdu) = *CMDU2;
    test_decode_cmdu(bytes, cmdu);
}

#[test]
fn test_decode_cmdu_padding() {
    let (ref bytes, ref cmdu) = *CMDU2;
    let mut bytes = bytes.clone();
    bytes.extend_from_slice(&[0x00; 35]);
    test_decode_cmdu(&bytes, cmdu);
}

#[test]
fn test_decode_cmdu_unknown_tlv() {
    // Unregistered TLV types are preserved as opaque TLVs.
    let bytes = [
        0x00, 0x00, 0x80, 0x00, 0x00, 0x07, 0x00, 0x80, 0xb4, 0x00, 0x02, 0xaa,
        0xbb, 0x00, 0x00, 0x00,
    ];
    let cmdu = Cmdu::decode(&bytes).unwrap();
    assert_eq!(cmdu.tlvs.len(), 1);
    let tlv = cmdu.tlvs[0].as_unknown().unwrap();
    assert_eq!(tlv.tlv_type, 0xb4);
    assert_eq!(&tlv.value[..], &[0xaa, 0xbb]);
    assert_eq!(cmdu.tlvs[0].to_literal(), "0xaa 0xbb");

    // And re-encoded unchanged.
    assert_eq_hex!(&bytes[..], &cmdu.encode().unwrap()[..]);
}

#[test]
fn test_decode_cmdu_errors() {
    let (ref bytes, _) = *CMDU1;

    // Truncated header.
    assert_eq!(
        Cmdu::decode(&bytes[..5]),
        Err(DecodeError::IncompleteHeader(5))
    );

    // Invalid version.
    let mut invalid = bytes.clone();
    invalid[0] = 0x01;
    assert_eq!(Cmdu::decode(&invalid), Err(DecodeError::InvalidVersion(1)));

    // Unknown message type.
    let mut invalid = bytes.clone();
    invalid[2] = 0x7f;
    assert_eq!(
        Cmdu::decode(&invalid),
        Err(DecodeError::Schema(SchemaError::UnknownMessageType(0x7f05)))
    );

    // Missing End of Message TLV.
    assert_eq!(
        Cmdu::decode(&bytes[..bytes.len() - 3]),
        Err(DecodeError::MissingEndOfMessage)
    );

    // TLV length past the end of the CMDU.
    let mut invalid = bytes.clone();
    invalid[10] = 0x40;
    assert_eq!(
        Cmdu::decode(&invalid),
        Err(DecodeError::InvalidTlvLength(0x08, 0x40))
    );
}
