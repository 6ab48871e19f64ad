use super::*;

static AL_MAC_ADDRESS1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![0x01, 0x00, 0x06, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
        AlMacAddressTlv::new(AL1).into(),
    )
});

static MAC_ADDRESS1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![0x02, 0x00, 0x06, 0x02, 0x00, 0x00, 0x01, 0x00, 0x01],
        MacAddressTlv::new(IF1).into(),
    )
});

static LINK_METRIC_QUERY1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![0x08, 0x00, 0x02, 0x00, 0x02],
        LinkMetricQueryTlv::all_neighbors(LinkMetricsRequested::BothTxRx)
            .into(),
    )
});

static LINK_METRIC_QUERY2: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x08, 0x00, 0x08, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01,
        ],
        LinkMetricQueryTlv::specific_neighbor(AL2, LinkMetricsRequested::RxOnly)
            .into(),
    )
});

static TRANSMITTER_LINK_METRIC1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x09, 0x00, 0x29, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00,
            0x00, 0x00, 0x00, 0x02, 0x02, 0x00, 0x00, 0x01, 0x00, 0x01, 0x02,
            0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x03, 0xe8, 0x00, 0x64, 0x00, 0x64, 0x03, 0xe8,
        ],
        TransmitterLinkMetricTlv {
            responder_al_mac: AL1,
            neighbor_al_mac: AL2,
            links: vec![TxLinkMetric {
                local_iface_mac: IF1,
                neighbor_iface_mac: IF2,
                media_type: MEDIA_TYPE_IEEE_802_3AB,
                bridge_flag: 0,
                packet_errors: 0,
                transmitted_packets: 1000,
                mac_throughput: 100,
                link_availability: 100,
                phy_rate: 1000,
            }],
        }
        .into(),
    )
});

static RECEIVER_LINK_METRIC1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x0a, 0x00, 0x23, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00,
            0x00, 0x00, 0x00, 0x02, 0x02, 0x00, 0x00, 0x01, 0x00, 0x01, 0x02,
            0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x07, 0xd0, 0x3c,
        ],
        ReceiverLinkMetricTlv {
            responder_al_mac: AL1,
            neighbor_al_mac: AL2,
            links: vec![RxLinkMetric {
                local_iface_mac: IF1,
                neighbor_iface_mac: IF2,
                media_type: MEDIA_TYPE_IEEE_802_3AB,
                packet_errors: 0,
                packets_received: 2000,
                rssi: 60,
            }],
        }
        .into(),
    )
});

static STEERING_POLICY1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x89, 0x00, 0x0c, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00,
        ],
        SteeringPolicyTlv {
            local_steering_disallowed: vec![],
            btm_steering_disallowed: vec![],
            radios: vec![SteeringPolicyRadio::new(BSSID1, 0, 0, 0)],
        }
        .into(),
    )
});

static METRIC_REPORTING_POLICY1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x8a, 0x00, 0x0c, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0xc0,
        ],
        MetricReportingPolicyTlv {
            ap_metrics_interval: 0,
            radios: vec![MetricReportingRadio::new(
                BSSID1,
                0,
                0,
                0,
                StaMetricsPolicyFlags::INCLUDE_TRAFFIC_STATS
                    | StaMetricsPolicyFlags::INCLUDE_LINK_METRICS,
            )],
        }
        .into(),
    )
});

static CLIENT_ASSOCIATION_EVENT1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x92, 0x00, 0x0d, 0x02, 0x00, 0x00, 0x00, 0xaa, 0x01, 0x02, 0x00,
            0x00, 0x00, 0x01, 0x00, 0x80,
        ],
        ClientAssociationEventTlv::new(
            STA,
            BSSID1,
            ClientAssociationFlags::JOINED,
        )
        .into(),
    )
});

static LINK_METRIC_RESULT_CODE1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![0x0c, 0x00, 0x01, 0x00],
        LinkMetricResultCodeTlv::new(LinkMetricResultCode::InvalidNeighbor)
            .into(),
    )
});

// Steering mandate with disassociation imminent and abridged flags.
static STEERING_REQUEST1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x9b, 0x00, 0x1b, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0xe0, 0x00,
            0x00, 0x13, 0x88, 0x01, 0x02, 0x00, 0x00, 0x00, 0xaa, 0x01, 0x01,
            0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x73, 0x24,
        ],
        SteeringRequestTlv {
            bssid: BSSID1,
            flags: SteeringRequestFlags::REQUEST_MODE_MANDATE
                | SteeringRequestFlags::BTM_DISASSOC_IMMINENT
                | SteeringRequestFlags::BTM_ABRIDGED,
            opportunity_window: 0,
            btm_disassoc_timer: 5000,
            stas: vec![STA],
            targets: vec![SteeringTarget::new(BSSID2, 0x73, 0x24)],
        }
        .into(),
    )
});

// Steering opportunity: no target list on the wire.
static STEERING_REQUEST2: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x9b, 0x00, 0x0c, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x0a, 0x00, 0x00, 0x00,
        ],
        SteeringRequestTlv {
            bssid: BSSID1,
            flags: SteeringRequestFlags::empty(),
            opportunity_window: 10,
            btm_disassoc_timer: 0,
            stas: vec![],
            targets: vec![],
        }
        .into(),
    )
});

static STEERING_BTM_REPORT1: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x9c, 0x00, 0x13, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00,
            0x00, 0x00, 0xaa, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00,
        ],
        SteeringBtmReportTlv::new(BSSID1, STA, BTM_STATUS_ACCEPT, Some(BSSID2))
            .into(),
    )
});

// Rejected steering: no target BSSID on the wire.
static STEERING_BTM_REPORT2: Lazy<(Vec<u8>, Tlv)> = Lazy::new(|| {
    (
        vec![
            0x9c, 0x00, 0x0d, 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00,
            0x00, 0x00, 0xaa, 0x01, 0x06,
        ],
        SteeringBtmReportTlv::new(BSSID1, STA, 0x06, None).into(),
    )
});

#[test]
fn test_encode_al_mac_address1() {
    let (ref bytes, ref tlv) = *AL_MAC_ADDRESS1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_al_mac_address1() {
    let (ref bytes, ref tlv) = *AL_MAC_ADDRESS1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_al_mac_address1() {
    let (_, ref tlv) = *AL_MAC_ADDRESS1;
    test_literal_tlv("$", &[AL1], tlv);
}

#[test]
fn test_encode_mac_address1() {
    let (ref bytes, ref tlv) = *MAC_ADDRESS1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_mac_address1() {
    let (ref bytes, ref tlv) = *MAC_ADDRESS1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_mac_address1() {
    let (_, ref tlv) = *MAC_ADDRESS1;
    test_literal_tlv("02:00:00:01:00:01", &[], tlv);
}

#[test]
fn test_encode_link_metric_query1() {
    let (ref bytes, ref tlv) = *LINK_METRIC_QUERY1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_link_metric_query1() {
    let (ref bytes, ref tlv) = *LINK_METRIC_QUERY1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_link_metric_query1() {
    let (_, ref tlv) = *LINK_METRIC_QUERY1;
    test_literal_tlv("0x00 0x02", &[], tlv);
}

#[test]
fn test_encode_link_metric_query2() {
    let (ref bytes, ref tlv) = *LINK_METRIC_QUERY2;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_link_metric_query2() {
    let (ref bytes, ref tlv) = *LINK_METRIC_QUERY2;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_link_metric_query2() {
    let (_, ref tlv) = *LINK_METRIC_QUERY2;
    test_literal_tlv("{0x01 $ 0x01}", &[AL2], tlv);
}

#[test]
fn test_encode_transmitter_link_metric1() {
    let (ref bytes, ref tlv) = *TRANSMITTER_LINK_METRIC1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_transmitter_link_metric1() {
    let (ref bytes, ref tlv) = *TRANSMITTER_LINK_METRIC1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_transmitter_link_metric1() {
    let (_, ref tlv) = *TRANSMITTER_LINK_METRIC1;
    test_literal_tlv(
        "$ $ {$ $ 0x0001 0x00 0x00000000 0x000003e8 0x0064 0x0064 0x03e8}",
        &[AL1, AL2, IF1, IF2],
        tlv,
    );
}

#[test]
fn test_encode_receiver_link_metric1() {
    let (ref bytes, ref tlv) = *RECEIVER_LINK_METRIC1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_receiver_link_metric1() {
    let (ref bytes, ref tlv) = *RECEIVER_LINK_METRIC1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_receiver_link_metric1() {
    let (_, ref tlv) = *RECEIVER_LINK_METRIC1;
    test_literal_tlv(
        "$ $ {$ $ 0x0001 0x00000000 0x000007d0 0x3c}",
        &[AL1, AL2, IF1, IF2],
        tlv,
    );
}

#[test]
fn test_encode_link_metric_result_code1() {
    let (ref bytes, ref tlv) = *LINK_METRIC_RESULT_CODE1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_link_metric_result_code1() {
    let (ref bytes, ref tlv) = *LINK_METRIC_RESULT_CODE1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_link_metric_result_code1() {
    let (_, ref tlv) = *LINK_METRIC_RESULT_CODE1;
    test_literal_tlv("0x00", &[], tlv);

    // Only "invalid neighbor" is defined.
    assert_eq!(
        Tlv::from_literal(TlvType::LinkMetricResultCode as u8, "0x01", &[]),
        Err(EncodeError::InvalidValue {
            field: "code",
            value: 1,
        })
    );
}

#[test]
fn test_encode_steering_policy1() {
    let (ref bytes, ref tlv) = *STEERING_POLICY1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_steering_policy1() {
    let (ref bytes, ref tlv) = *STEERING_POLICY1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_steering_policy1() {
    let (_, ref tlv) = *STEERING_POLICY1;
    test_literal_tlv("{0x00 0x00 0x01 {$ 0x00 0x00 0x00}}", &[BSSID1], tlv);
}

#[test]
fn test_encode_metric_reporting_policy1() {
    let (ref bytes, ref tlv) = *METRIC_REPORTING_POLICY1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_metric_reporting_policy1() {
    let (ref bytes, ref tlv) = *METRIC_REPORTING_POLICY1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_metric_reporting_policy1() {
    let (_, ref tlv) = *METRIC_REPORTING_POLICY1;
    test_literal_tlv("{0x00 0x01 {$ 0x00 0x00 0x00 0xc0}}", &[BSSID1], tlv);
}

#[test]
fn test_encode_client_association_event1() {
    let (ref bytes, ref tlv) = *CLIENT_ASSOCIATION_EVENT1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_client_association_event1() {
    let (ref bytes, ref tlv) = *CLIENT_ASSOCIATION_EVENT1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_encode_steering_request1() {
    let (ref bytes, ref tlv) = *STEERING_REQUEST1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_steering_request1() {
    let (ref bytes, ref tlv) = *STEERING_REQUEST1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_steering_request1() {
    let (_, ref tlv) = *STEERING_REQUEST1;
    test_literal_tlv(
        "{$ 0xe0 0x0000 0x1388 0x01 {$} 0x01 {$ 0x73 0x24}}",
        &[BSSID1, STA, BSSID2],
        tlv,
    );
}

#[test]
fn test_encode_steering_request2() {
    let (ref bytes, ref tlv) = *STEERING_REQUEST2;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_steering_request2() {
    let (ref bytes, ref tlv) = *STEERING_REQUEST2;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_steering_request2() {
    let (_, ref tlv) = *STEERING_REQUEST2;
    test_literal_tlv("{$ 0x00 0x000A 0x0000 0x00}", &[BSSID1], tlv);
}

#[test]
fn test_encode_steering_btm_report1() {
    let (ref bytes, ref tlv) = *STEERING_BTM_REPORT1;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_steering_btm_report1() {
    let (ref bytes, ref tlv) = *STEERING_BTM_REPORT1;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_encode_steering_btm_report2() {
    let (ref bytes, ref tlv) = *STEERING_BTM_REPORT2;
    test_encode_tlv(bytes, tlv);
}

#[test]
fn test_decode_steering_btm_report2() {
    let (ref bytes, ref tlv) = *STEERING_BTM_REPORT2;
    test_decode_tlv(bytes, tlv);
}

#[test]
fn test_literal_steering_btm_report2() {
    let (_, ref tlv) = *STEERING_BTM_REPORT2;
    test_literal_tlv("$ $ 0x06", &[BSSID1, STA], tlv);
}

#[test]
fn test_literal_round_trip() {
    let samples = [
        &*AL_MAC_ADDRESS1,
        &*MAC_ADDRESS1,
        &*LINK_METRIC_QUERY1,
        &*LINK_METRIC_QUERY2,
        &*TRANSMITTER_LINK_METRIC1,
        &*RECEIVER_LINK_METRIC1,
        &*LINK_METRIC_RESULT_CODE1,
        &*STEERING_POLICY1,
        &*METRIC_REPORTING_POLICY1,
        &*CLIENT_ASSOCIATION_EVENT1,
        &*STEERING_REQUEST1,
        &*STEERING_REQUEST2,
        &*STEERING_BTM_REPORT1,
        &*STEERING_BTM_REPORT2,
    ];

    // Every TLV type carried in a message body has a sample.
    for tlv_type in (0..=u8::MAX).filter_map(TlvType::from_u8) {
        if tlv_type == TlvType::EndOfMessage {
            continue;
        }
        assert!(
            samples.iter().any(|(_, tlv)| tlv.tlv_type() == tlv_type as u8),
            "no sample for {tlv_type}"
        );
    }

    for (bytes, tlv) in samples {
        // Rendered literal back to the same TLV.
        let text = tlv.to_literal();
        test_literal_tlv(&text, &[], tlv);

        // Literal-built TLV back through the wire format.
        let tlv = Tlv::from_literal(tlv.tlv_type(), &text, &[]).unwrap();
        let mut buf = BytesMut::new();
        tlv.encode(&mut buf).unwrap();
        assert_eq_hex!(&bytes[..], &buf[..]);
        let decoded =
            Tlv::decode_typed(bytes[0], &buf[TLV_HDR_SIZE..]).unwrap();
        assert_eq!(tlv, decoded);
    }
}

#[test]
fn test_to_literal_steering_request1() {
    let (_, ref tlv) = *STEERING_REQUEST1;
    assert_eq!(
        tlv.to_literal(),
        "02:00:00:00:01:00 0xe0 0x0000 0x1388 0x01 {02:00:00:00:aa:01} 0x01 {02:00:00:00:02:00 0x73 0x24}"
    );
}

#[test]
fn test_to_literal_steering_request2() {
    let (_, ref tlv) = *STEERING_REQUEST2;
    assert_eq!(tlv.to_literal(), "02:00:00:00:01:00 0x00 0x000a 0x0000 0x00 {}");

    // The rendered literal is accepted back.
    let text = tlv.to_literal();
    test_literal_tlv(&text, &[], tlv);
}

#[test]
fn test_decode_truncated_btm_report() {
    // Status "accept" without the target BSSID.
    let (ref bytes, _) = *STEERING_BTM_REPORT2;
    let mut value = bytes[TLV_HDR_SIZE..].to_vec();
    value[12] = BTM_STATUS_ACCEPT;
    assert_eq!(
        Tlv::decode_typed(TlvType::SteeringBtmReport as u8, &value),
        Err(DecodeError::ReadOutOfBounds)
    );
}

#[test]
fn test_decode_trailing_bytes() {
    let value = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0xff];
    assert_eq!(
        Tlv::decode_typed(TlvType::AlMacAddress as u8, &value),
        Err(DecodeError::InvalidTlvLength(0x01, 7))
    );
}

#[test]
fn test_decode_link_metric_partial_entry() {
    let (ref bytes, _) = *TRANSMITTER_LINK_METRIC1;
    let value = &bytes[TLV_HDR_SIZE..bytes.len() - 1];
    assert_eq!(
        Tlv::decode_typed(TlvType::TransmitterLinkMetric as u8, value),
        Err(DecodeError::InvalidTlvLength(0x09, 40))
    );
}

#[test]
fn test_decode_invalid_metrics_requested() {
    assert!(matches!(
        Tlv::decode_typed(TlvType::LinkMetricQuery as u8, &[0x00, 0x03]),
        Err(DecodeError::InvalidTlvValue(TlvType::LinkMetricQuery, _))
    ));
}

#[test]
fn test_decode_unknown_tlv_type() {
    assert_eq!(
        Tlv::decode_typed(0x77, &[0x01]),
        Err(DecodeError::Schema(SchemaError::UnknownTlvType(0x77)))
    );
}

#[test]
fn test_link_metric_interface_pairs() {
    let (_, ref tlv) = *RECEIVER_LINK_METRIC1;
    let tlv = tlv.as_receiver_link_metric().unwrap();
    assert_eq!(tlv.responder_al_mac(), AL1);
    assert_eq!(tlv.neighbor_al_mac(), AL2);
    assert_eq!(tlv.interface_pairs(), vec![(IF1, IF2)]);
}

#[test]
fn test_encode_value_too_long() {
    // 2300 entries of 29 bytes overflow the 16-bit TLV length.
    let link = TxLinkMetric::new(
        IF1,
        IF2,
        MEDIA_TYPE_IEEE_802_3AB,
        0,
        0,
        1000,
        100,
        100,
        1000,
    );
    let tlv: Tlv =
        TransmitterLinkMetricTlv::new(AL1, AL2, vec![link; 2300]).into();
    let mut buf = BytesMut::new();
    assert_eq!(
        tlv.encode(&mut buf),
        Err(EncodeError::ValueTooLong(0x09, 12 + 2300 * 29))
    );

    // The same overflow from the literal notation.
    let entry = "$ $ 0x0001 0x00 0x00000000 0x000003e8 0x0064 0x0064 0x03e8 ";
    let text = format!("$ $ {{{}}}", entry.repeat(2300));
    let mut args = vec![AL1, AL2];
    for _ in 0..2300 {
        args.extend([IF1, IF2]);
    }
    assert_eq!(
        Tlv::from_literal(TlvType::TransmitterLinkMetric as u8, &text, &args),
        Err(EncodeError::ValueTooLong(0x09, 12 + 2300 * 29))
    );
}

#[test]
fn test_encode_too_many_entries() {
    let tlv: Tlv = SteeringRequestTlv::new(
        BSSID1,
        SteeringRequestFlags::empty(),
        10,
        0,
        vec![STA; 256],
        vec![],
    )
    .into();
    let mut buf = BytesMut::new();
    assert_eq!(
        tlv.encode(&mut buf),
        Err(EncodeError::TooManyEntries {
            field: "stas",
            count: 256,
        })
    );

    // The largest count that fits.
    let tlv: Tlv = SteeringRequestTlv::new(
        BSSID1,
        SteeringRequestFlags::empty(),
        10,
        0,
        vec![STA; 255],
        vec![],
    )
    .into();
    assert!(tlv.encode(&mut buf).is_ok());
}
