use mapt_cmdu::literal::{self, Literal, Scalar};

use super::*;

fn scalar(value: u64, width: usize) -> Literal {
    Literal::Scalar(Scalar { value, width })
}

#[test]
fn test_parse_tokens() {
    let nodes =
        literal::parse("0x0 0x0a 0x000A 0x00001388 02:00:00:00:00:01 $ $3 {0x01 {}}")
            .unwrap();
    assert_eq!(
        nodes,
        vec![
            scalar(0, 1),
            scalar(10, 1),
            scalar(10, 2),
            scalar(5000, 4),
            Literal::Addr(AL1),
            Literal::Placeholder(0),
            Literal::Placeholder(3),
            Literal::Group(vec![scalar(1, 1), Literal::Group(vec![])]),
        ]
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        literal::parse("{0x01"),
        Err(EncodeError::UnbalancedGroup(0))
    );
    assert_eq!(
        literal::parse("0x01}"),
        Err(EncodeError::UnbalancedGroup(4))
    );
    assert_eq!(
        literal::parse("0x01 zz"),
        Err(EncodeError::InvalidToken(5, "zz".to_owned()))
    );
    assert_eq!(
        literal::parse("0x"),
        Err(EncodeError::InvalidToken(0, "0x".to_owned()))
    );
    assert_eq!(
        literal::parse("$x"),
        Err(EncodeError::InvalidToken(0, "$x".to_owned()))
    );
}

#[test]
fn test_parse_signed_tokens() {
    assert_eq!(
        literal::parse("0x+1"),
        Err(EncodeError::InvalidToken(0, "0x+1".to_owned()))
    );
    assert_eq!(
        literal::parse("$+1"),
        Err(EncodeError::InvalidToken(0, "$+1".to_owned()))
    );
    assert_eq!(
        literal::parse("0x01 +a:00:00:00:00:01"),
        Err(EncodeError::InvalidToken(5, "+a:00:00:00:00:01".to_owned()))
    );
}

#[test]
fn test_bind() {
    let nodes = literal::parse("{$ 0x00 {$1}}").unwrap();
    let bound = literal::bind(&nodes, &[BSSID1, STA]).unwrap();
    assert_eq!(literal::render(&bound), "{02:00:00:00:01:00 0x00 {02:00:00:00:aa:01}}");

    assert_eq!(
        literal::bind(&nodes, &[BSSID1]),
        Err(EncodeError::UnboundPlaceholder(1))
    );
}

#[test]
fn test_shape_missing_field() {
    assert_eq!(
        Tlv::from_literal(TlvType::LinkMetricQuery as u8, "0x00", &[]),
        Err(EncodeError::MissingField("metrics_requested"))
    );
}

#[test]
fn test_shape_scalar_width() {
    assert_eq!(
        Tlv::from_literal(TlvType::LinkMetricQuery as u8, "0x00 0x0002", &[]),
        Err(EncodeError::ScalarWidth {
            field: "metrics_requested",
            expected: 1,
            found: 2,
        })
    );
}

#[test]
fn test_shape_unexpected_node() {
    assert_eq!(
        Tlv::from_literal(TlvType::AlMacAddress as u8, "0x01", &[]),
        Err(EncodeError::UnexpectedNode {
            field: "al_mac",
            expected: literal::NodeKind::Addr,
            found: literal::NodeKind::Scalar,
        })
    );
}

#[test]
fn test_shape_count_mismatch() {
    assert_eq!(
        Tlv::from_literal(
            TlvType::SteeringRequest as u8,
            "{$ 0x00 0x000A 0x0000 0x02 {$}}",
            &[BSSID1, STA],
        ),
        Err(EncodeError::CountMismatch {
            field: "stas",
            declared: 2,
            found: 1,
        })
    );
}

#[test]
fn test_shape_trailing_nodes() {
    assert_eq!(
        Tlv::from_literal(TlvType::LinkMetricQuery as u8, "0x00 0x02 0x00", &[]),
        Err(EncodeError::TrailingNodes(1))
    );
}

#[test]
fn test_shape_invalid_value() {
    assert_eq!(
        Tlv::from_literal(TlvType::LinkMetricQuery as u8, "0x05 0x02", &[]),
        Err(EncodeError::InvalidValue {
            field: "neighbor_type",
            value: 5,
        })
    );
}

#[test]
fn test_shape_mandate_without_targets() {
    // Steering mandates carry a target list after the STA list.
    assert_eq!(
        Tlv::from_literal(
            TlvType::SteeringRequest as u8,
            "{$ 0x80 0x0000 0x1388 0x01 {$}}",
            &[BSSID1, STA],
        ),
        Err(EncodeError::MissingField("target_count"))
    );
}

#[test]
fn test_unknown_tlv_type() {
    assert_eq!(
        Tlv::from_literal(0x77, "0x00", &[]),
        Err(EncodeError::Schema(SchemaError::UnknownTlvType(0x77)))
    );
    assert_eq!(
        Tlv::from_literal(TlvType::EndOfMessage as u8, "", &[]),
        Err(EncodeError::NoLiteralForm(TlvType::EndOfMessage))
    );
}
