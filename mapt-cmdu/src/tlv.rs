//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{Buf, BufMut, Bytes, BytesMut};
use derive_new::new;
use enum_as_inner::EnumAsInner;
use mapt_utils::bytes::{BytesExt, BytesMutExt};
use mapt_utils::mac_addr::MacAddr;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BTM_STATUS_ACCEPT, ClientAssociationFlags, LinkMetricNeighborType,
    LinkMetricResultCode, LinkMetricsRequested, StaMetricsPolicyFlags,
    SteeringRequestFlags, TlvType,
};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::literal::{self, Literal, LiteralCursor};

//
// IEEE 1905.1 Type-Length-Value.
//
// Encoding format:
//
//  0                   1                   2
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |   TLV Type    |          TLV Length           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                  Value (variable)             ~
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
pub const TLV_HDR_SIZE: usize = 3;

// Size of one interface pair entry in the link metric TLVs.
pub const TX_LINK_METRIC_ENTRY_SIZE: usize = 29;
pub const RX_LINK_METRIC_ENTRY_SIZE: usize = 23;

// TLV carried by a CMDU.
//
// The End of Message TLV is not represented: it's appended by the CMDU
// encoder and consumed by the CMDU decoder.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(EnumAsInner)]
#[derive(Deserialize, Serialize)]
pub enum Tlv {
    AlMacAddress(AlMacAddressTlv),
    MacAddress(MacAddressTlv),
    LinkMetricQuery(LinkMetricQueryTlv),
    TransmitterLinkMetric(TransmitterLinkMetricTlv),
    ReceiverLinkMetric(ReceiverLinkMetricTlv),
    LinkMetricResultCode(LinkMetricResultCodeTlv),
    SteeringPolicy(SteeringPolicyTlv),
    MetricReportingPolicy(MetricReportingPolicyTlv),
    ClientAssociationEvent(ClientAssociationEventTlv),
    SteeringRequest(SteeringRequestTlv),
    SteeringBtmReport(SteeringBtmReportTlv),
    // TLV types without a typed codec, kept as opaque values.
    Unknown(UnknownTlv),
}

// Trait for all typed TLVs.
pub trait TlvKind: Sized + std::fmt::Debug + Into<Tlv> {
    const TLV_TYPE: TlvType;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()>;

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self>;

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self>;

    fn to_literal(&self) -> Vec<Literal>;

    // Returns a reference to the typed TLV if `tlv` has this type.
    fn from_tlv(tlv: &Tlv) -> Option<&Self>;

    fn encode(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        let start_pos = tlv_encode_start(buf, Self::TLV_TYPE as u8);
        self.encode_value(buf)?;
        tlv_encode_end(buf, start_pos)
    }
}

// Trait shared by the transmitter and receiver link metric TLVs.
pub trait LinkMetricTlv {
    fn responder_al_mac(&self) -> MacAddr;

    fn neighbor_al_mac(&self) -> MacAddr;

    // Returns the (local interface, neighbor interface) address pairs.
    fn interface_pairs(&self) -> Vec<(MacAddr, MacAddr)>;
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct AlMacAddressTlv {
    pub al_mac: MacAddr,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct MacAddressTlv {
    pub mac: MacAddr,
}

//
// Link Metric Query TLV.
//
// The neighbor AL MAC address is present only when a specific neighbor is
// queried.
//
#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct LinkMetricQueryTlv {
    pub neighbor_type: LinkMetricNeighborType,
    pub neighbor: Option<MacAddr>,
    pub metrics_requested: LinkMetricsRequested,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct TransmitterLinkMetricTlv {
    pub responder_al_mac: MacAddr,
    pub neighbor_al_mac: MacAddr,
    pub links: Vec<TxLinkMetric>,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct TxLinkMetric {
    pub local_iface_mac: MacAddr,
    pub neighbor_iface_mac: MacAddr,
    pub media_type: u16,
    pub bridge_flag: u8,
    pub packet_errors: u32,
    pub transmitted_packets: u32,
    pub mac_throughput: u16,
    pub link_availability: u16,
    pub phy_rate: u16,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct ReceiverLinkMetricTlv {
    pub responder_al_mac: MacAddr,
    pub neighbor_al_mac: MacAddr,
    pub links: Vec<RxLinkMetric>,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct RxLinkMetric {
    pub local_iface_mac: MacAddr,
    pub neighbor_iface_mac: MacAddr,
    pub media_type: u16,
    pub packet_errors: u32,
    pub packets_received: u32,
    pub rssi: u8,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct LinkMetricResultCodeTlv {
    pub code: LinkMetricResultCode,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct SteeringPolicyTlv {
    pub local_steering_disallowed: Vec<MacAddr>,
    pub btm_steering_disallowed: Vec<MacAddr>,
    pub radios: Vec<SteeringPolicyRadio>,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct SteeringPolicyRadio {
    pub ruid: MacAddr,
    pub policy: u8,
    pub channel_util_threshold: u8,
    pub rcpi_threshold: u8,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct MetricReportingPolicyTlv {
    pub ap_metrics_interval: u8,
    pub radios: Vec<MetricReportingRadio>,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct MetricReportingRadio {
    pub ruid: MacAddr,
    pub sta_rcpi_threshold: u8,
    pub sta_rcpi_hysteresis: u8,
    pub ap_util_threshold: u8,
    pub sta_metrics_flags: StaMetricsPolicyFlags,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct ClientAssociationEventTlv {
    pub client_mac: MacAddr,
    pub bssid: MacAddr,
    pub flags: ClientAssociationFlags,
}

//
// Steering Request TLV.
//
// The target BSS list is present only for steering mandates.
//
#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct SteeringRequestTlv {
    pub bssid: MacAddr,
    pub flags: SteeringRequestFlags,
    pub opportunity_window: u16,
    pub btm_disassoc_timer: u16,
    pub stas: Vec<MacAddr>,
    pub targets: Vec<SteeringTarget>,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct SteeringTarget {
    pub bssid: MacAddr,
    pub op_class: u8,
    pub channel: u8,
}

//
// Steering BTM Report TLV.
//
// The target BSSID is present only when the BTM status code is "accept".
//
#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct SteeringBtmReportTlv {
    pub bssid: MacAddr,
    pub sta_mac: MacAddr,
    pub status_code: u8,
    pub target_bssid: Option<MacAddr>,
}

#[derive(Clone, Debug, Eq, PartialEq, new)]
#[derive(Deserialize, Serialize)]
pub struct UnknownTlv {
    pub tlv_type: u8,
    pub value: Bytes,
}

// ===== impl Tlv =====

impl Tlv {
    // Returns the TLV type wire value.
    pub fn tlv_type(&self) -> u8 {
        match self {
            Tlv::AlMacAddress(_) => TlvType::AlMacAddress as u8,
            Tlv::MacAddress(_) => TlvType::MacAddress as u8,
            Tlv::LinkMetricQuery(_) => TlvType::LinkMetricQuery as u8,
            Tlv::TransmitterLinkMetric(_) => {
                TlvType::TransmitterLinkMetric as u8
            }
            Tlv::ReceiverLinkMetric(_) => TlvType::ReceiverLinkMetric as u8,
            Tlv::LinkMetricResultCode(_) => TlvType::LinkMetricResultCode as u8,
            Tlv::SteeringPolicy(_) => TlvType::SteeringPolicy as u8,
            Tlv::MetricReportingPolicy(_) => {
                TlvType::MetricReportingPolicy as u8
            }
            Tlv::ClientAssociationEvent(_) => {
                TlvType::ClientAssociationEvent as u8
            }
            Tlv::SteeringRequest(_) => TlvType::SteeringRequest as u8,
            Tlv::SteeringBtmReport(_) => TlvType::SteeringBtmReport as u8,
            Tlv::Unknown(tlv) => tlv.tlv_type,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        match self {
            Tlv::AlMacAddress(tlv) => tlv.encode(buf),
            Tlv::MacAddress(tlv) => tlv.encode(buf),
            Tlv::LinkMetricQuery(tlv) => tlv.encode(buf),
            Tlv::TransmitterLinkMetric(tlv) => tlv.encode(buf),
            Tlv::ReceiverLinkMetric(tlv) => tlv.encode(buf),
            Tlv::LinkMetricResultCode(tlv) => tlv.encode(buf),
            Tlv::SteeringPolicy(tlv) => tlv.encode(buf),
            Tlv::MetricReportingPolicy(tlv) => tlv.encode(buf),
            Tlv::ClientAssociationEvent(tlv) => tlv.encode(buf),
            Tlv::SteeringRequest(tlv) => tlv.encode(buf),
            Tlv::SteeringBtmReport(tlv) => tlv.encode(buf),
            Tlv::Unknown(tlv) => {
                let start_pos = tlv_encode_start(buf, tlv.tlv_type);
                buf.put_slice(&tlv.value);
                tlv_encode_end(buf, start_pos)
            }
        }
    }

    // Decodes a TLV value as found in captured traffic.
    //
    // Types without a typed codec are preserved as opaque TLVs.
    pub fn decode_value(tlv_type: u8, value: Bytes) -> DecodeResult<Tlv> {
        match TlvType::from_u8(tlv_type) {
            Some(etype) => Tlv::decode_known(etype, value),
            None => Ok(Tlv::Unknown(UnknownTlv::new(tlv_type, value))),
        }
    }

    // Decodes the value of a TLV of the given type.
    //
    // Unlike `decode_value`, unregistered TLV types are rejected.
    pub fn decode_typed(tlv_type: u8, value: &[u8]) -> DecodeResult<Tlv> {
        let etype = TlvType::decode(tlv_type)?;
        Tlv::decode_known(etype, Bytes::copy_from_slice(value))
    }

    fn decode_known(etype: TlvType, value: Bytes) -> DecodeResult<Tlv> {
        let tlv_len = value.len() as u16;
        let mut buf = value;
        let tlv = match etype {
            TlvType::EndOfMessage => {
                return Err(DecodeError::InvalidTlvValue(
                    etype,
                    "end of message is not a payload TLV".to_owned(),
                ));
            }
            TlvType::AlMacAddress => {
                AlMacAddressTlv::decode_value(&mut buf)?.into()
            }
            TlvType::MacAddress => MacAddressTlv::decode_value(&mut buf)?.into(),
            TlvType::LinkMetricQuery => {
                LinkMetricQueryTlv::decode_value(&mut buf)?.into()
            }
            TlvType::TransmitterLinkMetric => {
                TransmitterLinkMetricTlv::decode_value(&mut buf)?.into()
            }
            TlvType::ReceiverLinkMetric => {
                ReceiverLinkMetricTlv::decode_value(&mut buf)?.into()
            }
            TlvType::LinkMetricResultCode => {
                LinkMetricResultCodeTlv::decode_value(&mut buf)?.into()
            }
            TlvType::SteeringPolicy => {
                SteeringPolicyTlv::decode_value(&mut buf)?.into()
            }
            TlvType::MetricReportingPolicy => {
                MetricReportingPolicyTlv::decode_value(&mut buf)?.into()
            }
            TlvType::ClientAssociationEvent => {
                ClientAssociationEventTlv::decode_value(&mut buf)?.into()
            }
            TlvType::SteeringRequest => {
                SteeringRequestTlv::decode_value(&mut buf)?.into()
            }
            TlvType::SteeringBtmReport => {
                SteeringBtmReportTlv::decode_value(&mut buf)?.into()
            }
        };

        // The value must match the expected layout exactly.
        if buf.has_remaining() {
            return Err(DecodeError::InvalidTlvLength(etype as u8, tlv_len));
        }

        Ok(tlv)
    }

    // Builds a TLV of the given type from a literal description, binding
    // placeholders to `args`.
    pub fn from_literal(
        tlv_type: u8,
        text: &str,
        args: &[MacAddr],
    ) -> EncodeResult<Tlv> {
        let etype = TlvType::decode(tlv_type)?;
        let nodes = literal::bind(&literal::parse(text)?, args)?;
        let mut cursor = LiteralCursor::new(&nodes);
        let tlv: Tlv = match etype {
            TlvType::EndOfMessage => {
                return Err(EncodeError::NoLiteralForm(etype));
            }
            TlvType::AlMacAddress => {
                AlMacAddressTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::MacAddress => {
                MacAddressTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::LinkMetricQuery => {
                LinkMetricQueryTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::TransmitterLinkMetric => {
                TransmitterLinkMetricTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::ReceiverLinkMetric => {
                ReceiverLinkMetricTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::LinkMetricResultCode => {
                LinkMetricResultCodeTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::SteeringPolicy => {
                SteeringPolicyTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::MetricReportingPolicy => {
                MetricReportingPolicyTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::ClientAssociationEvent => {
                ClientAssociationEventTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::SteeringRequest => {
                SteeringRequestTlv::from_literal(&mut cursor)?.into()
            }
            TlvType::SteeringBtmReport => {
                SteeringBtmReportTlv::from_literal(&mut cursor)?.into()
            }
        };
        cursor.finish()?;

        // The value must fit the wire format.
        tlv.encode(&mut BytesMut::new())?;

        Ok(tlv)
    }

    // Renders the TLV fields using the literal notation.
    pub fn to_literal(&self) -> String {
        let nodes = match self {
            Tlv::AlMacAddress(tlv) => tlv.to_literal(),
            Tlv::MacAddress(tlv) => tlv.to_literal(),
            Tlv::LinkMetricQuery(tlv) => tlv.to_literal(),
            Tlv::TransmitterLinkMetric(tlv) => tlv.to_literal(),
            Tlv::ReceiverLinkMetric(tlv) => tlv.to_literal(),
            Tlv::LinkMetricResultCode(tlv) => tlv.to_literal(),
            Tlv::SteeringPolicy(tlv) => tlv.to_literal(),
            Tlv::MetricReportingPolicy(tlv) => tlv.to_literal(),
            Tlv::ClientAssociationEvent(tlv) => tlv.to_literal(),
            Tlv::SteeringRequest(tlv) => tlv.to_literal(),
            Tlv::SteeringBtmReport(tlv) => tlv.to_literal(),
            Tlv::Unknown(tlv) => {
                tlv.value.iter().map(|byte| Literal::u8(*byte)).collect()
            }
        };
        literal::render(&nodes)
    }
}

// ===== impl AlMacAddressTlv =====

impl TlvKind for AlMacAddressTlv {
    const TLV_TYPE: TlvType = TlvType::AlMacAddress;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.al_mac);
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let al_mac = buf.try_get_mac()?;
        Ok(AlMacAddressTlv { al_mac })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let al_mac = cursor.mac("al_mac")?;
        Ok(AlMacAddressTlv { al_mac })
    }

    fn to_literal(&self) -> Vec<Literal> {
        vec![Literal::Addr(self.al_mac)]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_al_mac_address()
    }
}

// ===== impl MacAddressTlv =====

impl TlvKind for MacAddressTlv {
    const TLV_TYPE: TlvType = TlvType::MacAddress;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.mac);
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let mac = buf.try_get_mac()?;
        Ok(MacAddressTlv { mac })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let mac = cursor.mac("mac")?;
        Ok(MacAddressTlv { mac })
    }

    fn to_literal(&self) -> Vec<Literal> {
        vec![Literal::Addr(self.mac)]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_mac_address()
    }
}

// ===== impl LinkMetricQueryTlv =====

impl LinkMetricQueryTlv {
    pub fn all_neighbors(metrics_requested: LinkMetricsRequested) -> Self {
        LinkMetricQueryTlv {
            neighbor_type: LinkMetricNeighborType::AllNeighbors,
            neighbor: None,
            metrics_requested,
        }
    }

    pub fn specific_neighbor(
        neighbor: MacAddr,
        metrics_requested: LinkMetricsRequested,
    ) -> Self {
        LinkMetricQueryTlv {
            neighbor_type: LinkMetricNeighborType::SpecificNeighbor,
            neighbor: Some(neighbor),
            metrics_requested,
        }
    }
}

impl TlvKind for LinkMetricQueryTlv {
    const TLV_TYPE: TlvType = TlvType::LinkMetricQuery;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_u8(self.neighbor_type as u8);
        if let Some(neighbor) = &self.neighbor {
            buf.put_mac(neighbor);
        }
        buf.put_u8(self.metrics_requested as u8);
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let neighbor_type = buf.try_get_u8()?;
        let neighbor_type = LinkMetricNeighborType::from_u8(neighbor_type)
            .ok_or_else(|| {
                DecodeError::InvalidTlvValue(
                    Self::TLV_TYPE,
                    format!("neighbor type {neighbor_type}"),
                )
            })?;
        let neighbor = match neighbor_type {
            LinkMetricNeighborType::AllNeighbors => None,
            LinkMetricNeighborType::SpecificNeighbor => {
                Some(buf.try_get_mac()?)
            }
        };
        let metrics_requested = buf.try_get_u8()?;
        let metrics_requested = LinkMetricsRequested::from_u8(metrics_requested)
            .ok_or_else(|| {
                DecodeError::InvalidTlvValue(
                    Self::TLV_TYPE,
                    format!("link metrics requested {metrics_requested}"),
                )
            })?;

        Ok(LinkMetricQueryTlv {
            neighbor_type,
            neighbor,
            metrics_requested,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let value = cursor.u8("neighbor_type")?;
        let neighbor_type = LinkMetricNeighborType::from_u8(value).ok_or(
            EncodeError::InvalidValue {
                field: "neighbor_type",
                value: value.into(),
            },
        )?;
        let neighbor = match neighbor_type {
            LinkMetricNeighborType::AllNeighbors => None,
            LinkMetricNeighborType::SpecificNeighbor => {
                Some(cursor.mac("neighbor")?)
            }
        };
        let value = cursor.u8("metrics_requested")?;
        let metrics_requested = LinkMetricsRequested::from_u8(value).ok_or(
            EncodeError::InvalidValue {
                field: "metrics_requested",
                value: value.into(),
            },
        )?;

        Ok(LinkMetricQueryTlv {
            neighbor_type,
            neighbor,
            metrics_requested,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let mut nodes = vec![Literal::u8(self.neighbor_type as u8)];
        if let Some(neighbor) = self.neighbor {
            nodes.push(Literal::Addr(neighbor));
        }
        nodes.push(Literal::u8(self.metrics_requested as u8));
        nodes
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_link_metric_query()
    }
}

// ===== impl TransmitterLinkMetricTlv =====

impl TlvKind for TransmitterLinkMetricTlv {
    const TLV_TYPE: TlvType = TlvType::TransmitterLinkMetric;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.responder_al_mac);
        buf.put_mac(&self.neighbor_al_mac);
        for link in &self.links {
            buf.put_mac(&link.local_iface_mac);
            buf.put_mac(&link.neighbor_iface_mac);
            buf.put_u16(link.media_type);
            buf.put_u8(link.bridge_flag);
            buf.put_u32(link.packet_errors);
            buf.put_u32(link.transmitted_packets);
            buf.put_u16(link.mac_throughput);
            buf.put_u16(link.link_availability);
            buf.put_u16(link.phy_rate);
        }
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        // Validate the TLV length.
        let tlv_len = buf.remaining();
        if tlv_len < MacAddr::LENGTH * 2
            || (tlv_len - MacAddr::LENGTH * 2) % TX_LINK_METRIC_ENTRY_SIZE != 0
        {
            return Err(DecodeError::InvalidTlvLength(
                Self::TLV_TYPE as u8,
                tlv_len as u16,
            ));
        }

        let responder_al_mac = buf.try_get_mac()?;
        let neighbor_al_mac = buf.try_get_mac()?;
        let mut links = vec![];
        while buf.remaining() >= TX_LINK_METRIC_ENTRY_SIZE {
            let local_iface_mac = buf.try_get_mac()?;
            let neighbor_iface_mac = buf.try_get_mac()?;
            let media_type = buf.try_get_u16()?;
            let bridge_flag = buf.try_get_u8()?;
            let packet_errors = buf.try_get_u32()?;
            let transmitted_packets = buf.try_get_u32()?;
            let mac_throughput = buf.try_get_u16()?;
            let link_availability = buf.try_get_u16()?;
            let phy_rate = buf.try_get_u16()?;
            links.push(TxLinkMetric {
                local_iface_mac,
                neighbor_iface_mac,
                media_type,
                bridge_flag,
                packet_errors,
                transmitted_packets,
                mac_throughput,
                link_availability,
                phy_rate,
            });
        }

        Ok(TransmitterLinkMetricTlv {
            responder_al_mac,
            neighbor_al_mac,
            links,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let responder_al_mac = cursor.mac("responder_al_mac")?;
        let neighbor_al_mac = cursor.mac("neighbor_al_mac")?;
        let links = cursor.entries("links", |entry| {
            Ok(TxLinkMetric {
                local_iface_mac: entry.mac("local_iface_mac")?,
                neighbor_iface_mac: entry.mac("neighbor_iface_mac")?,
                media_type: entry.u16("media_type")?,
                bridge_flag: entry.u8("bridge_flag")?,
                packet_errors: entry.u32("packet_errors")?,
                transmitted_packets: entry.u32("transmitted_packets")?,
                mac_throughput: entry.u16("mac_throughput")?,
                link_availability: entry.u16("link_availability")?,
                phy_rate: entry.u16("phy_rate")?,
            })
        })?;

        Ok(TransmitterLinkMetricTlv {
            responder_al_mac,
            neighbor_al_mac,
            links,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let links = self
            .links
            .iter()
            .flat_map(|link| {
                [
                    Literal::Addr(link.local_iface_mac),
                    Literal::Addr(link.neighbor_iface_mac),
                    Literal::u16(link.media_type),
                    Literal::u8(link.bridge_flag),
                    Literal::u32(link.packet_errors),
                    Literal::u32(link.transmitted_packets),
                    Literal::u16(link.mac_throughput),
                    Literal::u16(link.link_availability),
                    Literal::u16(link.phy_rate),
                ]
            })
            .collect();
        vec![
            Literal::Addr(self.responder_al_mac),
            Literal::Addr(self.neighbor_al_mac),
            Literal::Group(links),
        ]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_transmitter_link_metric()
    }
}

impl LinkMetricTlv for TransmitterLinkMetricTlv {
    fn responder_al_mac(&self) -> MacAddr {
        self.responder_al_mac
    }

    fn neighbor_al_mac(&self) -> MacAddr {
        self.neighbor_al_mac
    }

    fn interface_pairs(&self) -> Vec<(MacAddr, MacAddr)> {
        self.links
            .iter()
            .map(|link| (link.local_iface_mac, link.neighbor_iface_mac))
            .collect()
    }
}

// ===== impl ReceiverLinkMetricTlv =====

impl TlvKind for ReceiverLinkMetricTlv {
    const TLV_TYPE: TlvType = TlvType::ReceiverLinkMetric;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.responder_al_mac);
        buf.put_mac(&self.neighbor_al_mac);
        for link in &self.links {
            buf.put_mac(&link.local_iface_mac);
            buf.put_mac(&link.neighbor_iface_mac);
            buf.put_u16(link.media_type);
            buf.put_u32(link.packet_errors);
            buf.put_u32(link.packets_received);
            buf.put_u8(link.rssi);
        }
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        // Validate the TLV length.
        let tlv_len = buf.remaining();
        if tlv_len < MacAddr::LENGTH * 2
            || (tlv_len - MacAddr::LENGTH * 2) % RX_LINK_METRIC_ENTRY_SIZE != 0
        {
            return Err(DecodeError::InvalidTlvLength(
                Self::TLV_TYPE as u8,
                tlv_len as u16,
            ));
        }

        let responder_al_mac = buf.try_get_mac()?;
        let neighbor_al_mac = buf.try_get_mac()?;
        let mut links = vec![];
        while buf.remaining() >= RX_LINK_METRIC_ENTRY_SIZE {
            let local_iface_mac = buf.try_get_mac()?;
            let neighbor_iface_mac = buf.try_get_mac()?;
            let media_type = buf.try_get_u16()?;
            let packet_errors = buf.try_get_u32()?;
            let packets_received = buf.try_get_u32()?;
            let rssi = buf.try_get_u8()?;
            links.push(RxLinkMetric {
                local_iface_mac,
                neighbor_iface_mac,
                media_type,
                packet_errors,
                packets_received,
                rssi,
            });
        }

        Ok(ReceiverLinkMetricTlv {
            responder_al_mac,
            neighbor_al_mac,
            links,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let responder_al_mac = cursor.mac("responder_al_mac")?;
        let neighbor_al_mac = cursor.mac("neighbor_al_mac")?;
        let links = cursor.entries("links", |entry| {
            Ok(RxLinkMetric {
                local_iface_mac: entry.mac("local_iface_mac")?,
                neighbor_iface_mac: entry.mac("neighbor_iface_mac")?,
                media_type: entry.u16("media_type")?,
                packet_errors: entry.u32("packet_errors")?,
                packets_received: entry.u32("packets_received")?,
                rssi: entry.u8("rssi")?,
            })
        })?;

        Ok(ReceiverLinkMetricTlv {
            responder_al_mac,
            neighbor_al_mac,
            links,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let links = self
            .links
            .iter()
            .flat_map(|link| {
                [
                    Literal::Addr(link.local_iface_mac),
                    Literal::Addr(link.neighbor_iface_mac),
                    Literal::u16(link.media_type),
                    Literal::u32(link.packet_errors),
                    Literal::u32(link.packets_received),
                    Literal::u8(link.rssi),
                ]
            })
            .collect();
        vec![
            Literal::Addr(self.responder_al_mac),
            Literal::Addr(self.neighbor_al_mac),
            Literal::Group(links),
        ]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_receiver_link_metric()
    }
}

impl LinkMetricTlv for ReceiverLinkMetricTlv {
    fn responder_al_mac(&self) -> MacAddr {
        self.responder_al_mac
    }

    fn neighbor_al_mac(&self) -> MacAddr {
        self.neighbor_al_mac
    }

    fn interface_pairs(&self) -> Vec<(MacAddr, MacAddr)> {
        self.links
            .iter()
            .map(|link| (link.local_iface_mac, link.neighbor_iface_mac))
            .collect()
    }
}

// ===== impl LinkMetricResultCodeTlv =====

impl TlvKind for LinkMetricResultCodeTlv {
    const TLV_TYPE: TlvType = TlvType::LinkMetricResultCode;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_u8(self.code as u8);
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let code = buf.try_get_u8()?;
        let code = LinkMetricResultCode::from_u8(code).ok_or_else(|| {
            DecodeError::InvalidTlvValue(
                Self::TLV_TYPE,
                format!("result code {code}"),
            )
        })?;
        Ok(LinkMetricResultCodeTlv { code })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let value = cursor.u8("code")?;
        let code = LinkMetricResultCode::from_u8(value).ok_or(
            EncodeError::InvalidValue {
                field: "code",
                value: value.into(),
            },
        )?;
        Ok(LinkMetricResultCodeTlv { code })
    }

    fn to_literal(&self) -> Vec<Literal> {
        vec![Literal::u8(self.code as u8)]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_link_metric_result_code()
    }
}

// ===== impl SteeringPolicyTlv =====

impl TlvKind for SteeringPolicyTlv {
    const TLV_TYPE: TlvType = TlvType::SteeringPolicy;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        put_count(
            buf,
            "local_steering_disallowed",
            self.local_steering_disallowed.len(),
        )?;
        for sta in &self.local_steering_disallowed {
            buf.put_mac(sta);
        }
        put_count(
            buf,
            "btm_steering_disallowed",
            self.btm_steering_disallowed.len(),
        )?;
        for sta in &self.btm_steering_disallowed {
            buf.put_mac(sta);
        }
        put_count(buf, "radios", self.radios.len())?;
        for radio in &self.radios {
            buf.put_mac(&radio.ruid);
            buf.put_u8(radio.policy);
            buf.put_u8(radio.channel_util_threshold);
            buf.put_u8(radio.rcpi_threshold);
        }
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let count = buf.try_get_u8()?;
        let local_steering_disallowed = (0..count)
            .map(|_| buf.try_get_mac())
            .collect::<Result<Vec<_>, _>>()?;
        let count = buf.try_get_u8()?;
        let btm_steering_disallowed = (0..count)
            .map(|_| buf.try_get_mac())
            .collect::<Result<Vec<_>, _>>()?;
        let count = buf.try_get_u8()?;
        let mut radios = vec![];
        for _ in 0..count {
            let ruid = buf.try_get_mac()?;
            let policy = buf.try_get_u8()?;
            let channel_util_threshold = buf.try_get_u8()?;
            let rcpi_threshold = buf.try_get_u8()?;
            radios.push(SteeringPolicyRadio {
                ruid,
                policy,
                channel_util_threshold,
                rcpi_threshold,
            });
        }

        Ok(SteeringPolicyTlv {
            local_steering_disallowed,
            btm_steering_disallowed,
            radios,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let count = cursor.u8("local_steering_disallowed_count")?;
        let local_steering_disallowed = cursor
            .list("local_steering_disallowed", count.into(), |entry| {
                entry.mac("sta")
            })?;
        let count = cursor.u8("btm_steering_disallowed_count")?;
        let btm_steering_disallowed = cursor
            .list("btm_steering_disallowed", count.into(), |entry| {
                entry.mac("sta")
            })?;
        let count = cursor.u8("radio_count")?;
        let radios = cursor.list("radios", count.into(), |entry| {
            Ok(SteeringPolicyRadio {
                ruid: entry.mac("ruid")?,
                policy: entry.u8("policy")?,
                channel_util_threshold: entry.u8("channel_util_threshold")?,
                rcpi_threshold: entry.u8("rcpi_threshold")?,
            })
        })?;

        Ok(SteeringPolicyTlv {
            local_steering_disallowed,
            btm_steering_disallowed,
            radios,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let radios = self
            .radios
            .iter()
            .flat_map(|radio| {
                [
                    Literal::Addr(radio.ruid),
                    Literal::u8(radio.policy),
                    Literal::u8(radio.channel_util_threshold),
                    Literal::u8(radio.rcpi_threshold),
                ]
            })
            .collect();
        vec![
            Literal::u8(self.local_steering_disallowed.len() as u8),
            addr_group(&self.local_steering_disallowed),
            Literal::u8(self.btm_steering_disallowed.len() as u8),
            addr_group(&self.btm_steering_disallowed),
            Literal::u8(self.radios.len() as u8),
            Literal::Group(radios),
        ]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_steering_policy()
    }
}

// ===== impl MetricReportingPolicyTlv =====

impl TlvKind for MetricReportingPolicyTlv {
    const TLV_TYPE: TlvType = TlvType::MetricReportingPolicy;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_u8(self.ap_metrics_interval);
        put_count(buf, "radios", self.radios.len())?;
        for radio in &self.radios {
            buf.put_mac(&radio.ruid);
            buf.put_u8(radio.sta_rcpi_threshold);
            buf.put_u8(radio.sta_rcpi_hysteresis);
            buf.put_u8(radio.ap_util_threshold);
            buf.put_u8(radio.sta_metrics_flags.bits());
        }
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let ap_metrics_interval = buf.try_get_u8()?;
        let count = buf.try_get_u8()?;
        let mut radios = vec![];
        for _ in 0..count {
            let ruid = buf.try_get_mac()?;
            let sta_rcpi_threshold = buf.try_get_u8()?;
            let sta_rcpi_hysteresis = buf.try_get_u8()?;
            let ap_util_threshold = buf.try_get_u8()?;
            let sta_metrics_flags =
                StaMetricsPolicyFlags::from_bits_retain(buf.try_get_u8()?);
            radios.push(MetricReportingRadio {
                ruid,
                sta_rcpi_threshold,
                sta_rcpi_hysteresis,
                ap_util_threshold,
                sta_metrics_flags,
            });
        }

        Ok(MetricReportingPolicyTlv {
            ap_metrics_interval,
            radios,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let ap_metrics_interval = cursor.u8("ap_metrics_interval")?;
        let count = cursor.u8("radio_count")?;
        let radios = cursor.list("radios", count.into(), |entry| {
            Ok(MetricReportingRadio {
                ruid: entry.mac("ruid")?,
                sta_rcpi_threshold: entry.u8("sta_rcpi_threshold")?,
                sta_rcpi_hysteresis: entry.u8("sta_rcpi_hysteresis")?,
                ap_util_threshold: entry.u8("ap_util_threshold")?,
                sta_metrics_flags: StaMetricsPolicyFlags::from_bits_retain(
                    entry.u8("sta_metrics_flags")?,
                ),
            })
        })?;

        Ok(MetricReportingPolicyTlv {
            ap_metrics_interval,
            radios,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let radios = self
            .radios
            .iter()
            .flat_map(|radio| {
                [
                    Literal::Addr(radio.ruid),
                    Literal::u8(radio.sta_rcpi_threshold),
                    Literal::u8(radio.sta_rcpi_hysteresis),
                    Literal::u8(radio.ap_util_threshold),
                    Literal::u8(radio.sta_metrics_flags.bits()),
                ]
            })
            .collect();
        vec![
            Literal::u8(self.ap_metrics_interval),
            Literal::u8(self.radios.len() as u8),
            Literal::Group(radios),
        ]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_metric_reporting_policy()
    }
}

// ===== impl ClientAssociationEventTlv =====

impl TlvKind for ClientAssociationEventTlv {
    const TLV_TYPE: TlvType = TlvType::ClientAssociationEvent;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.client_mac);
        buf.put_mac(&self.bssid);
        buf.put_u8(self.flags.bits());
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let client_mac = buf.try_get_mac()?;
        let bssid = buf.try_get_mac()?;
        let flags = ClientAssociationFlags::from_bits_retain(buf.try_get_u8()?);
        Ok(ClientAssociationEventTlv {
            client_mac,
            bssid,
            flags,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let client_mac = cursor.mac("client_mac")?;
        let bssid = cursor.mac("bssid")?;
        let flags = ClientAssociationFlags::from_bits_retain(cursor.u8("flags")?);
        Ok(ClientAssociationEventTlv {
            client_mac,
            bssid,
            flags,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        vec![
            Literal::Addr(self.client_mac),
            Literal::Addr(self.bssid),
            Literal::u8(self.flags.bits()),
        ]
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_client_association_event()
    }
}

// ===== impl SteeringRequestTlv =====

impl SteeringRequestTlv {
    pub fn is_mandate(&self) -> bool {
        self.flags.contains(SteeringRequestFlags::REQUEST_MODE_MANDATE)
    }
}

impl TlvKind for SteeringRequestTlv {
    const TLV_TYPE: TlvType = TlvType::SteeringRequest;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.bssid);
        buf.put_u8(self.flags.bits());
        buf.put_u16(self.opportunity_window);
        buf.put_u16(self.btm_disassoc_timer);
        put_count(buf, "stas", self.stas.len())?;
        for sta in &self.stas {
            buf.put_mac(sta);
        }
        if self.is_mandate() {
            put_count(buf, "targets", self.targets.len())?;
            for target in &self.targets {
                buf.put_mac(&target.bssid);
                buf.put_u8(target.op_class);
                buf.put_u8(target.channel);
            }
        }
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let bssid = buf.try_get_mac()?;
        let flags = SteeringRequestFlags::from_bits_retain(buf.try_get_u8()?);
        let opportunity_window = buf.try_get_u16()?;
        let btm_disassoc_timer = buf.try_get_u16()?;
        let count = buf.try_get_u8()?;
        let stas = (0..count)
            .map(|_| buf.try_get_mac())
            .collect::<Result<Vec<_>, _>>()?;
        let mut targets = vec![];
        if flags.contains(SteeringRequestFlags::REQUEST_MODE_MANDATE) {
            let count = buf.try_get_u8()?;
            for _ in 0..count {
                let bssid = buf.try_get_mac()?;
                let op_class = buf.try_get_u8()?;
                let channel = buf.try_get_u8()?;
                targets.push(SteeringTarget {
                    bssid,
                    op_class,
                    channel,
                });
            }
        }

        Ok(SteeringRequestTlv {
            bssid,
            flags,
            opportunity_window,
            btm_disassoc_timer,
            stas,
            targets,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let bssid = cursor.mac("bssid")?;
        let flags = SteeringRequestFlags::from_bits_retain(cursor.u8("flags")?);
        let opportunity_window = cursor.u16("opportunity_window")?;
        let btm_disassoc_timer = cursor.u16("btm_disassoc_timer")?;
        let count = cursor.u8("sta_count")?;
        let stas = cursor.list("stas", count.into(), |entry| entry.mac("sta"))?;
        let mut targets = vec![];
        if flags.contains(SteeringRequestFlags::REQUEST_MODE_MANDATE) {
            let count = cursor.u8("target_count")?;
            targets = cursor.list("targets", count.into(), |entry| {
                Ok(SteeringTarget {
                    bssid: entry.mac("target_bssid")?,
                    op_class: entry.u8("op_class")?,
                    channel: entry.u8("channel")?,
                })
            })?;
        }

        Ok(SteeringRequestTlv {
            bssid,
            flags,
            opportunity_window,
            btm_disassoc_timer,
            stas,
            targets,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let mut nodes = vec![
            Literal::Addr(self.bssid),
            Literal::u8(self.flags.bits()),
            Literal::u16(self.opportunity_window),
            Literal::u16(self.btm_disassoc_timer),
            Literal::u8(self.stas.len() as u8),
            addr_group(&self.stas),
        ];
        if self.is_mandate() {
            let targets = self
                .targets
                .iter()
                .flat_map(|target| {
                    [
                        Literal::Addr(target.bssid),
                        Literal::u8(target.op_class),
                        Literal::u8(target.channel),
                    ]
                })
                .collect();
            nodes.push(Literal::u8(self.targets.len() as u8));
            nodes.push(Literal::Group(targets));
        }
        nodes
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_steering_request()
    }
}

// ===== impl SteeringBtmReportTlv =====

impl TlvKind for SteeringBtmReportTlv {
    const TLV_TYPE: TlvType = TlvType::SteeringBtmReport;

    fn encode_value(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        buf.put_mac(&self.bssid);
        buf.put_mac(&self.sta_mac);
        buf.put_u8(self.status_code);
        if let Some(target_bssid) = &self.target_bssid {
            buf.put_mac(target_bssid);
        }
        Ok(())
    }

    fn decode_value(buf: &mut Bytes) -> DecodeResult<Self> {
        let bssid = buf.try_get_mac()?;
        let sta_mac = buf.try_get_mac()?;
        let status_code = buf.try_get_u8()?;
        let target_bssid = if status_code == BTM_STATUS_ACCEPT {
            Some(buf.try_get_mac()?)
        } else {
            None
        };

        Ok(SteeringBtmReportTlv {
            bssid,
            sta_mac,
            status_code,
            target_bssid,
        })
    }

    fn from_literal(cursor: &mut LiteralCursor<'_>) -> EncodeResult<Self> {
        let bssid = cursor.mac("bssid")?;
        let sta_mac = cursor.mac("sta_mac")?;
        let status_code = cursor.u8("status_code")?;
        let target_bssid = if status_code == BTM_STATUS_ACCEPT {
            Some(cursor.mac("target_bssid")?)
        } else {
            None
        };

        Ok(SteeringBtmReportTlv {
            bssid,
            sta_mac,
            status_code,
            target_bssid,
        })
    }

    fn to_literal(&self) -> Vec<Literal> {
        let mut nodes = vec![
            Literal::Addr(self.bssid),
            Literal::Addr(self.sta_mac),
            Literal::u8(self.status_code),
        ];
        if let Some(target_bssid) = self.target_bssid {
            nodes.push(Literal::Addr(target_bssid));
        }
        nodes
    }

    fn from_tlv(tlv: &Tlv) -> Option<&Self> {
        tlv.as_steering_btm_report()
    }
}

//
// Type conversion functions.
//

impl From<AlMacAddressTlv> for Tlv {
    fn from(tlv: AlMacAddressTlv) -> Tlv {
        Tlv::AlMacAddress(tlv)
    }
}

impl From<MacAddressTlv> for Tlv {
    fn from(tlv: MacAddressTlv) -> Tlv {
        Tlv::MacAddress(tlv)
    }
}

impl From<LinkMetricQueryTlv> for Tlv {
    fn from(tlv: LinkMetricQueryTlv) -> Tlv {
        Tlv::LinkMetricQuery(tlv)
    }
}

impl From<TransmitterLinkMetricTlv> for Tlv {
    fn from(tlv: TransmitterLinkMetricTlv) -> Tlv {
        Tlv::TransmitterLinkMetric(tlv)
    }
}

impl From<ReceiverLinkMetricTlv> for Tlv {
    fn from(tlv: ReceiverLinkMetricTlv) -> Tlv {
        Tlv::ReceiverLinkMetric(tlv)
    }
}

impl From<LinkMetricResultCodeTlv> for Tlv {
    fn from(tlv: LinkMetricResultCodeTlv) -> Tlv {
        Tlv::LinkMetricResultCode(tlv)
    }
}

impl From<SteeringPolicyTlv> for Tlv {
    fn from(tlv: SteeringPolicyTlv) -> Tlv {
        Tlv::SteeringPolicy(tlv)
    }
}

impl From<MetricReportingPolicyTlv> for Tlv {
    fn from(tlv: MetricReportingPolicyTlv) -> Tlv {
        Tlv::MetricReportingPolicy(tlv)
    }
}

impl From<ClientAssociationEventTlv> for Tlv {
    fn from(tlv: ClientAssociationEventTlv) -> Tlv {
        Tlv::ClientAssociationEvent(tlv)
    }
}

impl From<SteeringRequestTlv> for Tlv {
    fn from(tlv: SteeringRequestTlv) -> Tlv {
        Tlv::SteeringRequest(tlv)
    }
}

impl From<SteeringBtmReportTlv> for Tlv {
    fn from(tlv: SteeringBtmReportTlv) -> Tlv {
        Tlv::SteeringBtmReport(tlv)
    }
}

// ===== helper functions =====

fn addr_group(addrs: &[MacAddr]) -> Literal {
    Literal::Group(addrs.iter().copied().map(Literal::Addr).collect())
}

// ===== global functions =====

pub(crate) fn tlv_encode_start(buf: &mut BytesMut, tlv_type: u8) -> usize {
    let start_pos = buf.len();
    buf.put_u8(tlv_type);
    // The TLV length will be rewritten later.
    buf.put_u16(0);
    start_pos
}

pub(crate) fn tlv_encode_end(
    buf: &mut BytesMut,
    start_pos: usize,
) -> EncodeResult<()> {
    // Rewrite TLV length.
    let value_len = buf.len() - start_pos - TLV_HDR_SIZE;
    let tlv_len = u16::try_from(value_len)
        .map_err(|_| EncodeError::ValueTooLong(buf[start_pos], value_len))?;
    buf[start_pos + 1..start_pos + 3].copy_from_slice(&tlv_len.to_be_bytes());
    Ok(())
}

// Writes the entry count of a repeated field.
pub(crate) fn put_count(
    buf: &mut BytesMut,
    field: &'static str,
    count: usize,
) -> EncodeResult<()> {
    let count = u8::try_from(count)
        .map_err(|_| EncodeError::TooManyEntries { field, count })?;
    buf.put_u8(count);
    Ok(())
}
