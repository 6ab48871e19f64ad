//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bitflags::bitflags;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

// CMDU message types.
//
// IEEE 1905.1-2013 Table 6-4 and Wi-Fi EasyMesh R1 Table 5.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum MessageType {
    TopologyDiscovery = 0x0000,
    TopologyNotification = 0x0001,
    TopologyQuery = 0x0002,
    TopologyResponse = 0x0003,
    VendorSpecific = 0x0004,
    LinkMetricQuery = 0x0005,
    LinkMetricResponse = 0x0006,
    ApAutoconfigSearch = 0x0007,
    ApAutoconfigResponse = 0x0008,
    ApAutoconfigWsc = 0x0009,
    // Multi-AP
    Ack = 0x8000,
    ApCapabilityQuery = 0x8001,
    ApCapabilityReport = 0x8002,
    MultiApPolicyConfigRequest = 0x8003,
    ApMetricsQuery = 0x800b,
    ApMetricsResponse = 0x800c,
    ClientSteeringRequest = 0x8014,
    ClientSteeringBtmReport = 0x8015,
    SteeringCompleted = 0x8017,
}

// TLV types.
//
// IEEE 1905.1-2013 Table 6-7 and Wi-Fi EasyMesh R1 Table 6.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum TlvType {
    EndOfMessage = 0x00,
    AlMacAddress = 0x01,
    MacAddress = 0x02,
    LinkMetricQuery = 0x08,
    TransmitterLinkMetric = 0x09,
    ReceiverLinkMetric = 0x0a,
    LinkMetricResultCode = 0x0c,
    // Multi-AP
    SteeringPolicy = 0x89,
    MetricReportingPolicy = 0x8a,
    ClientAssociationEvent = 0x92,
    SteeringRequest = 0x9b,
    SteeringBtmReport = 0x9c,
}

// Neighbor selection of the Link Metric Query TLV.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum LinkMetricNeighborType {
    AllNeighbors = 0x00,
    SpecificNeighbor = 0x01,
}

// Metrics requested by the Link Metric Query TLV.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum LinkMetricsRequested {
    TxOnly = 0x00,
    RxOnly = 0x01,
    BothTxRx = 0x02,
}

// Link metric result codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum LinkMetricResultCode {
    InvalidNeighbor = 0x00,
}

// IEEE 802.11v BTM status codes relevant to steering.
pub const BTM_STATUS_ACCEPT: u8 = 0x00;

// IEEE 1905.1 media types used in link metric TLVs.
pub const MEDIA_TYPE_IEEE_802_3AB: u16 = 0x0001;

bitflags! {
    // CMDU header flags.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct CmduFlags: u8 {
        const LAST_FRAGMENT = 0x80;
        const RELAY = 0x40;
    }
}

bitflags! {
    // Steering Request TLV flags.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct SteeringRequestFlags: u8 {
        const REQUEST_MODE_MANDATE = 0x80;
        const BTM_DISASSOC_IMMINENT = 0x40;
        const BTM_ABRIDGED = 0x20;
    }
}

bitflags! {
    // Associated STA metrics inclusion policy of the Metric Reporting Policy
    // TLV.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct StaMetricsPolicyFlags: u8 {
        const INCLUDE_TRAFFIC_STATS = 0x80;
        const INCLUDE_LINK_METRICS = 0x40;
        const INCLUDE_WIFI6_STATUS = 0x20;
    }
}

bitflags! {
    // Client Association Event TLV flags.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct ClientAssociationFlags: u8 {
        const JOINED = 0x80;
    }
}

// ===== impl MessageType =====

impl MessageType {
    // Looks up a message type from its wire value.
    pub fn decode(value: u16) -> Result<Self, SchemaError> {
        MessageType::from_u16(value)
            .ok_or(SchemaError::UnknownMessageType(value))
    }
}

impl TryFrom<u16> for MessageType {
    type Error = SchemaError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        MessageType::decode(value)
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::TopologyDiscovery => write!(f, "Topology Discovery"),
            MessageType::TopologyNotification => {
                write!(f, "Topology Notification")
            }
            MessageType::TopologyQuery => write!(f, "Topology Query"),
            MessageType::TopologyResponse => write!(f, "Topology Response"),
            MessageType::VendorSpecific => write!(f, "Vendor Specific"),
            MessageType::LinkMetricQuery => write!(f, "Link Metric Query"),
            MessageType::LinkMetricResponse => {
                write!(f, "Link Metric Response")
            }
            MessageType::ApAutoconfigSearch => {
                write!(f, "AP-Autoconfiguration Search")
            }
            MessageType::ApAutoconfigResponse => {
                write!(f, "AP-Autoconfiguration Response")
            }
            MessageType::ApAutoconfigWsc => {
                write!(f, "AP-Autoconfiguration WSC")
            }
            MessageType::Ack => write!(f, "1905 Ack"),
            MessageType::ApCapabilityQuery => write!(f, "AP Capability Query"),
            MessageType::ApCapabilityReport => {
                write!(f, "AP Capability Report")
            }
            MessageType::MultiApPolicyConfigRequest => {
                write!(f, "Multi-AP Policy Config Request")
            }
            MessageType::ApMetricsQuery => write!(f, "AP Metrics Query"),
            MessageType::ApMetricsResponse => write!(f, "AP Metrics Response"),
            MessageType::ClientSteeringRequest => {
                write!(f, "Client Steering Request")
            }
            MessageType::ClientSteeringBtmReport => {
                write!(f, "Client Steering BTM Report")
            }
            MessageType::SteeringCompleted => write!(f, "Steering Completed"),
        }
    }
}

// ===== impl TlvType =====

impl TlvType {
    // Looks up a TLV type from its wire value.
    pub fn decode(value: u8) -> Result<Self, SchemaError> {
        TlvType::from_u8(value).ok_or(SchemaError::UnknownTlvType(value))
    }
}

impl TryFrom<u8> for TlvType {
    type Error = SchemaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TlvType::decode(value)
    }
}

impl std::fmt::Display for TlvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TlvType::EndOfMessage => write!(f, "End of Message"),
            TlvType::AlMacAddress => write!(f, "AL MAC Address"),
            TlvType::MacAddress => write!(f, "MAC Address"),
            TlvType::LinkMetricQuery => write!(f, "Link Metric Query"),
            TlvType::TransmitterLinkMetric => {
                write!(f, "Transmitter Link Metric")
            }
            TlvType::ReceiverLinkMetric => write!(f, "Receiver Link Metric"),
            TlvType::LinkMetricResultCode => {
                write!(f, "Link Metric Result Code")
            }
            TlvType::SteeringPolicy => write!(f, "Steering Policy"),
            TlvType::MetricReportingPolicy => {
                write!(f, "Metric Reporting Policy")
            }
            TlvType::ClientAssociationEvent => {
                write!(f, "Client Association Event")
            }
            TlvType::SteeringRequest => write!(f, "Steering Request"),
            TlvType::SteeringBtmReport => write!(f, "Steering BTM Report"),
        }
    }
}
