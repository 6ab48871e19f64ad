//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mapt_cmdu::consts::{
    BTM_STATUS_ACCEPT, ClientAssociationFlags, LinkMetricNeighborType,
    LinkMetricResultCode, LinkMetricsRequested, MEDIA_TYPE_IEEE_802_3AB,
};
use mapt_cmdu::tlv::{
    AlMacAddressTlv, ClientAssociationEventTlv, LinkMetricQueryTlv,
    LinkMetricResultCodeTlv, ReceiverLinkMetricTlv, RxLinkMetric,
    SteeringBtmReportTlv, SteeringRequestTlv, TransmitterLinkMetricTlv,
    TxLinkMetric,
};
use mapt_cmdu::{Cmdu, MessageType, Tlv, TlvKind};
use mapt_utils::mac_addr::MacAddr;
use mapt_utils::{UnboundedReceiver, UnboundedSender};
use tokio::sync::mpsc;

use crate::device::{
    CapturedFrame, Device, DeviceLookup, Sniffer, StationControl,
};
use crate::error::Error;
use crate::scenario::{AGENT1, AGENT2, CONTROLLER, STA1, TestBed};
use crate::topology::{Radio, Role, RoleKind, Station, Topology};

// AL MAC address reported by the `UnexpectedNeighbor` fault.
pub const STRANGER: MacAddr = MacAddr::new([0x02, 0xff, 0x00, 0x00, 0x00, 0x01]);

const BTM_STATUS_REJECT_UNSPECIFIED: u8 = 0x01;

// In-memory network of controllers and agents.
//
// Messages are processed synchronously: by the time a send returns, every
// message it triggered has been delivered, logged and handed to the
// sniffers.
#[derive(Clone, Debug)]
pub struct SimNetwork {
    state: Arc<Mutex<SimState>>,
}

// Handle to one node of the simulated network.
#[derive(Debug)]
pub struct SimDevice {
    name: String,
    al_mac: MacAddr,
    network: SimNetwork,
}

// Misbehavior that can be injected into a node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Fault {
    // Link metric responses report the first neighbor twice.
    DuplicateLink,
    // Link metric responses carry all-zero local interface addresses.
    ZeroInterfaceAddress,
    // Link metric responses include a node outside the network.
    UnexpectedNeighbor,
    // Steering mandates aren't acknowledged.
    MissingAck,
    // Every transmitted frame is followed by a truncated copy.
    MalformedFrame,
}

#[derive(Debug, Default)]
struct SimState {
    nodes: BTreeMap<MacAddr, SimNode>,
    sniffers: Vec<UnboundedSender<CapturedFrame>>,
    queue: VecDeque<(MacAddr, MacAddr, Cmdu)>,
    next_msg_id: u16,
}

#[derive(Debug)]
struct SimNode {
    name: String,
    kind: RoleKind,
    bsses: Vec<MacAddr>,
    log: Vec<String>,
    faults: BTreeSet<Fault>,
}

// ===== impl SimNetwork =====

impl SimNetwork {
    // Creates a network with one node per topology role.
    pub fn new(topology: &Topology) -> SimNetwork {
        let nodes = topology
            .roles
            .iter()
            .map(|(name, role)| {
                let node = SimNode {
                    name: name.clone(),
                    kind: role.kind,
                    bsses: role
                        .radios
                        .iter()
                        .flat_map(|radio| radio.bsses.iter().copied())
                        .collect(),
                    log: vec![],
                    faults: Default::default(),
                };
                (role.al_mac, node)
            })
            .collect();
        let state = SimState {
            nodes,
            next_msg_id: 0x4000,
            ..Default::default()
        };
        SimNetwork {
            state: Arc::new(Mutex::new(state)),
        }
    }

    // Makes the given node misbehave from now on.
    pub fn inject(&self, name: &str, fault: Fault) {
        let mut state = self.state.lock().unwrap();
        if let Some(node) = state.nodes.values_mut().find(|node| node.name == name)
        {
            node.faults.insert(fault);
        }
    }

    // Returns the log lines of the given node.
    pub fn log(&self, name: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .values()
            .find(|node| node.name == name)
            .map(|node| node.log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DeviceLookup for SimNetwork {
    async fn lookup(
        &self,
        name: &str,
        _target: &str,
        _image: &str,
    ) -> Result<Arc<dyn Device>, Error> {
        let state = self.state.lock().unwrap();
        let (al_mac, _) = state
            .nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .ok_or_else(|| {
                Error::Device(
                    name.to_owned(),
                    "not present in the simulated network".to_owned(),
                )
            })?;
        Ok(Arc::new(SimDevice {
            name: name.to_owned(),
            al_mac: *al_mac,
            network: self.clone(),
        }))
    }
}

#[async_trait]
impl Sniffer for SimNetwork {
    async fn start(
        &self,
        _label: &str,
    ) -> Result<UnboundedReceiver<CapturedFrame>, Error> {
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        self.state.lock().unwrap().sniffers.push(frames_tx);
        Ok(frames_rx)
    }
}

#[async_trait]
impl StationControl for SimNetwork {
    async fn associate(&self, sta: MacAddr, bssid: MacAddr) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        let agent = state
            .nodes
            .iter()
            .find(|(_, node)| node.bsses.contains(&bssid))
            .map(|(al_mac, _)| *al_mac)
            .ok_or_else(|| {
                Error::Device(sta.to_string(), format!("unknown BSS {bssid}"))
            })?;

        // Report the new client to every other node.
        let event = ClientAssociationEventTlv::new(
            sta,
            bssid,
            ClientAssociationFlags::JOINED,
        );
        for peer in state.peers_of(agent) {
            let msg_id = state.allocate_msg_id();
            let cmdu = Cmdu::new(
                MessageType::TopologyNotification,
                msg_id,
                vec![event.clone().into()],
            );
            state.transmit(agent, peer, cmdu);
        }
        state.run();

        Ok(())
    }
}

// ===== impl SimDevice =====

#[async_trait]
impl Device for SimDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn al_mac(&self) -> MacAddr {
        self.al_mac
    }

    async fn send_cmdu(&self, dst: MacAddr, cmdu: &Cmdu) -> Result<(), Error> {
        // Messages that don't fit the wire format never leave the node.
        cmdu.encode()?;

        let mut state = self.network.state.lock().unwrap();
        state.transmit(self.al_mac, dst, cmdu.clone());
        state.run();
        Ok(())
    }

    async fn read_log(&self) -> Result<String, Error> {
        let state = self.network.state.lock().unwrap();
        state
            .nodes
            .get(&self.al_mac)
            .map(|node| node.log.join("\n"))
            .ok_or_else(|| {
                Error::Device(self.name.clone(), "not running".to_owned())
            })
    }
}

// ===== impl SimState =====

impl SimState {
    fn allocate_msg_id(&mut self) -> u16 {
        let msg_id = self.next_msg_id;
        self.next_msg_id = self.next_msg_id.wrapping_add(1);
        msg_id
    }

    fn peers_of(&self, al_mac: MacAddr) -> Vec<MacAddr> {
        self.nodes
            .keys()
            .filter(|peer| **peer != al_mac)
            .copied()
            .collect()
    }

    fn has_fault(&self, al_mac: MacAddr, fault: Fault) -> bool {
        self.nodes
            .get(&al_mac)
            .is_some_and(|node| node.faults.contains(&fault))
    }

    fn log(&mut self, al_mac: MacAddr, line: String) {
        if let Some(node) = self.nodes.get_mut(&al_mac) {
            node.log.push(line);
        }
    }

    fn transmit(&mut self, src: MacAddr, dst: MacAddr, cmdu: Cmdu) {
        self.queue.push_back((src, dst, cmdu));
    }

    fn acknowledge(&mut self, src: MacAddr, dst: MacAddr, msg_id: u16) {
        self.transmit(src, dst, Cmdu::new(MessageType::Ack, msg_id, vec![]));
    }

    // Processes queued messages until the network is quiet.
    fn run(&mut self) {
        while let Some((src, dst, cmdu)) = self.queue.pop_front() {
            self.sniff(src, dst, &cmdu);
            self.deliver(src, dst, cmdu);
        }
    }

    fn sniff(&mut self, src: MacAddr, dst: MacAddr, cmdu: &Cmdu) {
        // Simulated nodes only build messages that fit the wire format.
        let Ok(data) = cmdu.encode() else {
            return;
        };
        let mut frames = vec![CapturedFrame::new(src, dst, data.clone())];
        if self.has_fault(src, Fault::MalformedFrame) {
            let truncated = data.slice(..Cmdu::HDR_SIZE + 2);
            frames.push(CapturedFrame::new(src, dst, truncated));
        }

        // Sessions whose receiver is gone are dropped.
        self.sniffers.retain(|frames_tx| {
            frames
                .iter()
                .all(|frame| frames_tx.send(frame.clone()).is_ok())
        });
    }

    fn deliver(&mut self, src: MacAddr, dst: MacAddr, cmdu: Cmdu) {
        let Some(node) = self.nodes.get_mut(&dst) else {
            return;
        };
        node.log
            .push(format!("Received {} from {src}", log_name(cmdu.msg_type)));

        match (node.kind, cmdu.msg_type) {
            (_, MessageType::TopologyQuery) => {
                let response = Cmdu::new(
                    MessageType::TopologyResponse,
                    cmdu.msg_id,
                    vec![AlMacAddressTlv::new(dst).into()],
                );
                self.transmit(dst, src, response);
            }
            (_, MessageType::LinkMetricQuery) => {
                self.process_link_metric_query(dst, src, &cmdu);
            }
            (RoleKind::Agent, MessageType::ClientSteeringRequest) => {
                self.process_steering_request(dst, src, &cmdu);
            }
            (RoleKind::Agent, MessageType::MultiApPolicyConfigRequest) => {
                self.acknowledge(dst, src, cmdu.msg_id);
            }
            (RoleKind::Controller, MessageType::ClientSteeringBtmReport) => {
                for report in find_tlvs::<SteeringBtmReportTlv>(&cmdu) {
                    let line =
                        format!("BTM_REPORT from source bssid {}", report.bssid);
                    self.log(dst, line);
                }
                self.acknowledge(dst, src, cmdu.msg_id);
            }
            (RoleKind::Controller, MessageType::SteeringCompleted) => {
                self.acknowledge(dst, src, cmdu.msg_id);
            }
            _ => (),
        }
    }

    fn process_link_metric_query(
        &mut self,
        node: MacAddr,
        src: MacAddr,
        cmdu: &Cmdu,
    ) {
        let Some(query) = find_tlvs::<LinkMetricQueryTlv>(cmdu).next() else {
            return;
        };

        let mut neighbors = match query.neighbor_type {
            LinkMetricNeighborType::AllNeighbors => self.peers_of(node),
            LinkMetricNeighborType::SpecificNeighbor => query
                .neighbor
                .filter(|neighbor| {
                    *neighbor != node && self.nodes.contains_key(neighbor)
                })
                .into_iter()
                .collect(),
        };

        let mut tlvs: Vec<Tlv> = vec![];
        if neighbors.is_empty() {
            let code = LinkMetricResultCode::InvalidNeighbor;
            tlvs.push(LinkMetricResultCodeTlv::new(code).into());
        } else {
            if self.has_fault(node, Fault::DuplicateLink) {
                neighbors.push(neighbors[0]);
            }
            if self.has_fault(node, Fault::UnexpectedNeighbor) {
                neighbors.push(STRANGER);
            }
            let zero_iface = self.has_fault(node, Fault::ZeroInterfaceAddress);

            for neighbor in neighbors {
                let local_iface = if zero_iface {
                    MacAddr::ZERO
                } else {
                    iface_mac(node, neighbor)
                };
                let neighbor_iface = iface_mac(neighbor, node);

                if query.metrics_requested != LinkMetricsRequested::RxOnly {
                    let link = TxLinkMetric::new(
                        local_iface,
                        neighbor_iface,
                        MEDIA_TYPE_IEEE_802_3AB,
                        0,
                        0,
                        1000,
                        940,
                        100,
                        1000,
                    );
                    let tlv = TransmitterLinkMetricTlv::new(
                        node,
                        neighbor,
                        vec![link],
                    );
                    tlvs.push(tlv.into());
                }
                if query.metrics_requested != LinkMetricsRequested::TxOnly {
                    let link = RxLinkMetric::new(
                        local_iface,
                        neighbor_iface,
                        MEDIA_TYPE_IEEE_802_3AB,
                        0,
                        1000,
                        0xff,
                    );
                    let tlv =
                        ReceiverLinkMetricTlv::new(node, neighbor, vec![link]);
                    tlvs.push(tlv.into());
                }
            }
        }

        let response =
            Cmdu::new(MessageType::LinkMetricResponse, cmdu.msg_id, tlvs);
        self.transmit(node, src, response);
    }

    fn process_steering_request(
        &mut self,
        node: MacAddr,
        src: MacAddr,
        cmdu: &Cmdu,
    ) {
        let Some(request) =
            find_tlvs::<SteeringRequestTlv>(cmdu).next().cloned()
        else {
            return;
        };
        self.log(node, "Got steer request".to_owned());

        let mandate = request.is_mandate();
        if !mandate || !self.has_fault(node, Fault::MissingAck) {
            self.acknowledge(node, src, cmdu.msg_id);
        }

        if mandate {
            let (status_code, target_bssid) = match request.targets.first() {
                Some(target) => (BTM_STATUS_ACCEPT, Some(target.bssid)),
                None => (BTM_STATUS_REJECT_UNSPECIFIED, None),
            };
            for sta in request.stas {
                let report = SteeringBtmReportTlv::new(
                    request.bssid,
                    sta,
                    status_code,
                    target_bssid,
                );
                let msg_id = self.allocate_msg_id();
                let cmdu = Cmdu::new(
                    MessageType::ClientSteeringBtmReport,
                    msg_id,
                    vec![report.into()],
                );
                self.transmit(node, src, cmdu);
            }
        } else {
            let msg_id = self.allocate_msg_id();
            let cmdu = Cmdu::new(MessageType::SteeringCompleted, msg_id, vec![]);
            self.transmit(node, src, cmdu);
        }
    }
}

// ===== helper functions =====

fn role(kind: RoleKind, id: u8, bsses: usize) -> Role {
    let radios = if bsses == 0 {
        vec![]
    } else {
        vec![Radio {
            ruid: MacAddr::new([0x02, 0x00, 0x00, id, 0x00, 0x00]),
            bsses: (1..=bsses as u8)
                .map(|bss| MacAddr::new([0x02, 0x00, 0x00, id, bss, 0x00]))
                .collect(),
        }]
    };
    Role {
        kind,
        al_mac: MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, id]),
        target: "sim".to_owned(),
        image: String::new(),
        radios,
    }
}

fn find_tlvs<'a, T: TlvKind + 'a>(cmdu: &'a Cmdu) -> impl Iterator<Item = &'a T> {
    cmdu.tlvs.iter().filter_map(T::from_tlv)
}

// Interface address of `local` on its link towards `neighbor`.
fn iface_mac(local: MacAddr, neighbor: MacAddr) -> MacAddr {
    let local = local.as_bytes();
    let neighbor = neighbor.as_bytes();
    MacAddr::new([0x02, 0x10, local[4], local[5], neighbor[4], neighbor[5]])
}

// Name under which devices log a received message.
fn log_name(msg_type: MessageType) -> &'static str {
    match msg_type {
        MessageType::TopologyDiscovery => "TOPOLOGY_DISCOVERY_MESSAGE",
        MessageType::TopologyNotification => "TOPOLOGY_NOTIFICATION_MESSAGE",
        MessageType::TopologyQuery => "TOPOLOGY_QUERY_MESSAGE",
        MessageType::TopologyResponse => "TOPOLOGY_RESPONSE_MESSAGE",
        MessageType::VendorSpecific => "VENDOR_SPECIFIC_MESSAGE",
        MessageType::LinkMetricQuery => "LINK_METRIC_QUERY_MESSAGE",
        MessageType::LinkMetricResponse => "LINK_METRIC_RESPONSE_MESSAGE",
        MessageType::ApAutoconfigSearch => {
            "AP_AUTOCONFIGURATION_SEARCH_MESSAGE"
        }
        MessageType::ApAutoconfigResponse => {
            "AP_AUTOCONFIGURATION_RESPONSE_MESSAGE"
        }
        MessageType::ApAutoconfigWsc => "AP_AUTOCONFIGURATION_WSC_MESSAGE",
        MessageType::Ack => "ACK_MESSAGE",
        MessageType::ApCapabilityQuery => "AP_CAPABILITY_QUERY_MESSAGE",
        MessageType::ApCapabilityReport => "AP_CAPABILITY_REPORT_MESSAGE",
        MessageType::MultiApPolicyConfigRequest => {
            "MULTI_AP_POLICY_CONFIG_REQUEST_MESSAGE"
        }
        MessageType::ApMetricsQuery => "AP_METRICS_QUERY_MESSAGE",
        MessageType::ApMetricsResponse => "AP_METRICS_RESPONSE_MESSAGE",
        MessageType::ClientSteeringRequest => "CLIENT_STEERING_REQUEST_MESSAGE",
        MessageType::ClientSteeringBtmReport => {
            "CLIENT_STEERING_BTM_REPORT_MESSAGE"
        }
        MessageType::SteeringCompleted => "STEERING_COMPLETED_MESSAGE",
    }
}

// ===== global functions =====

// Returns a topology with one controller, two agents with one BSS each and
// one station.
pub fn sample_topology() -> Topology {
    let roles = BTreeMap::from([
        (CONTROLLER.to_owned(), role(RoleKind::Controller, 0x01, 0)),
        (AGENT1.to_owned(), role(RoleKind::Agent, 0x02, 1)),
        (AGENT2.to_owned(), role(RoleKind::Agent, 0x03, 1)),
    ]);
    let stations = BTreeMap::from([(
        STA1.to_owned(),
        Station {
            mac: MacAddr::new([0x02, 0x00, 0x00, 0x00, 0xaa, 0x01]),
        },
    )]);
    Topology { roles, stations }
}

// Returns a test bed backed by a simulated network of the topology's
// devices.
pub fn sim_testbed(topology: &Topology) -> (SimNetwork, TestBed) {
    let network = SimNetwork::new(topology);
    let testbed = TestBed::new(
        Arc::new(network.clone()),
        Arc::new(network.clone()),
        Arc::new(network.clone()),
    );
    (network, testbed)
}
