//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use async_trait::async_trait;
use mapt_cmdu::consts::ClientAssociationFlags;
use mapt_cmdu::tlv::{ClientAssociationEventTlv, SteeringBtmReportTlv};
use mapt_cmdu::{MessageType, TlvType};
use mapt_utils::mac_addr::MacAddr;

use crate::capture::MessageFilter;
use crate::error::Error;
use crate::invariant::{
    ExpectedEvent, assert_equal, assert_ordered_acknowledgement,
};
use crate::scenario::{
    AGENT1, AGENT2, CONTROLLER, Precondition, STA1, Scenario, ScenarioCxt,
    check_requirements, tlv_literal,
};
use crate::topology::{RoleKind, Topology};

// Steering mandate: disassociation imminent, abridged, 5000 TU timer, one
// station, one target BSS (operating class 115, channel 36).
const MANDATE: &str = "{$ 0xe0 0x0000 0x1388 0x01 {$} 0x01 {$ 0x73 0x24}}";

// Steering opportunity: 10 seconds window, all associated stations.
const OPPORTUNITY: &str = "{$ 0x00 0x000A 0x0000 0x00}";

// The controller steers a station associated to agent1, first with a
// steering mandate and then with a steering opportunity.
//
// Every request must be acknowledged, the mandate must be followed by a BTM
// report and the opportunity by a steering completed notification, both
// acknowledged by the controller.
#[derive(Debug)]
pub struct ClientSteering;

#[async_trait]
impl Scenario for ClientSteering {
    fn name(&self) -> &'static str {
        "client-steering"
    }

    fn description(&self) -> &'static str {
        "client steering mandate and opportunity"
    }

    fn required_roles(&self) -> &'static [(&'static str, RoleKind)] {
        &[
            (CONTROLLER, RoleKind::Controller),
            (AGENT1, RoleKind::Agent),
            (AGENT2, RoleKind::Agent),
        ]
    }

    fn required_stations(&self) -> &'static [&'static str] {
        &[STA1]
    }

    fn precondition(&self, topology: &Topology) -> Precondition {
        let precondition = check_requirements(
            topology,
            self.required_roles(),
            self.required_stations(),
        );
        if precondition != Precondition::Run {
            return precondition;
        }

        for agent in [AGENT1, AGENT2] {
            if topology.roles[agent].first_bss().is_none() {
                return Precondition::Skip(format!("{agent} has no BSS"));
            }
        }
        Precondition::Run
    }

    async fn run(&self, cxt: &mut ScenarioCxt) -> Result<(), Error> {
        let controller = cxt.al_mac(CONTROLLER)?;
        let agent1 = cxt.al_mac(AGENT1)?;
        let agent2 = cxt.al_mac(AGENT2)?;
        let sta = cxt.station_mac(STA1)?;
        let bssid1 = first_bss(cxt, AGENT1)?;
        let bssid2 = first_bss(cxt, AGENT2)?;

        // Make sure both agents are reachable.
        for agent in [AGENT1, AGENT2] {
            let mut log = cxt.log_watcher(agent).await?;
            cxt.send(CONTROLLER, agent, MessageType::TopologyQuery, vec![])
                .await?;
            log.await_line("TOPOLOGY_QUERY_MESSAGE", &cxt.poll).await?;
        }
        cxt.capture.reset();

        // Associate the station and wait for agent1 to report it.
        cxt.stations.associate(sta, bssid1).await?;
        for dst in [controller, agent2] {
            let notification = cxt
                .find_single(
                    MessageFilter::new()
                        .msg_type(MessageType::TopologyNotification)
                        .src(agent1)
                        .dst(dst),
                )
                .await?;
            let event =
                notification.find_tlv_single::<ClientAssociationEventTlv>()?;
            assert_equal("associated client", &sta, &event.client_mac)?;
            assert_equal("associated bssid", &bssid1, &event.bssid)?;
            assert_equal(
                "association event",
                &ClientAssociationFlags::JOINED,
                &event.flags,
            )?;
        }

        let mut agent1_log = cxt.log_watcher(AGENT1).await?;
        let mut controller_log = cxt.log_watcher(CONTROLLER).await?;

        // Steering mandate.
        let mandate =
            tlv_literal(TlvType::SteeringRequest, MANDATE, &[
                bssid1, sta, bssid2,
            ])?;
        let mandate_id = cxt
            .send(
                CONTROLLER,
                AGENT1,
                MessageType::ClientSteeringRequest,
                vec![mandate],
            )
            .await?;
        agent1_log.await_line("Got steer request", &cxt.poll).await?;
        controller_log
            .await_line("CLIENT_STEERING_BTM_REPORT_MESSAGE", &cxt.poll)
            .await?;
        controller_log
            .await_line(
                &format!("BTM_REPORT from source bssid {bssid1}"),
                &cxt.poll,
            )
            .await?;
        agent1_log.await_line("ACK_MESSAGE", &cxt.poll).await?;

        let report = cxt
            .find_single(
                MessageFilter::new()
                    .msg_type(MessageType::ClientSteeringBtmReport)
                    .src(agent1)
                    .dst(controller),
            )
            .await?;
        let tlv = report.find_tlv_single::<SteeringBtmReportTlv>()?;
        assert_equal("BTM report bssid", &bssid1, &tlv.bssid)?;
        assert_equal("BTM report station", &sta, &tlv.sta_mac)?;

        // Steering opportunity.
        let opportunity =
            tlv_literal(TlvType::SteeringRequest, OPPORTUNITY, &[bssid1])?;
        let opportunity_id = cxt
            .send(
                CONTROLLER,
                AGENT1,
                MessageType::ClientSteeringRequest,
                vec![opportunity],
            )
            .await?;
        agent1_log
            .await_line("CLIENT_STEERING_REQUEST_MESSAGE", &cxt.poll)
            .await?;
        controller_log.await_line("ACK_MESSAGE", &cxt.poll).await?;
        controller_log
            .await_line("STEERING_COMPLETED_MESSAGE", &cxt.poll)
            .await?;
        agent1_log.await_line("ACK_MESSAGE", &cxt.poll).await?;

        let completed = cxt
            .find_single(
                MessageFilter::new()
                    .msg_type(MessageType::SteeringCompleted)
                    .src(agent1)
                    .dst(controller),
            )
            .await?;
        let completed_ack = MessageFilter::new()
            .msg_type(MessageType::Ack)
            .src(controller)
            .dst(agent1)
            .msg_id(completed.msg_id());
        cxt.find_single(completed_ack.clone()).await?;

        // Check the whole exchange happened in order.
        let request = |msg_id| {
            MessageFilter::new()
                .msg_type(MessageType::ClientSteeringRequest)
                .src(controller)
                .dst(agent1)
                .msg_id(msg_id)
        };
        let agent_ack = |msg_id| {
            MessageFilter::new()
                .msg_type(MessageType::Ack)
                .src(agent1)
                .dst(controller)
                .msg_id(msg_id)
        };
        let controller_ack = |msg_id| {
            MessageFilter::new()
                .msg_type(MessageType::Ack)
                .src(controller)
                .dst(agent1)
                .msg_id(msg_id)
        };
        let expected = [
            ("REQUEST", request(mandate_id)),
            ("ACK", agent_ack(mandate_id)),
            (
                "REPORT",
                MessageFilter::new()
                    .msg_type(MessageType::ClientSteeringBtmReport)
                    .src(agent1)
                    .dst(controller)
                    .msg_id(report.msg_id()),
            ),
            ("ACK", controller_ack(report.msg_id())),
            ("REQUEST", request(opportunity_id)),
            ("ACK", agent_ack(opportunity_id)),
            (
                "COMPLETED",
                MessageFilter::new()
                    .msg_type(MessageType::SteeringCompleted)
                    .src(agent1)
                    .dst(controller)
                    .msg_id(completed.msg_id()),
            ),
            ("ACK", completed_ack),
        ]
        .into_iter()
        .map(|(label, filter)| ExpectedEvent::new(label.to_owned(), filter))
        .collect::<Vec<_>>();
        assert_ordered_acknowledgement(&expected, &cxt.capture.snapshot())
    }
}

// ===== helper functions =====

fn first_bss(cxt: &ScenarioCxt, name: &str) -> Result<MacAddr, Error> {
    let role = cxt.role(name)?;
    role.first_bss()
        .ok_or_else(|| Error::Precondition(format!("{name} has no BSS")))
}
