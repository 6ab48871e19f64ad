//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use async_trait::async_trait;
use mapt_cmdu::consts::{LinkMetricNeighborType, LinkMetricsRequested};
use mapt_cmdu::tlv::{
    LinkMetricQueryTlv, ReceiverLinkMetricTlv, TransmitterLinkMetricTlv,
};
use mapt_cmdu::{MessageType, TlvType};

use crate::capture::MessageFilter;
use crate::error::Error;
use crate::invariant::{LinkType, assert_equal, verify_links};
use crate::scenario::{
    AGENT1, AGENT2, CONTROLLER, Scenario, ScenarioCxt, tlv_literal,
};
use crate::topology::RoleKind;

// All neighbors, both Tx and Rx metrics.
const QUERY: &str = "0x00 0x02";

// The controller queries the link metrics of agent1 towards all of its
// neighbors. Agent1 must report exactly one transmitter and one receiver
// link for each of the controller and agent2, with valid interface
// addresses, and no link towards any other node.
#[derive(Debug)]
pub struct LinkMetricQuery;

#[async_trait]
impl Scenario for LinkMetricQuery {
    fn name(&self) -> &'static str {
        "link-metric-query"
    }

    fn description(&self) -> &'static str {
        "link metric query towards all neighbors"
    }

    fn required_roles(&self) -> &'static [(&'static str, RoleKind)] {
        &[
            (CONTROLLER, RoleKind::Controller),
            (AGENT1, RoleKind::Agent),
            (AGENT2, RoleKind::Agent),
        ]
    }

    async fn run(&self, cxt: &mut ScenarioCxt) -> Result<(), Error> {
        let controller = cxt.al_mac(CONTROLLER)?;
        let agent1 = cxt.al_mac(AGENT1)?;
        let agent2 = cxt.al_mac(AGENT2)?;

        let query = tlv_literal(TlvType::LinkMetricQuery, QUERY, &[])?;
        let msg_id = cxt
            .send(CONTROLLER, AGENT1, MessageType::LinkMetricQuery, vec![query])
            .await?;

        // Check the query as seen on the wire.
        let request = cxt
            .find_single(
                MessageFilter::new()
                    .msg_type(MessageType::LinkMetricQuery)
                    .src(controller)
                    .dst(agent1)
                    .msg_id(msg_id),
            )
            .await?;
        let tlv = request.find_tlv_single::<LinkMetricQueryTlv>()?;
        assert_equal(
            "link metric query neighbor type",
            &LinkMetricNeighborType::AllNeighbors,
            &tlv.neighbor_type,
        )?;
        assert_equal(
            "link metric query metrics",
            &LinkMetricsRequested::BothTxRx,
            &tlv.metrics_requested,
        )?;

        let response = cxt
            .find_single(
                MessageFilter::new()
                    .msg_type(MessageType::LinkMetricResponse)
                    .src(agent1)
                    .dst(controller)
                    .msg_id(msg_id),
            )
            .await?;
        // Agent1 neighbors the controller and agent2 only.
        let expected = [controller, agent2];
        verify_links(
            &response.find_tlvs::<TransmitterLinkMetricTlv>(),
            agent1,
            &expected,
            LinkType::Transmitter,
        )?;
        verify_links(
            &response.find_tlvs::<ReceiverLinkMetricTlv>(),
            agent1,
            &expected,
            LinkType::Receiver,
        )?;

        Ok(())
    }
}
