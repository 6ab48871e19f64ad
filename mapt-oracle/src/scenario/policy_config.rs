//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use async_trait::async_trait;
use mapt_cmdu::tlv::{MetricReportingPolicyTlv, SteeringPolicyTlv};
use mapt_cmdu::{MessageType, Tlv, TlvType};

use crate::capture::MessageFilter;
use crate::error::Error;
use crate::invariant::assert_equal;
use crate::scenario::{
    AGENT1, CONTROLLER, Precondition, Scenario, ScenarioCxt,
    check_requirements, tlv_literal,
};
use crate::topology::{RoleKind, Topology};

// No disallowed stations, agent initiated RCPI-based steering on the given
// radio.
const STEERING_POLICY: &str = "{0x00 0x00 0x01 {$ 0x00 0x00 0x00}}";

// No periodic AP metrics, include traffic stats and link metrics of the
// associated stations of the given radio.
const METRIC_REPORTING_POLICY: &str = "{0x00 0x01 {$ 0x00 0x00 0x00 0xc0}}";

// The controller configures the steering and metric reporting policies of
// agent1, which must acknowledge the request.
#[derive(Debug)]
pub struct PolicyConfig;

#[async_trait]
impl Scenario for PolicyConfig {
    fn name(&self) -> &'static str {
        "policy-config"
    }

    fn description(&self) -> &'static str {
        "Multi-AP policy configuration with metric reporting policy"
    }

    fn required_roles(&self) -> &'static [(&'static str, RoleKind)] {
        &[(CONTROLLER, RoleKind::Controller), (AGENT1, RoleKind::Agent)]
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

        if topology.roles[AGENT1].radios.is_empty() {
            return Precondition::Skip(format!("{AGENT1} has no radio"));
        }
        Precondition::Run
    }

    async fn run(&self, cxt: &mut ScenarioCxt) -> Result<(), Error> {
        let controller = cxt.al_mac(CONTROLLER)?;
        let agent1 = cxt.al_mac(AGENT1)?;
        let ruid = cxt
            .role(AGENT1)?
            .radios
            .first()
            .map(|radio| radio.ruid)
            .ok_or_else(|| {
                Error::Precondition(format!("{AGENT1} has no radio"))
            })?;

        let steering =
            tlv_literal(TlvType::SteeringPolicy, STEERING_POLICY, &[ruid])?;
        let metric_reporting = tlv_literal(
            TlvType::MetricReportingPolicy,
            METRIC_REPORTING_POLICY,
            &[ruid],
        )?;
        let msg_id = cxt
            .send(
                CONTROLLER,
                AGENT1,
                MessageType::MultiApPolicyConfigRequest,
                vec![steering.clone(), metric_reporting.clone()],
            )
            .await?;

        // The request must carry exactly the configured policies.
        let request = cxt
            .find_single(
                MessageFilter::new()
                    .msg_type(MessageType::MultiApPolicyConfigRequest)
                    .src(controller)
                    .dst(agent1)
                    .msg_id(msg_id),
            )
            .await?;
        let found = request.find_tlv_single::<SteeringPolicyTlv>()?;
        assert_equal("steering policy", &steering, &Tlv::from(found.clone()))?;
        let found = request.find_tlv_single::<MetricReportingPolicyTlv>()?;
        assert_equal(
            "metric reporting policy",
            &metric_reporting,
            &Tlv::from(found.clone()),
        )?;

        cxt.find_single(
            MessageFilter::new()
                .msg_type(MessageType::Ack)
                .src(agent1)
                .dst(controller)
                .msg_id(msg_id),
        )
        .await?;

        Ok(())
    }
}
