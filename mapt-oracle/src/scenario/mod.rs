//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod client_steering;
pub mod link_metric_query;
pub mod policy_config;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use mapt_cmdu::{MessageType, Tlv, TlvType};
use mapt_utils::mac_addr::MacAddr;
use tracing::{Instrument, debug_span};

use crate::capture::{Capture, MessageFilter};
use crate::debug::Debug;
use crate::device::{Device, DeviceLookup, Sniffer, StationControl};
use crate::error::Error;
use crate::exchange::ExchangeDriver;
use crate::log::LogWatcher;
use crate::message::{CapturedMessage, Envelope};
use crate::poll::PollPolicy;
use crate::topology::{Role, RoleKind, Topology};

// Logical role names shared by the scenarios.
pub const CONTROLLER: &str = "controller";
pub const AGENT1: &str = "agent1";
pub const AGENT2: &str = "agent2";
pub const STA1: &str = "sta1";

// Conformance scenario.
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    // Roles that must be present in the topology, with their kind.
    fn required_roles(&self) -> &'static [(&'static str, RoleKind)];

    // Stations that must be present in the topology.
    fn required_stations(&self) -> &'static [&'static str] {
        &[]
    }

    // Evaluated before any message is sent.
    fn precondition(&self, topology: &Topology) -> Precondition {
        check_requirements(
            topology,
            self.required_roles(),
            self.required_stations(),
        )
    }

    async fn run(&self, cxt: &mut ScenarioCxt) -> Result<(), Error>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Precondition {
    Run,
    Skip(String),
    Fail(String),
}

#[derive(Debug)]
pub enum ScenarioOutcome {
    Passed,
    Skipped(String),
    Failed(Error),
}

// External collaborators of a run.
#[derive(Clone, new)]
pub struct TestBed {
    pub lookup: Arc<dyn DeviceLookup>,
    pub sniffer: Arc<dyn Sniffer>,
    pub stations: Arc<dyn StationControl>,
}

// State owned by a running scenario.
pub struct ScenarioCxt {
    pub topology: Arc<Topology>,
    pub devices: BTreeMap<String, Arc<dyn Device>>,
    pub capture: Capture,
    pub exchange: ExchangeDriver,
    pub poll: PollPolicy,
    pub stations: Arc<dyn StationControl>,
}

// ===== impl ScenarioOutcome =====

impl ScenarioOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioOutcome::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ScenarioOutcome::Failed(_))
    }
}

impl std::fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioOutcome::Passed => write!(f, "PASS"),
            ScenarioOutcome::Skipped(reason) => write!(f, "SKIP ({reason})"),
            ScenarioOutcome::Failed(error) => write!(f, "FAIL ({error})"),
        }
    }
}

// ===== impl ScenarioCxt =====

impl ScenarioCxt {
    pub fn role(&self, name: &str) -> Result<&Role, Error> {
        self.topology.role(name)
    }

    pub fn al_mac(&self, name: &str) -> Result<MacAddr, Error> {
        self.role(name).map(|role| role.al_mac)
    }

    pub fn station_mac(&self, name: &str) -> Result<MacAddr, Error> {
        self.topology.station(name).map(|station| station.mac)
    }

    // Returns the device handle resolved for the given role.
    pub fn device(&self, name: &str) -> Result<Arc<dyn Device>, Error> {
        self.devices
            .get(name)
            .cloned()
            .ok_or_else(|| Error::MissingRole(name.to_owned()))
    }

    // Sends a message between two roles, returning its message id.
    pub async fn send(
        &mut self,
        src: &str,
        dst: &str,
        msg_type: MessageType,
        tlvs: Vec<Tlv>,
    ) -> Result<u16, Error> {
        let source = self.device(src)?;
        let destination = self.al_mac(dst)?;
        let envelope = Envelope::new(msg_type, destination, tlvs);
        self.exchange.send(&*source, envelope).await
    }

    // Waits for the only captured message matching `filter`.
    pub async fn find_single(
        &self,
        filter: MessageFilter,
    ) -> Result<Arc<CapturedMessage>, Error> {
        self.capture.find_single_within(&filter, &self.poll).await
    }

    // Starts following the log of the given role from its current end.
    pub async fn log_watcher(&self, name: &str) -> Result<LogWatcher, Error> {
        LogWatcher::new(self.device(name)?).await
    }
}

impl std::fmt::Debug for ScenarioCxt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioCxt")
            .field("topology", &self.topology)
            .field("devices", &self.devices.keys().collect::<Vec<_>>())
            .field("capture", &self.capture)
            .field("exchange", &self.exchange)
            .field("poll", &self.poll)
            .finish()
    }
}

// ===== global functions =====

// Checks the topology against the roles and stations a scenario needs.
//
// A missing participant skips the scenario; a role of the wrong kind fails
// it.
pub fn check_requirements(
    topology: &Topology,
    roles: &[(&str, RoleKind)],
    stations: &[&str],
) -> Precondition {
    for (name, kind) in roles {
        match topology.roles.get(*name) {
            None => {
                return Precondition::Skip(format!(
                    "role {name} not present in the topology"
                ));
            }
            Some(role) if role.kind != *kind => {
                return Precondition::Fail(format!(
                    "role {name} is a {}, expected a {kind}",
                    role.kind
                ));
            }
            Some(_) => (),
        }
    }
    for name in stations {
        if !topology.stations.contains_key(*name) {
            return Precondition::Skip(format!(
                "station {name} not present in the topology"
            ));
        }
    }
    Precondition::Run
}

// Builds a TLV from its literal notation.
pub fn tlv_literal(
    tlv_type: TlvType,
    text: &str,
    args: &[MacAddr],
) -> Result<Tlv, Error> {
    Tlv::from_literal(tlv_type as u8, text, args).map_err(Error::from)
}

// Returns every known scenario.
pub fn all_scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(link_metric_query::LinkMetricQuery),
        Box::new(client_steering::ClientSteering),
        Box::new(policy_config::PolicyConfig),
    ]
}

pub fn find_scenario(name: &str) -> Option<Box<dyn Scenario>> {
    all_scenarios()
        .into_iter()
        .find(|scenario| scenario.name() == name)
}

// Runs a scenario to completion against the given test bed.
pub async fn run_scenario(
    scenario: &dyn Scenario,
    testbed: &TestBed,
    topology: Arc<Topology>,
    poll: PollPolicy,
) -> ScenarioOutcome {
    let span = debug_span!("scenario", name = %scenario.name());
    async move {
        Debug::ScenarioStart.log();

        match scenario.precondition(&topology) {
            Precondition::Run => (),
            Precondition::Skip(reason) => {
                Debug::ScenarioSkip(&reason).log();
                return ScenarioOutcome::Skipped(reason);
            }
            Precondition::Fail(reason) => {
                let error = Error::Precondition(reason);
                error.log();
                return ScenarioOutcome::Failed(error);
            }
        }

        match execute(scenario, testbed, topology, poll).await {
            Ok(()) => {
                Debug::ScenarioPass.log();
                ScenarioOutcome::Passed
            }
            Err(error) => {
                error.log();
                ScenarioOutcome::Failed(error)
            }
        }
    }
    .instrument(span)
    .await
}

async fn execute(
    scenario: &dyn Scenario,
    testbed: &TestBed,
    topology: Arc<Topology>,
    poll: PollPolicy,
) -> Result<(), Error> {
    // Resolve the device handles.
    let mut devices = BTreeMap::new();
    for (name, _) in scenario.required_roles() {
        let role = topology.role(name)?;
        let device =
            testbed.lookup.lookup(name, &role.target, &role.image).await?;
        devices.insert(name.to_string(), device);
    }

    // Start capturing.
    let capture = Capture::new();
    let frames_rx = testbed.sniffer.start(scenario.name()).await?;
    let _collector = capture.start_collector(frames_rx);
    Debug::CaptureStart(scenario.name()).log();

    let mut cxt = ScenarioCxt {
        topology,
        devices,
        capture,
        exchange: ExchangeDriver::new(),
        poll,
        stations: testbed.stations.clone(),
    };
    scenario.run(&mut cxt).await?;
    cxt.capture.check_malformed()
}
