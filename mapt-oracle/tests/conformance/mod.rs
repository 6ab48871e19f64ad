//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::Arc;
use std::time::Duration;

use mapt_oracle::PollPolicy;
use mapt_oracle::error::{Error, InvariantViolation};
use mapt_oracle::scenario::{
    AGENT1, AGENT2, CONTROLLER, STA1, ScenarioOutcome, all_scenarios,
    find_scenario, run_scenario,
};
use mapt_oracle::sim::{
    Fault, STRANGER, SimNetwork, sample_topology, sim_testbed,
};
use mapt_oracle::test::setup;
use mapt_oracle::topology::{RoleKind, Topology};
use mapt_utils::mac_addr::MacAddr;

//
// Helper functions.
//

async fn run(
    name: &str,
    topology: Topology,
    faults: &[(&str, Fault)],
) -> (SimNetwork, ScenarioOutcome) {
    setup();
    let (network, testbed) = sim_testbed(&topology);
    for (role, fault) in faults {
        network.inject(role, *fault);
    }
    let scenario = find_scenario(name).unwrap();
    let poll = PollPolicy::new(Duration::from_millis(10), Duration::from_secs(1));
    let outcome =
        run_scenario(scenario.as_ref(), &testbed, Arc::new(topology), poll)
            .await;
    (network, outcome)
}

fn violation(outcome: ScenarioOutcome) -> InvariantViolation {
    match outcome {
        ScenarioOutcome::Failed(Error::Invariant(violation)) => violation,
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }
}

fn al_mac(topology: &Topology, name: &str) -> MacAddr {
    topology.roles[name].al_mac
}

//
// Tests.
//

#[test]
fn scenario_registry() {
    let names = all_scenarios()
        .iter()
        .map(|scenario| scenario.name())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["link-metric-query", "client-steering", "policy-config"]
    );
    assert!(find_scenario("client-steering").is_some());
    assert!(find_scenario("unknown").is_none());
}

#[tokio::test]
async fn link_metric_query() {
    let (network, outcome) =
        run("link-metric-query", sample_topology(), &[]).await;
    assert!(outcome.is_passed(), "{outcome}");

    let log = network.log(AGENT1);
    assert!(log[0].starts_with("Received LINK_METRIC_QUERY_MESSAGE"));
}

#[tokio::test]
async fn link_metric_query_duplicate_link() {
    let topology = sample_topology();
    let agent1 = al_mac(&topology, AGENT1);
    let controller = al_mac(&topology, CONTROLLER);
    let (_, outcome) = run(
        "link-metric-query",
        topology,
        &[(AGENT1, Fault::DuplicateLink)],
    )
    .await;
    assert_eq!(
        violation(outcome),
        InvariantViolation::Duplicates(
            "tx links".to_owned(),
            vec![(format!("({agent1}, {controller})"), 2)]
        )
    );
}

#[tokio::test]
async fn link_metric_query_zero_interface() {
    let (_, outcome) = run(
        "link-metric-query",
        sample_topology(),
        &[(AGENT1, Fault::ZeroInterfaceAddress)],
    )
    .await;
    assert_eq!(
        violation(outcome),
        InvariantViolation::ZeroAddress("tx link local interface".to_owned())
    );
}

#[tokio::test]
async fn link_metric_query_unexpected_neighbor() {
    let (_, outcome) = run(
        "link-metric-query",
        sample_topology(),
        &[(AGENT1, Fault::UnexpectedNeighbor)],
    )
    .await;
    assert_eq!(
        violation(outcome),
        InvariantViolation::PeerSetMismatch {
            what: "tx links".to_owned(),
            missing: vec![],
            unexpected: vec![STRANGER],
        }
    );
}

#[tokio::test]
async fn link_metric_query_third_agent() {
    // Agent1 reports a link towards agent3, which isn't one of the
    // neighbors it is expected to have.
    let mut topology = sample_topology();
    let mut agent3 = topology.roles[AGENT2].clone();
    agent3.al_mac = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x04]);
    agent3.radios.clear();
    let agent3_mac = agent3.al_mac;
    topology.roles.insert("agent3".to_owned(), agent3);

    let (_, outcome) = run("link-metric-query", topology, &[]).await;
    assert_eq!(
        violation(outcome),
        InvariantViolation::PeerSetMismatch {
            what: "tx links".to_owned(),
            missing: vec![],
            unexpected: vec![agent3_mac],
        }
    );
}

#[tokio::test]
async fn link_metric_query_missing_role() {
    let mut topology = sample_topology();
    topology.roles.remove(AGENT2);
    let (network, outcome) = run("link-metric-query", topology, &[]).await;
    assert!(
        matches!(outcome, ScenarioOutcome::Skipped(ref reason) if reason.contains(AGENT2)),
        "{outcome}"
    );

    // Nothing was sent.
    assert!(network.log(AGENT1).is_empty());
}

#[tokio::test]
async fn link_metric_query_wrong_role_kind() {
    let mut topology = sample_topology();
    if let Some(role) = topology.roles.get_mut(AGENT2) {
        role.kind = RoleKind::Controller;
    }
    let (network, outcome) = run("link-metric-query", topology, &[]).await;
    assert!(
        matches!(outcome, ScenarioOutcome::Failed(Error::Precondition(_))),
        "{outcome}"
    );
    assert!(network.log(AGENT1).is_empty());
}

#[tokio::test]
async fn client_steering() {
    let (network, outcome) =
        run("client-steering", sample_topology(), &[]).await;
    assert!(outcome.is_passed(), "{outcome}");

    let log = network.log(AGENT1);
    assert_eq!(
        log.iter().filter(|line| *line == "Got steer request").count(),
        2
    );
}

#[tokio::test]
async fn client_steering_missing_ack() {
    let (_, outcome) = run(
        "client-steering",
        sample_topology(),
        &[(AGENT1, Fault::MissingAck)],
    )
    .await;
    let violation = violation(outcome);
    assert_eq!(
        violation,
        InvariantViolation::OrderViolation {
            event: "ACK".to_owned(),
            occurrence: 1,
            after: Some("REQUEST".to_owned()),
        }
    );
    assert_eq!(
        violation.to_string(),
        "ACK (1st occurrence) not observed after REQUEST"
    );
}

#[tokio::test]
async fn client_steering_missing_station() {
    let mut topology = sample_topology();
    topology.stations.remove(STA1);
    let (_, outcome) = run("client-steering", topology, &[]).await;
    assert!(
        matches!(outcome, ScenarioOutcome::Skipped(ref reason) if reason.contains(STA1)),
        "{outcome}"
    );
}

#[tokio::test]
async fn client_steering_missing_bss() {
    let mut topology = sample_topology();
    if let Some(role) = topology.roles.get_mut(AGENT2) {
        role.radios.clear();
    }
    let (_, outcome) = run("client-steering", topology, &[]).await;
    assert!(
        matches!(outcome, ScenarioOutcome::Skipped(_)),
        "{outcome}"
    );
}

#[tokio::test]
async fn policy_config() {
    let (network, outcome) = run("policy-config", sample_topology(), &[]).await;
    assert!(outcome.is_passed(), "{outcome}");

    let log = network.log(CONTROLLER);
    assert!(log.iter().any(|line| line.starts_with("Received ACK_MESSAGE")));
}

#[tokio::test]
async fn policy_config_without_agent2() {
    // Only the controller and agent1 are needed.
    let mut topology = sample_topology();
    topology.roles.remove(AGENT2);
    let (_, outcome) = run("policy-config", topology, &[]).await;
    assert!(outcome.is_passed(), "{outcome}");
}

#[tokio::test]
async fn policy_config_malformed_frame() {
    let (_, outcome) = run(
        "policy-config",
        sample_topology(),
        &[(CONTROLLER, Fault::MalformedFrame)],
    )
    .await;
    assert!(
        matches!(outcome, ScenarioOutcome::Failed(Error::Decode(_))),
        "{outcome}"
    );
}
