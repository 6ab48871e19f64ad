//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;

use std::sync::Arc;

use clap::{App, Arg};
use config::{Config, LoggingFmtStyle};
use mapt_oracle::scenario::{
    Scenario, ScenarioOutcome, all_scenarios, find_scenario, run_scenario,
};
use mapt_oracle::sim::{sample_topology, sim_testbed};
use mapt_oracle::{PollPolicy, Topology};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

fn init_tracing(config: &config::Logging) {
    // Enable logging to stdout.
    let stdout = config.stdout.enabled.then(|| {
        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(config.stdout.show_thread_id)
            .with_file(config.stdout.show_source)
            .with_line_number(config.stdout.show_source)
            .with_ansi(config.stdout.colors);
        let layer = match config.stdout.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mapt=debug".to_owned()),
        );
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout)
        .init();
}

// Resolves the scenarios to run, in the given order.
fn select_scenarios(
    names: &[String],
) -> Result<Vec<Box<dyn Scenario>>, String> {
    if names.is_empty() {
        return Ok(all_scenarios());
    }
    names
        .iter()
        .map(|name| {
            find_scenario(name).ok_or_else(|| format!("unknown scenario: {name}"))
        })
        .collect()
}

async fn run(
    scenarios: &[Box<dyn Scenario>],
    topology: Topology,
    poll: PollPolicy,
) -> Vec<(&'static str, ScenarioOutcome)> {
    let topology = Arc::new(topology);
    let mut outcomes = vec![];
    for scenario in scenarios {
        // Every scenario starts from a pristine test bed.
        let (_network, testbed) = sim_testbed(&topology);
        let outcome =
            run_scenario(scenario.as_ref(), &testbed, topology.clone(), poll)
                .await;
        outcomes.push((scenario.name(), outcome));
    }
    outcomes
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let matches = App::new("Multi-AP conformance test runner")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .help("List the available scenarios and exit."),
        )
        .arg(
            Arg::with_name("scenarios")
                .value_name("scenario")
                .multiple(true)
                .help("Scenarios to run (overrides the configuration file)."),
        )
        .get_matches();

    if matches.is_present("list") {
        for scenario in all_scenarios() {
            println!("{:<20} {}", scenario.name(), scenario.description());
        }
        return;
    }

    // Read configuration file.
    let config_file = matches.value_of("config");
    let config = Config::load(config_file);

    // Select scenarios.
    let names = match matches.values_of("scenarios") {
        Some(values) => values.map(str::to_owned).collect(),
        None => config.scenarios.clone(),
    };
    let scenarios = match select_scenarios(&names) {
        Ok(scenarios) => scenarios,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    // Initialize tracing.
    init_tracing(&config.logging);

    let topology = if config.topology.roles.is_empty() {
        sample_topology()
    } else {
        config.topology
    };
    let poll = config.poll.policy();

    info!("starting up");
    let outcomes = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to create async runtime")
        .block_on(run(&scenarios, topology, poll));

    // Print summary.
    let mut failed = 0;
    for (name, outcome) in &outcomes {
        println!("{name:<20} {outcome}");
        if outcome.is_failed() {
            failed += 1;
        }
    }
    let passed = outcomes.iter().filter(|(_, o)| o.is_passed()).count();
    println!(
        "{} scenarios: {passed} passed, {} skipped, {failed} failed",
        outcomes.len(),
        outcomes.len() - passed - failed
    );

    info!("exiting");
    if failed > 0 {
        std::process::exit(1);
    }
}
