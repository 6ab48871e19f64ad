//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use mapt_utils::mac_addr::MacAddr;
use serde::{Deserialize, Serialize};

use crate::error::Error;

// Test bed topology: the participants of a run, by logical name.
//
// Resolved once before a scenario starts and shared read-only with it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Topology {
    pub roles: BTreeMap<String, Role>,
    pub stations: BTreeMap<String, Station>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub kind: RoleKind,
    pub al_mac: MacAddr,
    // Provisioning hints passed to the device lookup.
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub radios: Vec<Radio>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleKind {
    Controller,
    Agent,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Radio {
    pub ruid: MacAddr,
    #[serde(default)]
    pub bsses: Vec<MacAddr>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Station {
    pub mac: MacAddr,
}

// ===== impl Topology =====

impl Topology {
    pub fn role(&self, name: &str) -> Result<&Role, Error> {
        self.roles
            .get(name)
            .ok_or_else(|| Error::MissingRole(name.to_owned()))
    }

    pub fn station(&self, name: &str) -> Result<&Station, Error> {
        self.stations
            .get(name)
            .ok_or_else(|| Error::MissingRole(name.to_owned()))
    }
}

// ===== impl Role =====

impl Role {
    // Returns the first BSS of the first radio, if any.
    pub fn first_bss(&self) -> Option<MacAddr> {
        self.radios
            .first()
            .and_then(|radio| radio.bsses.first())
            .copied()
    }
}

// ===== impl RoleKind =====

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleKind::Controller => write!(f, "controller"),
            RoleKind::Agent => write!(f, "agent"),
        }
    }
}
