//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use derive_new::new;
use mapt_cmdu::Cmdu;
use mapt_utils::UnboundedReceiver;
use mapt_utils::mac_addr::MacAddr;

use crate::error::Error;

// Raw frame observed on the wire by a sniffer.
#[derive(Clone, Debug, Eq, PartialEq, new)]
pub struct CapturedFrame {
    pub src: MacAddr,
    pub dst: MacAddr,
    pub data: Bytes,
}

// Handle to a running protocol device (controller or agent).
#[async_trait]
pub trait Device: Send + Sync {
    fn name(&self) -> &str;

    fn al_mac(&self) -> MacAddr;

    // Emits a CMDU from this device towards `dst`.
    async fn send_cmdu(&self, dst: MacAddr, cmdu: &Cmdu) -> Result<(), Error>;

    // Returns the device log collected so far.
    async fn read_log(&self) -> Result<String, Error>;
}

// Maps a role to a runtime device handle.
#[async_trait]
pub trait DeviceLookup: Send + Sync {
    async fn lookup(
        &self,
        name: &str,
        target: &str,
        image: &str,
    ) -> Result<Arc<dyn Device>, Error>;
}

// Packet sniffer attached to the test bed backhaul.
#[async_trait]
pub trait Sniffer: Send + Sync {
    // Starts a capture session, returning the stream of captured frames.
    async fn start(
        &self,
        label: &str,
    ) -> Result<UnboundedReceiver<CapturedFrame>, Error>;
}

// Control over the test stations.
#[async_trait]
pub trait StationControl: Send + Sync {
    // Associates station `sta` to the BSS `bssid`.
    async fn associate(&self, sta: MacAddr, bssid: MacAddr) -> Result<(), Error>;
}
