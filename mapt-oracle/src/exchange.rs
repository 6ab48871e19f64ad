//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;

use crate::debug::Debug;
use crate::device::Device;
use crate::error::{Error, ProtocolError};
use crate::message::Envelope;

// Sends messages on behalf of the test and allocates their message ids.
//
// Ids are unique for the lifetime of the driver, which is owned by a single
// scenario.
#[derive(Debug)]
pub struct ExchangeDriver {
    next_msg_id: u16,
    in_flight: BTreeSet<u16>,
}

// ===== impl ExchangeDriver =====

impl ExchangeDriver {
    // Creates a driver whose ids start at a random value.
    pub fn new() -> ExchangeDriver {
        ExchangeDriver::with_first_id(rand::random())
    }

    pub fn with_first_id(msg_id: u16) -> ExchangeDriver {
        ExchangeDriver {
            next_msg_id: msg_id,
            in_flight: Default::default(),
        }
    }

    // Sends `envelope` from `source`, returning the assigned message id.
    //
    // Doesn't wait for any response.
    pub async fn send(
        &mut self,
        source: &dyn Device,
        envelope: Envelope,
    ) -> Result<u16, Error> {
        let msg_id = self.allocate_msg_id()?;
        let dst = envelope.destination;
        let cmdu = envelope.into_cmdu(msg_id);

        Debug::CmduTx(source.name(), &dst, &cmdu).log();
        source.send_cmdu(dst, &cmdu).await?;

        Ok(msg_id)
    }

    pub(crate) fn allocate_msg_id(&mut self) -> Result<u16, Error> {
        let msg_id = self.next_msg_id;
        if !self.in_flight.insert(msg_id) {
            return Err(ProtocolError::MessageIdCollision(msg_id).into());
        }
        self.next_msg_id = self.next_msg_id.wrapping_add(1);
        Ok(msg_id)
    }
}

impl Default for ExchangeDriver {
    fn default() -> ExchangeDriver {
        ExchangeDriver::new()
    }
}

// ===== unit tests =====
