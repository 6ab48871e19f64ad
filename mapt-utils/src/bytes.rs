//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{Buf, BufMut, Bytes, BytesMut, TryGetError};

use crate::mac_addr::MacAddr;

// Extension methods for Bytes.
pub trait BytesExt {
    /// Gets a MAC address from `self`.
    ///
    /// The current position is advanced by 6.
    ///
    /// # Panics
    ///
    /// This function panics if there is not enough remaining data in `self`.
    fn get_mac(&mut self) -> MacAddr;

    /// Gets a MAC address from `self`.
    ///
    /// The current position is advanced by 6.
    ///
    /// Returns `Err(TryGetError)` when there are not enough remaining bytes to
    /// read the value.
    fn try_get_mac(&mut self) -> Result<MacAddr, TryGetError>;
}

// Extension methods for BytesMut.
pub trait BytesMutExt {
    /// Writes a MAC address to `self`.
    ///
    /// The current position is advanced by 6.
    ///
    /// # Panics
    ///
    /// This function panics if there is not enough remaining capacity in
    /// `self`.
    fn put_mac(&mut self, addr: &MacAddr);
}

// ===== impl Bytes =====

impl BytesExt for Bytes {
    fn get_mac(&mut self) -> MacAddr {
        let mut addr = [0; MacAddr::LENGTH];
        self.copy_to_slice(&mut addr);
        MacAddr::from(addr)
    }

    fn try_get_mac(&mut self) -> Result<MacAddr, TryGetError> {
        if self.remaining() < MacAddr::LENGTH {
            return Err(TryGetError {
                requested: MacAddr::LENGTH,
                available: self.remaining(),
            });
        }
        Ok(self.get_mac())
    }
}

// ===== impl BytesMut =====

impl BytesMutExt for BytesMut {
    fn put_mac(&mut self, addr: &MacAddr) {
        self.put_slice(&addr.as_bytes())
    }
}

// ===== unit tests =====
