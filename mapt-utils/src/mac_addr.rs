//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// 48-bit MAC address (IEEE EUI-48 format).
//
// Used both for 1905.1 AL identifiers and for interface/BSS identifiers.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MacAddr([u8; 6]);

/// Error type for MAC address parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMacAddrError;

// ===== impl MacAddr =====

impl MacAddr {
    pub const LENGTH: usize = 6;
    pub const ZERO: Self = Self([0x00; 6]);

    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }

    pub fn as_bytes(&self) -> [u8; 6] {
        self.0
    }

    // Returns whether this is the all-zero sentinel address.
    pub fn is_zero(&self) -> bool {
        *self == MacAddr::ZERO
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

impl std::fmt::Display for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        ))
    }
}

impl std::fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl FromStr for MacAddr {
    type Err = ParseMacAddrError;

    /// Parse a MAC address from a string.
    ///
    /// Accepts formats:
    /// - Colon-separated: "aa:bb:cc:dd:ee:ff"
    /// - Hyphen-separated: "aa-bb-cc-dd-ee-ff"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = if s.contains(':') {
            s.split(':').collect()
        } else if s.contains('-') {
            s.split('-').collect()
        } else {
            return Err(ParseMacAddrError);
        };

        if parts.len() != 6 {
            return Err(ParseMacAddrError);
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty()
                || part.len() > 2
                || !part.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(ParseMacAddrError);
            }
            bytes[i] =
                u8::from_str_radix(part, 16).map_err(|_| ParseMacAddrError)?;
        }

        Ok(MacAddr(bytes))
    }
}

impl Serialize for MacAddr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MacAddr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ===== impl ParseMacAddrError =====

impl std::fmt::Display for ParseMacAddrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid MAC address format")
    }
}

impl std::error::Error for ParseMacAddrError {}

// ===== unit tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let addr = MacAddr::from_str("02:00:00:00:01:0A").unwrap();
        assert_eq!(addr, MacAddr::new([0x02, 0, 0, 0, 0x01, 0x0a]));
        assert_eq!(addr.to_string(), "02:00:00:00:01:0a");
        assert_eq!(MacAddr::from_str("02-00-00-00-01-0a").unwrap(), addr);
    }

    #[test]
    fn parse_invalid() {
        assert!(MacAddr::from_str("02:00:00:00:01").is_err());
        assert!(MacAddr::from_str("020000000100").is_err());
        assert!(MacAddr::from_str("02:00:00:00:01:100").is_err());
        assert!(MacAddr::from_str("02:00:00:00:01:zz").is_err());
        assert!(MacAddr::from_str("+a:00:00:00:01:02").is_err());
        assert!(MacAddr::from_str("02:00:00:00:01:+2").is_err());
    }

    #[test]
    fn serde_as_string() {
        let addr = MacAddr::new([0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"aa:bb:cc:00:11:22\"");
        let back: MacAddr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn zero_sentinel() {
        assert!(MacAddr::ZERO.is_zero());
        assert!(MacAddr::default().is_zero());
        assert!(!MacAddr::new([0xff; 6]).is_zero());
    }
}
