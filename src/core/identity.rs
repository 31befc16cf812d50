//! Account Identities
//!
//! A 20-byte account identifier for callers, bettors and the authority.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use crate::core::hash::hash_with_domain;

/// Account identity (20 raw bytes).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct Identity(pub [u8; 20]);

impl Identity {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive a deterministic identity from a human label.
    ///
    /// Handy for demos and tests: `Identity::from_label("alice")` is
    /// always the same account.
    pub fn from_label(label: &str) -> Self {
        let hash = hash_with_domain(b"auto-football-identity:", label.as_bytes());

        let mut id = [0u8; 20];
        id.copy_from_slice(&hash[..20]);
        Self(id)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Short form for log lines (first 4 bytes).
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Errors parsing an identity from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityParseError {
    /// Not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Wrong number of bytes.
    #[error("expected 20 bytes, got {0}")]
    WrongLength(usize),
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed)
            .map_err(|e| IdentityParseError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(IdentityParseError::WrongLength(bytes.len()));
        }
        let mut id = [0u8; 20];
        id.copy_from_slice(&bytes);
        Ok(Self(id))
    }
}
