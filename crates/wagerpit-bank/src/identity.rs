//! Participant identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of bytes in an identity.
pub const IDENTITY_BYTES: usize = 20;

/// A 20-byte participant address.
///
/// The all-zero identity is a sentinel meaning "no participant" and is
/// never a valid transfer destination.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(#[serde(with = "identity_serde")] [u8; IDENTITY_BYTES]);

impl Identity {
    /// The "no participant" sentinel.
    pub const ZERO: Identity = Identity([0u8; IDENTITY_BYTES]);

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; IDENTITY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Create a random identity (for tests and demos).
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; IDENTITY_BYTES] {
        &self.0
    }

    /// Is this the sentinel identity?
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

mod identity_serde {
    use super::IDENTITY_BYTES;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; IDENTITY_BYTES], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; IDENTITY_BYTES], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("identity must be 20 bytes"))
    }
}

impl FromStr for Identity {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; IDENTITY_BYTES] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", hex::encode(self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
