use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol-level domain identifier of a chain.
///
/// Distinct from the EVM chain id: remote-router enrollments and
/// destination-gas entries are keyed by domain, while transaction submission
/// is keyed by chain id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct DomainId(pub u32);

impl DomainId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DomainId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
