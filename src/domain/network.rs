// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants
//!
//! Parsing of CIDR tokens into typed networks and the IEEE 802.1Q VLAN id.
//! Every string that crosses into the allocation engine goes through
//! [`parse_network`], so a malformed token always surfaces as
//! [`NetworkError::InvalidNetworkFormat`].

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid network format: {0}")]
    InvalidNetworkFormat(String),

    #[error("Invalid prefix length: /{prefix} (must be between /{min} and /{max})")]
    InvalidPrefixLength { prefix: u8, min: u8, max: u8 },

    #[error("Subnet index {index} does not fit in container {container} ({capacity} blocks)")]
    IndexOutOfContainer {
        index: usize,
        container: String,
        capacity: u128,
    },

    #[error("Invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(u16),
}

/// Parse a CIDR token into a network.
///
/// Accepts strict notation (`10.0.8.0/21`), lenient notation with host bits
/// set (`10.0.8.7/21`, truncated to `10.0.8.0/21`) and a bare address, which
/// is read as a host route (`/32` or `/128`).
///
/// # Examples
///
/// ```rust
/// use cim_ipam::domain::parse_network;
///
/// let net = parse_network("10.0.8.7/21").unwrap();
/// assert_eq!(net.to_string(), "10.0.8.0/21");
/// assert!(parse_network("10.0/16").is_err());
/// ```
pub fn parse_network(cidr: &str) -> Result<IpNet, NetworkError> {
    let token = cidr.trim();
    let invalid = || NetworkError::InvalidNetworkFormat(cidr.to_string());

    let net = if token.contains('/') {
        IpNet::from_str(token).map_err(|_| invalid())?
    } else {
        let addr = IpAddr::from_str(token).map_err(|_| invalid())?;
        let host_len = if addr.is_ipv4() { 32 } else { 128 };
        IpNet::new(addr, host_len).map_err(|_| invalid())?
    };

    Ok(net.trunc())
}

/// Validate a prefix length against the address family of `net` and a
/// lower bound (usually the parent's own length).
pub(crate) fn check_prefix_len(net: &IpNet, prefix: u8) -> Result<(), NetworkError> {
    let min = net.prefix_len();
    let max = net.max_prefix_len();
    if prefix < min || prefix > max {
        return Err(NetworkError::InvalidPrefixLength { prefix, min, max });
    }
    Ok(())
}

/// True when the two blocks share at least one address.
///
/// Aligned CIDR blocks either nest or are disjoint, so overlap reduces to
/// containment in one direction or the other.
pub fn overlaps(a: &IpNet, b: &IpNet) -> bool {
    a.contains(b) || b.contains(a)
}

/// VLAN ID value object
///
/// Represents a VLAN ID (IEEE 802.1Q) with validation.
/// Invariants:
/// - Valid VLAN ID range (1-4094)
/// - VLAN 0 and 4095 are reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(pub(super) u16);

impl VlanId {
    /// Minimum valid VLAN ID
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID
    pub const MAX: u16 = 4094;

    /// Create a new VLAN ID with validation
    pub fn new(id: u16) -> Result<Self, NetworkError> {
        if !(Self::MIN..=Self::MAX).contains(&id) {
            return Err(NetworkError::InvalidVlanId(id));
        }

        Ok(Self(id))
    }

    /// Get the VLAN ID value
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = NetworkError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VlanId> for u16 {
    fn from(vid: VlanId) -> Self {
        vid.0
    }
}
