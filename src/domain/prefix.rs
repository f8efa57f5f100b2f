// Copyright (c) 2025 - Cowboy AI, Inc.
//! Prefix Allocation Rules
//!
//! Pure address arithmetic for carving a site's address space:
//!
//! ```text
//! container  10.0.0.0/16                     (one per site)
//!   ├── 10.0.8.0/21   VLAN subnet, index 0   (one per catalog VLAN)
//!   │     ├── 10.0.8.0/26    rack 01         (one per rack)
//!   │     ├── 10.0.8.64/26   rack 02
//!   │     └── ...
//!   ├── 10.0.16.0/21  VLAN subnet, index 1
//!   └── ...
//! ```
//!
//! Subnets are derived from their index, never from a running cursor, so the
//! same inputs always produce the same blocks. Tracking which blocks are in
//! use across calls belongs to the caller; [`PrefixAllocator::next_available`]
//! takes that set as an explicit argument.

use ipnet::{IpNet, IpSubnets};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::invariants::validate_rack_count;
use super::network::{check_prefix_len, overlaps, parse_network, NetworkError};
use crate::errors::AllocationResult;

/// Block sizes used when carving a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Prefix length of the site container
    #[serde(default = "default_container_bits")]
    pub container_bits: u8,

    /// Prefix length of each per-VLAN purpose subnet
    #[serde(default = "default_subnet_bits")]
    pub subnet_bits: u8,

    /// Prefix length of each per-rack host subnet
    #[serde(default = "default_host_bits")]
    pub host_bits: u8,

    /// Largest rack count a plan request may ask for
    #[serde(default = "default_max_rack_count")]
    pub max_rack_count: usize,
}

fn default_container_bits() -> u8 {
    16
}

fn default_subnet_bits() -> u8 {
    21
}

fn default_host_bits() -> u8 {
    26
}

fn default_max_rack_count() -> usize {
    50
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            container_bits: default_container_bits(),
            subnet_bits: default_subnet_bits(),
            host_bits: default_host_bits(),
            max_rack_count: default_max_rack_count(),
        }
    }
}

impl AllocationPolicy {
    /// Check that the three block sizes nest (container < subnet < host <= /32)
    /// and that the rack ceiling admits at least one rack.
    pub fn validate(&self) -> AllocationResult<()> {
        if self.container_bits >= self.subnet_bits {
            return Err(NetworkError::InvalidPrefixLength {
                prefix: self.subnet_bits,
                min: self.container_bits.saturating_add(1),
                max: 32,
            }
            .into());
        }
        if self.subnet_bits >= self.host_bits || self.host_bits > 32 {
            return Err(NetworkError::InvalidPrefixLength {
                prefix: self.host_bits,
                min: self.subnet_bits.saturating_add(1),
                max: 32,
            }
            .into());
        }
        validate_rack_count(1, self.max_rack_count)?;
        Ok(())
    }
}

/// Number of `/child_bits` blocks inside `parent`, saturating at `u128::MAX`.
pub fn block_capacity(parent: &IpNet, child_bits: u8) -> u128 {
    match child_bits.checked_sub(parent.prefix_len()) {
        Some(diff) => 1u128.checked_shl(u32::from(diff)).unwrap_or(u128::MAX),
        None => 0,
    }
}

/// One rack's block inside a VLAN subnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostSubnet {
    /// 1-based rack position
    pub rack: usize,
    pub prefix: IpNet,
}

/// The first `len` host blocks of a VLAN subnet, in ascending address order.
///
/// The sequence is finite and restartable: every call to
/// [`HostSubnets::iter`] starts again from the first block. When more racks
/// were requested than the subnet can hold the sequence is truncated to
/// capacity; compare [`HostSubnets::requested`] with [`HostSubnets::len`] to
/// observe the clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSubnets {
    parent: IpNet,
    blocks: IpSubnets,
    requested: usize,
    len: usize,
    capacity: u128,
}

impl HostSubnets {
    /// The VLAN subnet being partitioned
    pub fn parent(&self) -> IpNet {
        self.parent
    }

    /// Rack count the caller asked for
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Number of blocks actually produced: `min(requested, capacity)`
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of host blocks the parent can hold
    pub fn capacity(&self) -> u128 {
        self.capacity
    }

    /// True when the request was truncated to capacity
    pub fn is_clamped(&self) -> bool {
        self.len < self.requested
    }

    pub fn iter(&self) -> impl Iterator<Item = HostSubnet> {
        self.blocks
            .take(self.len)
            .enumerate()
            .map(|(i, prefix)| HostSubnet { rack: i + 1, prefix })
    }
}

impl IntoIterator for &HostSubnets {
    type Item = HostSubnet;
    type IntoIter = Box<dyn Iterator<Item = HostSubnet>>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Pure prefix arithmetic parameterised by an [`AllocationPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefixAllocator {
    policy: AllocationPolicy,
}

impl PrefixAllocator {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Site container from a base network token.
    ///
    /// Textual composition: `"10.0"` becomes `"10.0.0.0/16"`. The base token
    /// names the leading two octets of an IPv4 allocation.
    pub fn container_prefix(&self, base_network: &str) -> Result<IpNet, NetworkError> {
        let base = base_network.trim();
        let composed = format!("{}.0.0/{}", base, self.policy.container_bits);
        parse_network(&composed)
            .map_err(|_| NetworkError::InvalidNetworkFormat(base_network.to_string()))
    }

    /// The `index`-th purpose subnet of a site.
    ///
    /// Subnet `index` is block `index + 1` of size `/subnet_bits` counted from
    /// the start of the container; block 0 stays unassigned. With the
    /// reference policy this places index 0 at `x.y.8.0/21`, index 1 at
    /// `x.y.16.0/21` and so on. Indices past the container's capacity are
    /// rejected rather than wrapped.
    pub fn subnet_for(&self, base_network: &str, index: usize) -> Result<IpNet, NetworkError> {
        let container = self.container_prefix(base_network)?;
        check_prefix_len(&container, self.policy.subnet_bits)?;

        let out_of_container = || NetworkError::IndexOutOfContainer {
            index,
            container: container.to_string(),
            capacity: block_capacity(&container, self.policy.subnet_bits),
        };

        let position = index.checked_add(1).ok_or_else(out_of_container)?;
        container
            .subnets(self.policy.subnet_bits)
            .map_err(|_| out_of_container())?
            .nth(position)
            .ok_or_else(out_of_container)
    }

    /// Partition a VLAN subnet into `/host_bits` rack blocks.
    ///
    /// Returns the first `min(count, capacity)` blocks. Asking for more racks
    /// than fit is not an error; the result is truncated and the clamp is
    /// logged.
    pub fn host_subnets(&self, vlan_subnet: &str, count: usize) -> Result<HostSubnets, NetworkError> {
        let parent = parse_network(vlan_subnet)?;
        self.host_subnets_in(parent, count)
    }

    /// Typed form of [`PrefixAllocator::host_subnets`]
    pub fn host_subnets_in(&self, parent: IpNet, count: usize) -> Result<HostSubnets, NetworkError> {
        let host_bits = self.policy.host_bits;
        check_prefix_len(&parent, host_bits)?;

        let blocks = parent
            .subnets(host_bits)
            .map_err(|_| NetworkError::InvalidPrefixLength {
                prefix: host_bits,
                min: parent.prefix_len(),
                max: parent.max_prefix_len(),
            })?;

        let capacity = block_capacity(&parent, host_bits);
        let len = usize::try_from(capacity).map_or(count, |cap| count.min(cap));
        if len < count {
            warn!(
                subnet = %parent,
                requested = count,
                capacity = len,
                "Rack count exceeds host subnet capacity, truncating"
            );
        }

        Ok(HostSubnets {
            parent,
            blocks,
            requested: count,
            len,
            capacity,
        })
    }

    /// True iff every address of `child` lies in `parent`.
    ///
    /// Malformed input yields `false`; validate first when a diagnostic is
    /// needed.
    pub fn is_contained(parent: &str, child: &str) -> bool {
        match (parse_network(parent), parse_network(child)) {
            (Ok(parent), Ok(child)) => parent.contains(&child),
            _ => false,
        }
    }

    /// First free `/desired_bits` block inside `parent`.
    ///
    /// A candidate is free when it is not in `used` and overlaps no member of
    /// `used` in either direction; `used` may mix block sizes. `Ok(None)`
    /// means the parent is exhausted.
    ///
    /// Callers sharing a used set must read it, call this, and record the
    /// result as one transaction; this function holds no state of its own.
    pub fn next_available<I, S>(
        parent: &str,
        desired_bits: u8,
        used: I,
    ) -> Result<Option<IpNet>, NetworkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parent = parse_network(parent)?;
        let used = used
            .into_iter()
            .map(|cidr| parse_network(cidr.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::next_available_in(parent, desired_bits, &used)
    }

    /// Typed form of [`PrefixAllocator::next_available`]
    pub fn next_available_in(
        parent: IpNet,
        desired_bits: u8,
        used: &[IpNet],
    ) -> Result<Option<IpNet>, NetworkError> {
        check_prefix_len(&parent, desired_bits)?;

        let candidates = parent
            .subnets(desired_bits)
            .map_err(|_| NetworkError::InvalidPrefixLength {
                prefix: desired_bits,
                min: parent.prefix_len(),
                max: parent.max_prefix_len(),
            })?;

        let found = candidates
            .into_iter()
            .find(|candidate| !used.iter().any(|u| u == candidate || overlaps(u, candidate)));

        if found.is_none() {
            debug!(parent = %parent, desired_bits, used = used.len(), "Parent prefix exhausted");
        }
        Ok(found)
    }
}
