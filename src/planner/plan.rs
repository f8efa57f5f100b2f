// Copyright (c) 2025 - Cowboy AI, Inc.
//! Allocation Plan Value Objects
//!
//! The output of [`AllocationPlanner`](super::AllocationPlanner). Plans are
//! immutable values owned by the caller; parent links are prefix strings that
//! resolve to another allocation of the same plan.

use serde::{Deserialize, Serialize};

use crate::domain::{VlanDefinition, VlanId};

fn is_false(value: &bool) -> bool {
    !*value
}

/// One block of address space in a plan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixAllocation {
    /// CIDR notation, e.g. `10.0.8.0/21`
    pub prefix: String,

    pub description: String,

    /// VLAN carried by a purpose subnet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_vid: Option<VlanId>,

    /// 1-based rack position of a host subnet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack: Option<usize>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_container: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_prefix: Option<String>,
}

impl PrefixAllocation {
    /// The site's top-level block
    pub fn container(prefix: impl Into<String>, base_network: &str) -> Self {
        Self {
            prefix: prefix.into(),
            description: format!("Container prefix for {base_network}"),
            vlan_vid: None,
            rack: None,
            is_container: true,
            parent_prefix: None,
        }
    }

    /// A purpose subnet carrying one VLAN
    pub fn vlan_subnet(prefix: impl Into<String>, vlan: &VlanDefinition, container: &str) -> Self {
        Self {
            prefix: prefix.into(),
            description: vlan.description.clone(),
            vlan_vid: Some(vlan.vid),
            rack: None,
            is_container: false,
            parent_prefix: Some(container.to_string()),
        }
    }

    /// A rack's host subnet inside a purpose subnet
    pub fn host_subnet(prefix: impl Into<String>, rack: usize, vlan_subnet: &str) -> Self {
        Self {
            prefix: prefix.into(),
            description: format!("Rack {rack:02} subnet"),
            vlan_vid: None,
            rack: Some(rack),
            is_container: false,
            parent_prefix: Some(vlan_subnet.to_string()),
        }
    }
}

/// Input to a planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Leading octets of the site's address space, e.g. `10.0`
    pub base_network: String,

    #[serde(default = "default_rack_count")]
    pub rack_count: usize,

    /// Include the catalog VLANs in `vlans_to_create`
    #[serde(default = "default_create_vlans")]
    pub create_vlans: bool,
}

fn default_rack_count() -> usize {
    20
}

fn default_create_vlans() -> bool {
    true
}

impl PlanRequest {
    pub fn new(base_network: impl Into<String>, rack_count: usize) -> Self {
        Self {
            base_network: base_network.into(),
            rack_count,
            create_vlans: true,
        }
    }

    pub fn without_vlans(mut self) -> Self {
        self.create_vlans = false;
        self
    }
}

/// Complete, ordered allocation for one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub base_network: String,
    pub container_prefix: String,
    /// One per catalog VLAN, in catalog order
    pub vlan_subnets: Vec<PrefixAllocation>,
    /// Grouped by VLAN subnet, ascending within each group
    pub host_subnets: Vec<PrefixAllocation>,
    pub vlans_to_create: Vec<VlanDefinition>,
    /// Rack count as requested, before any capacity clamp
    pub requested_racks: usize,
    pub total_prefixes: usize,
    pub total_vlans: usize,
}

impl AllocationPlan {
    /// The container as an allocation
    pub fn container(&self) -> PrefixAllocation {
        PrefixAllocation::container(self.container_prefix.clone(), &self.base_network)
    }

    /// Every allocation in creation order: container, VLAN subnets, hosts
    pub fn allocations(&self) -> Vec<PrefixAllocation> {
        std::iter::once(self.container())
            .chain(self.vlan_subnets.iter().cloned())
            .chain(self.host_subnets.iter().cloned())
            .collect()
    }

    /// Host subnets whose parent is `vlan_subnet`
    pub fn hosts_of<'a>(&'a self, vlan_subnet: &'a str) -> impl Iterator<Item = &'a PrefixAllocation> + 'a {
        self.host_subnets
            .iter()
            .filter(move |h| h.parent_prefix.as_deref() == Some(vlan_subnet))
    }

    /// VLAN subnets that received fewer host subnets than requested
    pub fn clamped_subnets(&self) -> Vec<&PrefixAllocation> {
        self.vlan_subnets
            .iter()
            .filter(|subnet| self.hosts_of(&subnet.prefix).count() < self.requested_racks)
            .collect()
    }
}
