// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-ipam
//!
//! Deterministic catalogs, policies and plans shared by the integration tests.
//! Every fixture is a pure function, so two calls always return equal values.

#![allow(dead_code)]

use cim_ipam::domain::{AllocationPolicy, VlanCatalog, VlanCategory, VlanDefinition, VlanId, VlanRange};
use cim_ipam::planner::{AllocationPlan, AllocationPlanner};

pub const BASE_NETWORK: &str = "10.0";
pub const CONTAINER: &str = "10.0.0.0/16";
pub const FIRST_VLAN_SUBNET: &str = "10.0.8.0/21";

/// Planner over the reference catalog and policy
pub fn standard_planner() -> AllocationPlanner {
    AllocationPlanner::default()
}

/// Reference plan for `10.0` with the given rack count
pub fn standard_plan(rack_count: usize) -> AllocationPlan {
    standard_planner()
        .plan(BASE_NETWORK, rack_count)
        .expect("reference plan must build")
}

/// Two-VLAN catalog with a storage band, for substitution tests
pub fn storage_catalog() -> VlanCatalog {
    let vid = |id| VlanId::new(id).expect("fixture VID in range");
    VlanCatalog::new(
        vec![
            VlanDefinition::new(vid(110), "mgmt", "Management - Switch access", VlanCategory::Management),
            VlanDefinition::new(vid(260), "replication", "Replication - Storage sync", VlanCategory::Data),
        ],
        vec![
            VlanRange::new(VlanCategory::Management, 100, 149, "Management Fabric"),
            VlanRange::new(VlanCategory::Data, 250, 269, "Storage Networks"),
        ],
    )
    .expect("fixture catalog must be valid")
}

/// Policy with /24 rack blocks (eight per /21)
pub fn wide_rack_policy() -> AllocationPolicy {
    AllocationPolicy {
        host_bits: 24,
        ..AllocationPolicy::default()
    }
}
