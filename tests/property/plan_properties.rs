// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property tests for allocation plans
//!
//! Verifies that every plan the default planner produces:
//! - Passes structural validation (links resolve, children contained)
//! - Keeps purpose subnets and sibling host subnets disjoint
//! - Clamps host subnets to the capacity of their parent
//! - Is a pure function of its inputs

use cim_ipam::domain::PrefixAllocator;
use cim_ipam::planner::AllocationPlanner;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Two-octet IPv4 base network, e.g. `10.0`
fn base_network_strategy() -> impl Strategy<Value = String> {
    (1u8..=223, any::<u8>()).prop_map(|(a, b)| format!("{a}.{b}"))
}

/// Rack counts the default policy accepts
fn rack_count_strategy() -> impl Strategy<Value = usize> {
    1usize..=50
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Every generated plan is structurally valid
    #[test]
    fn prop_plan_is_valid(base in base_network_strategy(), racks in rack_count_strategy()) {
        let planner = AllocationPlanner::default();
        let plan = planner.plan(&base, racks).unwrap();
        prop_assert_eq!(planner.validate(&plan), Ok(()), "plan for {} is invalid", base);
    }

    /// Property: Every non-container prefix lies inside its parent
    #[test]
    fn prop_children_contained(base in base_network_strategy(), racks in rack_count_strategy()) {
        let plan = AllocationPlanner::default().plan(&base, racks).unwrap();

        for allocation in plan.vlan_subnets.iter().chain(&plan.host_subnets) {
            let parent = allocation.parent_prefix.as_deref().unwrap();
            prop_assert!(
                PrefixAllocator::is_contained(parent, &allocation.prefix),
                "{} escapes {}", allocation.prefix, parent
            );
        }
    }

    /// Property: Host subnets per purpose subnet = min(requested, 32)
    #[test]
    fn prop_host_count_clamped(base in base_network_strategy(), racks in rack_count_strategy()) {
        let plan = AllocationPlanner::default().plan(&base, racks).unwrap();
        let expected = racks.min(32);

        for subnet in &plan.vlan_subnets {
            prop_assert_eq!(
                plan.hosts_of(&subnet.prefix).count(),
                expected,
                "wrong rack count under {}", subnet.prefix
            );
        }
        prop_assert_eq!(plan.total_prefixes, 1 + 11 + 11 * expected);
        prop_assert_eq!(plan.clamped_subnets().is_empty(), racks <= 32);
    }

    /// Property: Planning twice yields identical plans
    #[test]
    fn prop_plan_deterministic(base in base_network_strategy(), racks in rack_count_strategy()) {
        let planner = AllocationPlanner::default();
        let first = planner.plan(&base, racks).unwrap();
        let second = planner.plan(&base, racks).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: Rack counts outside 1..=50 are rejected
    #[test]
    fn prop_rack_count_bounds(base in base_network_strategy(), racks in 51usize..1000) {
        let planner = AllocationPlanner::default();
        prop_assert!(planner.plan(&base, racks).is_err());
        prop_assert!(planner.plan(&base, 0).is_err());
    }
}
