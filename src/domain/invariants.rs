// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Allocation Invariants
//!
//! Business rules every allocation plan must satisfy. All functions are pure
//! (no side effects) and return the first violation found.
//!
//! # Plan Invariants
//!
//! 1. **Single container**: exactly one allocation is the container, and it
//!    has no parent
//! 2. **Resolvable parents**: every other allocation names a parent that is
//!    another allocation of the same plan (by prefix string)
//! 3. **Containment**: every allocation lies inside its parent
//! 4. **Non-overlap**: VLAN subnets are pairwise disjoint, and so are the host
//!    subnets of any one VLAN subnet
//! 5. **Totals**: `total_prefixes` counts every allocation
//! 6. **Catalog VIDs**: every VLAN tag names a catalog definition or at least
//!    falls in one of the catalog's category ranges

use std::collections::{BTreeMap, HashMap};

use ipnet::IpNet;

use super::network::{overlaps, parse_network, VlanId};
use super::vlan::VlanCatalog;
use crate::planner::{AllocationPlan, PrefixAllocation};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Rack count {requested} is outside 1..={max}")]
    RackCountOutOfRange { requested: usize, max: usize },

    #[error("Plan must contain exactly one container prefix, found {0}")]
    ContainerCount(usize),

    #[error("Container prefix {0} must not have a parent")]
    ContainerHasParent(String),

    #[error("Allocation {0} has no parent prefix")]
    MissingParent(String),

    #[error("Allocation {prefix} names parent {parent}, which is not in the plan")]
    DanglingParent { prefix: String, parent: String },

    #[error("Allocation {child} is not contained in {parent}")]
    NotContained { child: String, parent: String },

    #[error("Allocations {first} and {second} overlap")]
    Overlap { first: String, second: String },

    #[error("Allocation has an unparseable prefix: {0}")]
    InvalidPrefix(String),

    #[error("Plan reports {reported} prefixes but holds {actual}")]
    TotalsMismatch { reported: usize, actual: usize },

    #[error("Allocation {prefix} carries VLAN {vid}, which is outside every catalog category")]
    VidOutOfCategory { prefix: String, vid: VlanId },
}

/// Validate a requested rack count
///
/// # Rules
/// - At least one rack
/// - At most `max` racks (the policy ceiling)
pub fn validate_rack_count(requested: usize, max: usize) -> ValidationResult {
    if requested == 0 || requested > max {
        return Err(ValidationError::RackCountOutOfRange { requested, max });
    }
    Ok(())
}

/// Validate a complete plan against the plan invariants (see module docs)
pub fn validate_plan(plan: &AllocationPlan, catalog: &VlanCatalog) -> ValidationResult {
    let allocations = plan.allocations();

    if plan.total_prefixes != allocations.len() {
        return Err(ValidationError::TotalsMismatch {
            reported: plan.total_prefixes,
            actual: allocations.len(),
        });
    }

    let containers: Vec<&PrefixAllocation> =
        allocations.iter().filter(|a| a.is_container).collect();
    if containers.len() != 1 {
        return Err(ValidationError::ContainerCount(containers.len()));
    }
    if containers[0].parent_prefix.is_some() {
        return Err(ValidationError::ContainerHasParent(containers[0].prefix.clone()));
    }

    let mut networks: HashMap<&str, IpNet> = HashMap::with_capacity(allocations.len());
    for allocation in &allocations {
        let net = parse_network(&allocation.prefix)
            .map_err(|_| ValidationError::InvalidPrefix(allocation.prefix.clone()))?;
        networks.insert(allocation.prefix.as_str(), net);
    }

    for allocation in allocations.iter().filter(|a| !a.is_container) {
        validate_parent(allocation, &networks)?;
    }

    for allocation in &allocations {
        validate_vid(allocation, catalog)?;
    }

    validate_disjoint(&plan.vlan_subnets)?;

    let mut siblings: BTreeMap<&str, Vec<PrefixAllocation>> = BTreeMap::new();
    for host in &plan.host_subnets {
        if let Some(parent) = host.parent_prefix.as_deref() {
            siblings.entry(parent).or_default().push(host.clone());
        }
    }
    for hosts in siblings.values() {
        validate_disjoint(hosts)?;
    }

    Ok(())
}

/// Validate that an allocation's parent exists and contains it
fn validate_parent(
    allocation: &PrefixAllocation,
    networks: &HashMap<&str, IpNet>,
) -> ValidationResult {
    let parent = allocation
        .parent_prefix
        .as_deref()
        .ok_or_else(|| ValidationError::MissingParent(allocation.prefix.clone()))?;

    let parent_net = networks
        .get(parent)
        .ok_or_else(|| ValidationError::DanglingParent {
            prefix: allocation.prefix.clone(),
            parent: parent.to_string(),
        })?;

    let child_net = networks
        .get(allocation.prefix.as_str())
        .ok_or_else(|| ValidationError::InvalidPrefix(allocation.prefix.clone()))?;

    if !parent_net.contains(child_net) {
        return Err(ValidationError::NotContained {
            child: allocation.prefix.clone(),
            parent: parent.to_string(),
        });
    }
    Ok(())
}

/// Validate that an allocation's VLAN tag is known to the catalog
fn validate_vid(allocation: &PrefixAllocation, catalog: &VlanCatalog) -> ValidationResult {
    let Some(vid) = allocation.vlan_vid else {
        return Ok(());
    };
    let known = catalog.definition_by_vid(vid.value()).is_some()
        || catalog.category_of(vid.value()).is_some();
    if !known {
        return Err(ValidationError::VidOutOfCategory {
            prefix: allocation.prefix.clone(),
            vid,
        });
    }
    Ok(())
}

/// Validate that a set of allocations is pairwise disjoint
pub fn validate_disjoint(allocations: &[PrefixAllocation]) -> ValidationResult {
    let nets = allocations
        .iter()
        .map(|a| {
            parse_network(&a.prefix)
                .map(|net| (a.prefix.as_str(), net))
                .map_err(|_| ValidationError::InvalidPrefix(a.prefix.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (i, (first, a)) in nets.iter().enumerate() {
        for (second, b) in &nets[i + 1..] {
            if overlaps(a, b) {
                return Err(ValidationError::Overlap {
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }
    Ok(())
}
