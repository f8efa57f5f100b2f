// Copyright (c) 2025 - Cowboy AI, Inc.
//! Allocation Planner
//!
//! Composition root of the allocation engine. Combines a [`VlanCatalog`] and
//! a [`PrefixAllocator`] into a complete, ordered plan for one site.
//!
//! # Pipeline
//!
//! ```text
//! base network ──> container prefix
//!                     │
//!   catalog order ──> VLAN subnet[i] = subnet_for(base, i)   (parent: container)
//!                     │
//!   rack count ────> host subnets of each VLAN subnet         (parent: VLAN subnet)
//!                     │
//!                     └──> totals
//! ```
//!
//! The planner holds only configuration. Planning is a single pass with no
//! hidden state, so identical inputs always yield identical plans and a plan
//! can be previewed and later executed unchanged.

mod plan;
mod site;

pub use plan::{AllocationPlan, PlanRequest, PrefixAllocation};
pub use site::{DevicePreview, NamingPreview, SitePlan, SiteRequest, SiteRecord, TenantRecord, VlanLabel};

use tracing::{debug, info};

use crate::domain::invariants::{validate_plan, validate_rack_count, ValidationResult};
use crate::domain::{AllocationPolicy, PrefixAllocator, VlanCatalog};
use crate::errors::AllocationResult;

/// Plans address space and VLANs for a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlanner {
    catalog: VlanCatalog,
    allocator: PrefixAllocator,
}

impl Default for AllocationPlanner {
    fn default() -> Self {
        Self {
            catalog: VlanCatalog::standard(),
            allocator: PrefixAllocator::default(),
        }
    }
}

impl AllocationPlanner {
    /// Create a planner from an explicit catalog and policy
    pub fn new(catalog: VlanCatalog, policy: AllocationPolicy) -> AllocationResult<Self> {
        policy.validate()?;
        Ok(Self {
            catalog,
            allocator: PrefixAllocator::new(policy),
        })
    }

    pub fn catalog(&self) -> &VlanCatalog {
        &self.catalog
    }

    pub fn allocator(&self) -> &PrefixAllocator {
        &self.allocator
    }

    /// Check `plan` against the plan invariants and this planner's catalog
    pub fn validate(&self, plan: &AllocationPlan) -> ValidationResult {
        validate_plan(plan, &self.catalog)
    }

    pub fn policy(&self) -> &AllocationPolicy {
        self.allocator.policy()
    }

    /// Plan a site from a base network and rack count
    pub fn plan(&self, base_network: &str, rack_count: usize) -> AllocationResult<AllocationPlan> {
        self.plan_request(&PlanRequest::new(base_network, rack_count))
    }

    /// Plan a site from a full request
    pub fn plan_request(&self, request: &PlanRequest) -> AllocationResult<AllocationPlan> {
        validate_rack_count(request.rack_count, self.policy().max_rack_count)?;

        let base = request.base_network.trim();
        debug!(base_network = base, rack_count = request.rack_count, "Planning site allocation");

        let container = self.allocator.container_prefix(base)?.to_string();

        let mut vlan_subnets = Vec::with_capacity(self.catalog.len());
        for (index, vlan) in self.catalog.definitions().iter().enumerate() {
            let subnet = self.allocator.subnet_for(base, index)?;
            vlan_subnets.push(PrefixAllocation::vlan_subnet(subnet.to_string(), vlan, &container));
        }

        let mut host_subnets = Vec::new();
        for vlan_subnet in &vlan_subnets {
            let hosts = self.allocator.host_subnets(&vlan_subnet.prefix, request.rack_count)?;
            host_subnets.extend(hosts.iter().map(|host| {
                PrefixAllocation::host_subnet(host.prefix.to_string(), host.rack, &vlan_subnet.prefix)
            }));
        }

        let vlans_to_create = if request.create_vlans {
            self.catalog.definitions().to_vec()
        } else {
            Vec::new()
        };

        let plan = AllocationPlan {
            base_network: base.to_string(),
            total_prefixes: 1 + vlan_subnets.len() + host_subnets.len(),
            total_vlans: vlans_to_create.len(),
            container_prefix: container,
            vlan_subnets,
            host_subnets,
            vlans_to_create,
            requested_racks: request.rack_count,
        };

        info!(
            base_network = %plan.base_network,
            container = %plan.container_prefix,
            total_prefixes = plan.total_prefixes,
            total_vlans = plan.total_vlans,
            "Allocation plan ready"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{VlanCategory, VlanDefinition, VlanId, VlanRange};
    use crate::errors::AllocationError;

    #[test]
    fn test_plan_layout() {
        let plan = AllocationPlanner::default().plan("10.0", 5).unwrap();
        assert_eq!(plan.container_prefix, "10.0.0.0/16");
        assert_eq!(plan.vlan_subnets.len(), 11);
        assert_eq!(plan.host_subnets.len(), 55);
        assert_eq!(plan.total_prefixes, 1 + 11 + 55);
        assert_eq!(plan.total_vlans, 11);

        let first = &plan.vlan_subnets[0];
        assert_eq!(first.prefix, "10.0.8.0/21");
        assert_eq!(first.vlan_vid.map(|v| v.value()), Some(100));
        assert_eq!(first.parent_prefix.as_deref(), Some("10.0.0.0/16"));

        let last = &plan.vlan_subnets[10];
        assert_eq!(last.prefix, "10.0.88.0/21");
        assert_eq!(last.vlan_vid.map(|v| v.value()), Some(256));

        let rack_one = &plan.host_subnets[0];
        assert_eq!(rack_one.prefix, "10.0.8.0/26");
        assert_eq!(rack_one.parent_prefix.as_deref(), Some("10.0.8.0/21"));
        assert_eq!(rack_one.description, "Rack 01 subnet");
    }

    #[test]
    fn test_plan_without_vlans() {
        let planner = AllocationPlanner::default();
        let plan = planner.plan_request(&PlanRequest::new("10.0", 1).without_vlans()).unwrap();
        assert!(plan.vlans_to_create.is_empty());
        assert_eq!(plan.total_vlans, 0);
        assert_eq!(plan.vlan_subnets.len(), 11);
    }

    #[test]
    fn test_plan_rejects_bad_inputs() {
        let planner = AllocationPlanner::default();
        assert!(matches!(planner.plan("10.0", 0), Err(AllocationError::Validation(_))));
        assert!(matches!(planner.plan("10.0", 51), Err(AllocationError::Validation(_))));
        assert!(matches!(planner.plan("banana", 5), Err(AllocationError::Network(_))));
    }

    #[test]
    fn test_plan_with_custom_catalog() {
        let catalog = VlanCatalog::new(
            vec![VlanDefinition::new(
                VlanId::new(260).unwrap(),
                "storage",
                "Storage - Replication",
                VlanCategory::Data,
            )],
            vec![VlanRange::new(VlanCategory::Data, 250, 299, "Data Networks")],
        )
        .unwrap();
        let policy = AllocationPolicy {
            host_bits: 24,
            ..AllocationPolicy::default()
        };
        let planner = AllocationPlanner::new(catalog, policy).unwrap();
        let plan = planner.plan("172.16", 10).unwrap();

        assert_eq!(plan.vlan_subnets.len(), 1);
        assert_eq!(plan.vlan_subnets[0].prefix, "172.16.8.0/21");
        // A /21 holds eight /24 racks
        assert_eq!(plan.host_subnets.len(), 8);
        assert_eq!(plan.clamped_subnets().len(), 1);
    }

    #[test]
    fn test_planner_rejects_invalid_policy() {
        let policy = AllocationPolicy {
            container_bits: 24,
            ..AllocationPolicy::default()
        };
        assert!(AllocationPlanner::new(VlanCatalog::standard(), policy).is_err());
    }
}
