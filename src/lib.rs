//! IP address and VLAN allocation planning for data-center sites
//!
//! This crate plans the address space and VLAN identifiers of a new site
//! before anything is provisioned: a container prefix, one purpose subnet per
//! catalog VLAN, one host subnet per rack, and the canonical names that label
//! them. Planning is pure and deterministic; executing a plan against an
//! inventory system is a separate, explicit step.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod executor;
pub mod planner;

// Re-export commonly used types
pub use domain::{
    AllocationPolicy, NamingConvention, NetworkError, PrefixAllocator, VlanCatalog, VlanCategory,
    VlanDefinition, VlanId, VlanRange,
};
pub use errors::{AllocationError, AllocationResult};
pub use executor::{
    ExecutionContext, ExecutionReport, InMemoryInventory, InventoryStore, PlanExecutor,
    SiteExecutionReport,
};
pub use planner::{AllocationPlan, AllocationPlanner, PlanRequest, PrefixAllocation};
