// Copyright (c) 2025 - Cowboy AI, Inc.
//! Allocation Domain Models
//!
//! Core rules for planning a data-center site: the VLAN catalog, prefix
//! arithmetic, and the naming conventions that label the result.
//!
//! # Value Objects with Invariants
//!
//! - [`VlanId`] - IEEE 802.1Q VLAN ID (1-4094)
//! - [`VlanDefinition`] / [`VlanRange`] - Predefined VLANs and category bands
//! - [`AllocationPolicy`] - Container, subnet and host block sizes
//! - [`TenantName`] / [`FacilityCode`] - Parsed canonical names
//!
//! # Rules
//!
//! - [`VlanCatalog`] - Category lookup and next free VID
//! - [`PrefixAllocator`] - Container, purpose and host subnets; containment;
//!   next free block
//! - [`NamingConvention`] - Canonical name generation and parsing
//! - [`invariants`] - Plan-level validation

pub mod invariants;
pub mod naming;
pub mod network;
pub mod prefix;
pub mod vlan;

pub use invariants::{ValidationError, ValidationResult};
pub use naming::{FacilityCode, NamingConvention, RegionCode, TenantName};
pub use network::{overlaps, parse_network, NetworkError, VlanId};
pub use prefix::{block_capacity, AllocationPolicy, HostSubnet, HostSubnets, PrefixAllocator};
pub use vlan::{CatalogError, VlanCatalog, VlanCategory, VlanDefinition, VlanRange};
