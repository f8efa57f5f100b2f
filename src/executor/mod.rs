// Copyright (c) 2025 - Cowboy AI, Inc.
//! Plan Executor
//!
//! Turns an [`AllocationPlan`] into create operations against an inventory
//! system (the system of record for sites, VLANs and prefixes).
//!
//! # Creation Order
//!
//! ```text
//! tenant           (site plans only)
//!     ↓
//! site             (linked to the tenant)
//!     ↓
//! container prefix
//!     ↓
//! VLANs            (vid → created VLAN id)
//!     ↓
//! VLAN subnets     (linked to their VLAN and to the container)
//!     ↓
//! host subnets     (linked to their VLAN subnet)
//! ```
//!
//! Plan-local parent references are prefix strings; the executor maps each
//! to the identifier the store returned when that prefix was created.
//!
//! # Failure Semantics
//!
//! The plan is validated before the first create. After that the executor
//! stops at the first store error and does not roll back. Serialising
//! concurrent allocations against one container is the store's job.

mod memory;

pub use memory::{InMemoryInventory, StoredSite};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::domain::invariants::validate_plan;
use crate::domain::{NamingConvention, ValidationError, VlanCatalog, VlanId};
use crate::errors::AllocationResult;
use crate::planner::{AllocationPlan, PrefixAllocation, SitePlan, SiteRecord, TenantRecord};

/// Identifier assigned by the inventory store
pub type ObjectId = u64;

/// Lifecycle status of a created prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStatus {
    Container,
    Active,
}

/// Prefix create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRecord {
    pub prefix: String,
    pub status: PrefixStatus,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<ObjectId>,
    /// Store id of the enclosing prefix; not sent to stores that nest by address
    #[serde(skip)]
    pub parent: Option<ObjectId>,
}

/// VLAN create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRecord {
    pub vid: VlanId,
    pub name: String,
    pub status: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<ObjectId>,
}

/// Inventory system the executor writes to
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Create a prefix, returning its store id
    async fn create_prefix(&mut self, record: &PrefixRecord) -> AllocationResult<ObjectId>;

    /// Create a VLAN, returning its store id
    async fn create_vlan(&mut self, record: &VlanRecord) -> AllocationResult<ObjectId>;

    /// Create a tenant, returning its store id
    async fn create_tenant(&mut self, tenant: &TenantRecord) -> AllocationResult<ObjectId>;

    /// Create a site owned by `tenant`, returning its store id
    async fn create_site(
        &mut self,
        site: &SiteRecord,
        tenant: Option<ObjectId>,
    ) -> AllocationResult<ObjectId>;

    /// Get the name of this store
    fn name(&self) -> &str;
}

/// Ownership applied to every created object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub site_id: Option<ObjectId>,
    pub tenant_id: Option<ObjectId>,
}

/// Identifiers of everything an execution created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub container_id: ObjectId,
    /// VID → VLAN id
    pub vlan_ids: BTreeMap<u16, ObjectId>,
    /// Prefix → prefix id, container included
    pub prefix_ids: BTreeMap<String, ObjectId>,
}

impl ExecutionReport {
    pub fn created_prefixes(&self) -> usize {
        self.prefix_ids.len()
    }

    pub fn created_vlans(&self) -> usize {
        self.vlan_ids.len()
    }
}

/// Identifiers of everything a site execution created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteExecutionReport {
    pub tenant_id: ObjectId,
    pub site_id: ObjectId,
    pub allocation: ExecutionReport,
}

/// Applies plans to an [`InventoryStore`]
///
/// Plans are checked against the executor's catalog before anything is
/// written.
pub struct PlanExecutor<S> {
    store: S,
    catalog: VlanCatalog,
}

impl<S: InventoryStore> PlanExecutor<S> {
    /// Executor for plans built from the standard catalog
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, VlanCatalog::standard())
    }

    pub fn with_catalog(store: S, catalog: VlanCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Create every VLAN and prefix of `plan`
    pub async fn execute(
        &mut self,
        plan: &AllocationPlan,
        context: ExecutionContext,
    ) -> AllocationResult<ExecutionReport> {
        validate_plan(plan, &self.catalog)?;

        info!(
            store = self.store.name(),
            container = %plan.container_prefix,
            prefixes = plan.total_prefixes,
            vlans = plan.total_vlans,
            "Executing allocation plan"
        );

        let mut report = ExecutionReport::default();

        let container = plan.container();
        report.container_id = self
            .create_prefix(&container, PrefixStatus::Container, None, None, &context)
            .await?;
        report
            .prefix_ids
            .insert(container.prefix.clone(), report.container_id);

        for vlan in &plan.vlans_to_create {
            let record = VlanRecord {
                vid: vlan.vid,
                name: NamingConvention::vlan_name(vlan.vid.value(), &vlan.name),
                status: "active".to_string(),
                description: vlan.description.clone(),
                site: context.site_id,
                tenant: context.tenant_id,
            };
            let id = self.store.create_vlan(&record).await?;
            debug!(vid = %vlan.vid, id, "Created VLAN");
            report.vlan_ids.insert(vlan.vid.value(), id);
        }

        for allocation in plan.vlan_subnets.iter().chain(&plan.host_subnets) {
            let parent = Self::resolve_parent(allocation, &report)?;
            let vlan = allocation
                .vlan_vid
                .and_then(|vid| report.vlan_ids.get(&vid.value()).copied());
            let id = self
                .create_prefix(allocation, PrefixStatus::Active, vlan, Some(parent), &context)
                .await?;
            report.prefix_ids.insert(allocation.prefix.clone(), id);
        }

        info!(
            store = self.store.name(),
            prefixes = report.created_prefixes(),
            vlans = report.created_vlans(),
            "Allocation plan executed"
        );
        Ok(report)
    }

    /// Create the tenant, then the site, then every VLAN and prefix of the
    /// site's allocation plan under both
    pub async fn execute_site(&mut self, site_plan: &SitePlan) -> AllocationResult<SiteExecutionReport> {
        validate_plan(&site_plan.allocation_plan, &self.catalog)?;

        let tenant_id = self.store.create_tenant(&site_plan.tenant).await?;
        debug!(tenant = %site_plan.tenant.name, id = tenant_id, "Created tenant");

        let site_id = self.store.create_site(&site_plan.site, Some(tenant_id)).await?;
        info!(site = %site_plan.site.name, id = site_id, tenant_id, "Created site");

        let context = ExecutionContext {
            site_id: Some(site_id),
            tenant_id: Some(tenant_id),
        };
        let allocation = self.execute(&site_plan.allocation_plan, context).await?;

        Ok(SiteExecutionReport {
            tenant_id,
            site_id,
            allocation,
        })
    }

    fn resolve_parent(
        allocation: &PrefixAllocation,
        report: &ExecutionReport,
    ) -> AllocationResult<ObjectId> {
        let parent = allocation
            .parent_prefix
            .as_deref()
            .ok_or_else(|| ValidationError::MissingParent(allocation.prefix.clone()))?;
        let id = report
            .prefix_ids
            .get(parent)
            .copied()
            .ok_or_else(|| ValidationError::DanglingParent {
                prefix: allocation.prefix.clone(),
                parent: parent.to_string(),
            })?;
        Ok(id)
    }

    async fn create_prefix(
        &mut self,
        allocation: &PrefixAllocation,
        status: PrefixStatus,
        vlan: Option<ObjectId>,
        parent: Option<ObjectId>,
        context: &ExecutionContext,
    ) -> AllocationResult<ObjectId> {
        let record = PrefixRecord {
            prefix: allocation.prefix.clone(),
            status,
            description: allocation.description.clone(),
            site: context.site_id,
            tenant: context.tenant_id,
            vlan,
            parent,
        };
        let id = self.store.create_prefix(&record).await?;
        debug!(prefix = %record.prefix, id, "Created prefix");
        Ok(id)
    }
}
