// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory inventory store
//!
//! Holds created objects in ordered maps and rejects duplicate prefixes,
//! VIDs, tenant names and site names the way a real inventory does. Used for
//! previews and tests.

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::{InventoryStore, ObjectId, PrefixRecord, VlanRecord};
use crate::errors::{AllocationError, AllocationResult};
use crate::planner::{SiteRecord, TenantRecord};

/// A created site and the tenant it was linked to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSite {
    pub record: SiteRecord,
    pub tenant: Option<ObjectId>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    next_id: ObjectId,
    prefixes: BTreeMap<String, (ObjectId, PrefixRecord)>,
    vlans: BTreeMap<u16, (ObjectId, VlanRecord)>,
    tenants: BTreeMap<String, (ObjectId, TenantRecord)>,
    sites: BTreeMap<String, (ObjectId, StoredSite)>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(&self, prefix: &str) -> Option<&PrefixRecord> {
        self.prefixes.get(prefix).map(|(_, record)| record)
    }

    pub fn vlan(&self, vid: u16) -> Option<&VlanRecord> {
        self.vlans.get(&vid).map(|(_, record)| record)
    }

    pub fn tenant(&self, name: &str) -> Option<(ObjectId, &TenantRecord)> {
        self.tenants.get(name).map(|(id, record)| (*id, record))
    }

    pub fn site(&self, name: &str) -> Option<(ObjectId, &StoredSite)> {
        self.sites.get(name).map(|(id, site)| (*id, site))
    }

    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }

    pub fn vlan_count(&self) -> usize {
        self.vlans.len()
    }

    fn allocate_id(&mut self) -> ObjectId {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventory {
    async fn create_prefix(&mut self, record: &PrefixRecord) -> AllocationResult<ObjectId> {
        if self.prefixes.contains_key(&record.prefix) {
            return Err(AllocationError::Inventory(format!(
                "prefix {} already exists",
                record.prefix
            )));
        }
        let id = self.allocate_id();
        self.prefixes
            .insert(record.prefix.clone(), (id, record.clone()));
        Ok(id)
    }

    async fn create_vlan(&mut self, record: &VlanRecord) -> AllocationResult<ObjectId> {
        let vid = record.vid.value();
        if self.vlans.contains_key(&vid) {
            return Err(AllocationError::Inventory(format!("VLAN {vid} already exists")));
        }
        let id = self.allocate_id();
        self.vlans.insert(vid, (id, record.clone()));
        Ok(id)
    }

    async fn create_tenant(&mut self, tenant: &TenantRecord) -> AllocationResult<ObjectId> {
        if self.tenants.contains_key(&tenant.name) {
            return Err(AllocationError::Inventory(format!(
                "tenant {} already exists",
                tenant.name
            )));
        }
        let id = self.allocate_id();
        self.tenants.insert(tenant.name.clone(), (id, tenant.clone()));
        Ok(id)
    }

    async fn create_site(
        &mut self,
        site: &SiteRecord,
        tenant: Option<ObjectId>,
    ) -> AllocationResult<ObjectId> {
        if self.sites.contains_key(&site.name) {
            return Err(AllocationError::Inventory(format!("site {} already exists", site.name)));
        }
        if let Some(tenant) = tenant {
            if !self.tenants.values().any(|(id, _)| *id == tenant) {
                return Err(AllocationError::Inventory(format!("tenant {tenant} does not exist")));
            }
        }
        let id = self.allocate_id();
        let stored = StoredSite {
            record: site.clone(),
            tenant,
        };
        self.sites.insert(site.name.clone(), (id, stored));
        Ok(id)
    }

    fn name(&self) -> &str {
        "in-memory-inventory"
    }
}
