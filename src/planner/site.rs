// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site-Level Planning
//!
//! Pairs an allocation plan with the canonical names a new site needs:
//! tenant, facility code, site description, and a naming preview of the
//! racks, VLANs and devices that will follow the same conventions.

use serde::{Deserialize, Serialize};

use super::{AllocationPlan, AllocationPlanner, PlanRequest};
use crate::domain::{NamingConvention, VlanCatalog, VlanCategory};
use crate::errors::AllocationResult;

/// Country code used for generated tenant names
const DEFAULT_COUNTRY: &str = "br";

/// Number of catalog VLANs shown in a naming preview
const PREVIEW_VLANS: usize = 4;

/// Number of rack names shown in a naming preview
const PREVIEW_RACKS: usize = 5;

/// Request to plan a complete site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    /// Human site name, e.g. `Site Nordeste`
    pub site_name: String,
    /// Region code, e.g. `ne`
    pub region_code: String,
    pub base_network: String,
    /// Generated as `{REGION}-DC-01` when absent
    #[serde(default)]
    pub facility_code: Option<String>,
    /// Generated as `br-{region}-1` when absent
    #[serde(default)]
    pub tenant_name: Option<String>,
    pub rack_count: usize,
}

/// Site record as it will be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub name: String,
    pub status: String,
    pub description: String,
}

/// Tenant record as it will be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub name: String,
    pub description: String,
}

/// Site, tenant and allocation plan for one new site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePlan {
    pub site: SiteRecord,
    pub tenant: TenantRecord,
    pub facility_code: String,
    pub allocation_plan: AllocationPlan,
}

impl AllocationPlanner {
    /// Plan a site: canonical names plus the full allocation plan
    pub fn plan_site(&self, request: &SiteRequest) -> AllocationResult<SitePlan> {
        let region = request.region_code.trim();

        let tenant_name = request
            .tenant_name
            .clone()
            .unwrap_or_else(|| NamingConvention::tenant_name(DEFAULT_COUNTRY, region, 1));
        let facility_code = request
            .facility_code
            .clone()
            .unwrap_or_else(|| NamingConvention::facility_code(region, 1));

        let allocation_plan =
            self.plan_request(&PlanRequest::new(&request.base_network, request.rack_count))?;

        Ok(SitePlan {
            site: SiteRecord {
                name: request.site_name.clone(),
                status: "planned".to_string(),
                description: format!("Data center {} - {}", request.site_name, facility_code),
            },
            tenant: TenantRecord {
                description: format!("Tenant for {}", request.site_name),
                name: tenant_name,
            },
            facility_code,
            allocation_plan,
        })
    }
}

/// A VLAN as it will be labelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanLabel {
    pub vid: u16,
    pub name: String,
    pub category: VlanCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePreview {
    pub spine: String,
    pub leaf: String,
}

/// Sample of the names a site will receive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingPreview {
    pub site_name: String,
    pub tenant_name: String,
    pub facility_code: String,
    pub vlans: Vec<VlanLabel>,
    pub racks: Vec<String>,
    pub devices: DevicePreview,
}

impl NamingPreview {
    /// Preview names for a site in `region_code` with `rack_count` racks.
    ///
    /// Shows the first four catalog VLANs and at most five racks.
    pub fn build(catalog: &VlanCatalog, site_name: &str, region_code: &str, rack_count: usize) -> Self {
        let region = region_code.trim().to_lowercase();
        let site_code = format!("{region}1");

        let vlans = catalog
            .definitions()
            .iter()
            .take(PREVIEW_VLANS)
            .map(|vlan| VlanLabel {
                vid: vlan.vid.value(),
                name: NamingConvention::vlan_name(vlan.vid.value(), &vlan.name),
                category: vlan.category,
            })
            .collect();

        let racks = (1..=rack_count.min(PREVIEW_RACKS))
            .map(|number| NamingConvention::rack_name(&site_code, "A", number as u32))
            .collect();

        Self {
            site_name: site_name.to_string(),
            tenant_name: NamingConvention::tenant_name(DEFAULT_COUNTRY, &region, 1),
            facility_code: NamingConvention::facility_code(&region, 1),
            vlans,
            racks,
            devices: DevicePreview {
                spine: NamingConvention::device_name("spine", &site_code, 1),
                leaf: NamingConvention::device_name("leaf", &site_code, 1),
            },
        }
    }
}
