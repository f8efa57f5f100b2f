// Copyright (c) 2025 - Cowboy AI, Inc.

//! NetBox IPAM Inventory Adapter
//!
//! Implements [`InventoryStore`] against NetBox (Network Source of Truth), so a
//! [`PlanExecutor`](crate::executor::PlanExecutor) can write an allocation plan
//! straight into IPAM.
//!
//! # Mapping
//!
//! ```text
//! create_tenant(TenantRecord) = POST /api/tenancy/tenants/
//! create_site(SiteRecord)     = POST /api/dcim/sites/
//! create_vlan(VlanRecord)     = POST /api/ipam/vlans/
//! create_prefix(PrefixRecord) = POST /api/ipam/prefixes/
//! ```
//!
//! NetBox nests prefixes by address, so the executor's parent ids are not
//! sent; VLAN links travel in the `vlan` field. Tenants and sites need a
//! slug, derived here from the name with ASCII folding only.
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_ipam::adapters::{NetBoxConfig, NetBoxInventory};
//! use cim_ipam::executor::{ExecutionContext, PlanExecutor};
//! use cim_ipam::planner::AllocationPlanner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NetBoxConfig {
//!         base_url: "http://netbox.local".to_string(),
//!         api_token: "your-token-here".to_string(),
//!         timeout_secs: 30,
//!     };
//!
//!     let inventory = NetBoxInventory::new(config)?;
//!     inventory.health_check().await?;
//!
//!     let plan = AllocationPlanner::default().plan("10.0", 20)?;
//!     let report = PlanExecutor::new(inventory)
//!         .execute(&plan, ExecutionContext::default())
//!         .await?;
//!     println!("created {} prefixes", report.created_prefixes());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{AllocationError, AllocationResult};
use crate::executor::{InventoryStore, ObjectId, PrefixRecord, VlanRecord};
use crate::planner::{SiteRecord, TenantRecord};

/// Configuration for NetBox connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetBoxConfig {
    /// NetBox base URL (e.g., "http://netbox.local")
    pub base_url: String,

    /// API token for authentication
    pub api_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for NetBoxConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Tenant create body
#[derive(Debug, Serialize)]
struct TenantBody<'a> {
    name: &'a str,
    slug: String,
    description: &'a str,
}

/// Site create body
#[derive(Debug, Serialize)]
struct SiteBody<'a> {
    name: &'a str,
    slug: String,
    status: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<ObjectId>,
}

/// Lower-case ASCII alphanumerics, every other run of characters becomes `-`
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

/// The part of a NetBox create response the executor needs
#[derive(Debug, Deserialize)]
struct Created {
    id: ObjectId,
}

/// NetBox-backed inventory store
pub struct NetBoxInventory {
    config: NetBoxConfig,
    client: Client,
}

impl NetBoxInventory {
    /// Create a new NetBox inventory client
    pub fn new(config: NetBoxConfig) -> AllocationResult<Self> {
        info!("Connecting to NetBox at {}", config.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    "Authorization",
                    format!("Token {}", config.api_token).parse().map_err(|e| {
                        AllocationError::Configuration(format!("Invalid API token: {}", e))
                    })?,
                );
                headers.insert(
                    "Content-Type",
                    "application/json".parse().map_err(|e| {
                        AllocationError::Configuration(format!("Invalid header: {}", e))
                    })?,
                );
                headers
            })
            .build()
            .map_err(|e| {
                AllocationError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Verify NetBox is reachable and the token is accepted
    pub async fn health_check(&self) -> AllocationResult<()> {
        let response = self
            .client
            .get(self.endpoint("status/"))
            .send()
            .await
            .map_err(|e| AllocationError::Inventory(format!("NetBox health check failed: {}", e)))?;

        if response.status().is_success() {
            debug!("NetBox health check passed");
            Ok(())
        } else {
            Err(AllocationError::Inventory(format!(
                "NetBox returned status: {}",
                response.status()
            )))
        }
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> AllocationResult<ObjectId> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AllocationError::Inventory(format!("NetBox API error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::CREATED || status == StatusCode::OK {
            let created: Created = response
                .json()
                .await
                .map_err(|e| AllocationError::Serialization(format!("NetBox response: {}", e)))?;
            Ok(created.id)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AllocationError::Inventory(format!(
                "NetBox API returned {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl InventoryStore for NetBoxInventory {
    async fn create_prefix(&mut self, record: &PrefixRecord) -> AllocationResult<ObjectId> {
        let id = self.post("ipam/prefixes/", record).await?;
        debug!("Created NetBox prefix {} ({})", record.prefix, id);
        Ok(id)
    }

    async fn create_vlan(&mut self, record: &VlanRecord) -> AllocationResult<ObjectId> {
        let id = self.post("ipam/vlans/", record).await?;
        debug!("Created NetBox VLAN {} ({})", record.vid, id);
        Ok(id)
    }

    async fn create_tenant(&mut self, tenant: &TenantRecord) -> AllocationResult<ObjectId> {
        let body = TenantBody {
            name: &tenant.name,
            slug: slug(&tenant.name),
            description: &tenant.description,
        };
        let id = self.post("tenancy/tenants/", &body).await?;
        debug!("Created NetBox tenant {} ({})", tenant.name, id);
        Ok(id)
    }

    async fn create_site(
        &mut self,
        site: &SiteRecord,
        tenant: Option<ObjectId>,
    ) -> AllocationResult<ObjectId> {
        let body = SiteBody {
            name: &site.name,
            slug: slug(&site.name),
            status: &site.status,
            description: &site.description,
            tenant,
        };
        let id = self.post("dcim/sites/", &body).await?;
        debug!("Created NetBox site {} ({})", site.name, id);
        Ok(id)
    }

    fn name(&self) -> &str {
        "netbox-ipam"
    }
}
