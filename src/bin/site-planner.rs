// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Planner
//!
//! Plans the prefixes and VLANs of a new data-center site and prints the plan
//! as JSON. With `PLANNER_EXECUTE=true` (and the `netbox` feature) the tenant,
//! the site and the plan are then created in NetBox.
//!
//! Run with: cargo run --bin site-planner
//!
//! Environment:
//! - `PLANNER_BASE_NETWORK` (required), e.g. `10.0`
//! - `PLANNER_RACK_COUNT` (default 20)
//! - `PLANNER_SITE_NAME` (default "Site Nordeste")
//! - `PLANNER_REGION` (default "ne")
//! - `PLANNER_EXECUTE` (default false)
//! - `NETBOX_URL`, `NETBOX_API_TOKEN`

use anyhow::{Context, Result};
use cim_ipam::planner::{AllocationPlanner, NamingPreview, SitePlan, SiteRequest};
use tracing::{info, warn};

/// Configuration for the site planner
#[derive(Debug, Clone)]
struct PlannerConfig {
    base_network: String,
    rack_count: usize,
    site_name: String,
    region: String,
    execute: bool,
}

impl PlannerConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let base_network = std::env::var("PLANNER_BASE_NETWORK")
            .context("PLANNER_BASE_NETWORK not set (e.g. PLANNER_BASE_NETWORK=10.0)")?;

        let rack_count = match std::env::var("PLANNER_RACK_COUNT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("PLANNER_RACK_COUNT is not a number: {value}"))?,
            Err(_) => 20,
        };

        let site_name =
            std::env::var("PLANNER_SITE_NAME").unwrap_or_else(|_| "Site Nordeste".to_string());

        let region = std::env::var("PLANNER_REGION").unwrap_or_else(|_| "ne".to_string());

        let execute = std::env::var("PLANNER_EXECUTE")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            base_network,
            rack_count,
            site_name,
            region,
            execute,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PlannerConfig::from_env()?;
    info!("Planning {} on {}", config.site_name, config.base_network);
    info!("  - Racks: {}", config.rack_count);
    info!("  - Region: {}", config.region);

    let planner = AllocationPlanner::default();
    let site_plan = planner
        .plan_site(&SiteRequest {
            site_name: config.site_name.clone(),
            region_code: config.region.clone(),
            base_network: config.base_network.clone(),
            facility_code: None,
            tenant_name: None,
            rack_count: config.rack_count,
        })
        .context("Failed to plan site")?;

    planner
        .validate(&site_plan.allocation_plan)
        .context("Generated plan is inconsistent")?;

    for subnet in site_plan.allocation_plan.clamped_subnets() {
        warn!(
            "{} holds fewer than {} rack subnets",
            subnet.prefix, site_plan.allocation_plan.requested_racks
        );
    }

    let preview = NamingPreview::build(
        planner.catalog(),
        &config.site_name,
        &config.region,
        config.rack_count,
    );

    let output = serde_json::json!({
        "site": &site_plan,
        "naming": preview,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if config.execute {
        execute(&planner, &site_plan).await?;
    }

    Ok(())
}

#[cfg(feature = "netbox")]
async fn execute(planner: &AllocationPlanner, site_plan: &SitePlan) -> Result<()> {
    use cim_ipam::adapters::{NetBoxConfig, NetBoxInventory};
    use cim_ipam::executor::PlanExecutor;

    let netbox = NetBoxConfig {
        base_url: std::env::var("NETBOX_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
        api_token: std::env::var("NETBOX_API_TOKEN").context("NETBOX_API_TOKEN not set")?,
        timeout_secs: 30,
    };

    let inventory = NetBoxInventory::new(netbox).context("Failed to create NetBox client")?;
    inventory.health_check().await.context("NetBox is not reachable")?;

    let report = PlanExecutor::with_catalog(inventory, planner.catalog().clone())
        .execute_site(site_plan)
        .await
        .context("Failed to create site")?;

    info!(
        "Created site {} (tenant {}) with {} prefixes and {} VLANs",
        report.site_id,
        report.tenant_id,
        report.allocation.created_prefixes(),
        report.allocation.created_vlans()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(not(feature = "netbox"))]
async fn execute(_planner: &AllocationPlanner, _site_plan: &SitePlan) -> Result<()> {
    anyhow::bail!("PLANNER_EXECUTE requires a build with the `netbox` feature")
}
