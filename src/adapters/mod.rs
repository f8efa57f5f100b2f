// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory adapter implementations
//!
//! Concrete [`InventoryStore`](crate::executor::InventoryStore) backends for
//! external systems of record.

#[cfg(feature = "netbox")]
pub mod netbox;

#[cfg(feature = "netbox")]
pub use netbox::{NetBoxConfig, NetBoxInventory};
