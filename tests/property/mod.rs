// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod naming_round_trip;
mod plan_properties;
mod prefix_search;
mod vlan_catalog;
