// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property tests for canonical names
//!
//! Generated tenant names and facility codes parse back to their components.

use cim_ipam::domain::NamingConvention;
use proptest::prelude::*;

proptest! {
    /// Property: parse(facility_code(city, n)) recovers the upper-cased city and n
    #[test]
    fn prop_facility_code_round_trip(city in "[a-z]{2,4}", number in 0u32..100) {
        let code = NamingConvention::facility_code(&city, number);
        let parsed = NamingConvention::parse_facility_code(&code).unwrap();

        prop_assert_eq!(parsed.city_code, city.to_uppercase());
        prop_assert_eq!(parsed.dc_number, number);
    }

    /// Property: parse(tenant_name(country, region, n)) recovers every part
    #[test]
    fn prop_tenant_name_round_trip(
        country in "[a-z]{2}",
        region in "[a-z]{1,2}",
        number in 0u32..10_000,
    ) {
        let name = NamingConvention::tenant_name(&country, &region, number);
        let parsed = NamingConvention::parse_tenant_name(&name).unwrap();

        prop_assert_eq!(parsed.to_string(), name);
        prop_assert_eq!(parsed.country, country);
        prop_assert_eq!(parsed.region, region);
        prop_assert_eq!(parsed.number, number);
    }

    /// Property: Parsing ignores case
    #[test]
    fn prop_tenant_name_case_insensitive(region in "[a-z]{1,2}", number in 1u32..100) {
        let name = NamingConvention::tenant_name("br", &region, number);
        prop_assert_eq!(
            NamingConvention::parse_tenant_name(&name.to_uppercase()),
            NamingConvention::parse_tenant_name(&name)
        );
    }
}
