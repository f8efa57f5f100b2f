// Copyright (c) 2025 - Cowboy AI, Inc.
//! Naming Conventions for Site Resources
//!
//! Canonical names for everything a site plan produces. Generators are total
//! functions of their inputs; parsers are partial and return `None` on any
//! mismatch.
//!
//! | Resource  | Pattern                    | Example          | Parser |
//! |-----------|----------------------------|------------------|--------|
//! | Tenant    | `{country}-{region}-{n}`   | `br-ne-1`        | yes    |
//! | Facility  | `{CITY}-DC-{nn}`           | `RJ-DC-01`       | yes    |
//! | Site      | `Site {City}`              | `Site Nordeste`  | no     |
//! | VLAN      | `VLAN {vid} - {desc}`      | `VLAN 100 - OOB` | no     |
//! | Rack      | `{SITE}-{ROW}{nn}`         | `NE1-A01`        | no     |
//! | Device    | `{role}-{site}-{nn}`       | `spine-ne1-01`   | no     |
//! | Interface | `{type}{slot}/{n}`         | `Ethernet1/1`    | no     |
//!
//! Tenant names and facility codes round-trip: parsing a generated string
//! yields the generator's inputs.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::vlan::VlanCatalog;

static TENANT_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static FACILITY_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn tenant_pattern() -> Option<&'static Regex> {
    TENANT_PATTERN
        .get_or_init(|| Regex::new(r"^([a-z]{2})-([a-z]{1,2})-([0-9]+)$").ok())
        .as_ref()
}

fn facility_pattern() -> Option<&'static Regex> {
    FACILITY_PATTERN
        .get_or_init(|| Regex::new(r"^([A-Z]{2,4})-DC-([0-9]{2})$").ok())
        .as_ref()
}

/// Regional codes used in tenant and site names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionCode {
    Nordeste,
    Sudeste,
    Sul,
    Norte,
    CentroOeste,
}

impl RegionCode {
    pub const ALL: [RegionCode; 5] = [
        Self::Nordeste,
        Self::Sudeste,
        Self::Sul,
        Self::Norte,
        Self::CentroOeste,
    ];

    /// Get the short code used inside names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nordeste => "ne",
            Self::Sudeste => "se",
            Self::Sul => "s",
            Self::Norte => "n",
            Self::CentroOeste => "co",
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == code)
            .ok_or_else(|| format!("unknown region code: {s}"))
    }
}

/// Parsed tenant name, e.g. `br-ne-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantName {
    pub country: String,
    pub region: String,
    pub number: u32,
}

impl TenantName {
    /// Parse a tenant name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        let caps = tenant_pattern()?.captures(&lowered)?;
        Some(Self {
            country: caps[1].to_string(),
            region: caps[2].to_string(),
            number: caps[3].parse().ok()?,
        })
    }
}

impl fmt::Display for TenantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&NamingConvention::tenant_name(&self.country, &self.region, self.number))
    }
}

/// Parsed facility code, e.g. `RJ-DC-01`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacilityCode {
    pub city_code: String,
    pub dc_number: u32,
}

impl FacilityCode {
    /// Parse a facility code, case-insensitively. The city code comes back
    /// upper-cased.
    pub fn parse(code: &str) -> Option<Self> {
        let uppered = code.to_uppercase();
        let caps = facility_pattern()?.captures(&uppered)?;
        Some(Self {
            city_code: caps[1].to_string(),
            dc_number: caps[2].parse().ok()?,
        })
    }
}

impl fmt::Display for FacilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&NamingConvention::facility_code(&self.city_code, self.dc_number))
    }
}

/// Stateless generator and parser for canonical resource names
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingConvention;

impl NamingConvention {
    /// `Site {City}` when a city is given, else `Site {Region}` in title case
    pub fn site_name(region: &str, city: Option<&str>) -> String {
        match city {
            Some(city) => format!("Site {city}"),
            None => format!("Site {}", title_case(region)),
        }
    }

    /// `{country}-{region}-{number}`, lower-cased
    pub fn tenant_name(country: &str, region: &str, number: u32) -> String {
        format!("{country}-{region}-{number}").to_lowercase()
    }

    /// `{CITY}-DC-{number:02}`
    pub fn facility_code(city_code: &str, dc_number: u32) -> String {
        format!("{}-DC-{:02}", city_code.to_uppercase(), dc_number)
    }

    /// `VLAN {vid} - {description}`
    pub fn vlan_name(vid: u16, description: &str) -> String {
        format!("VLAN {vid} - {description}")
    }

    /// `{SITE}-{ROW}{number:02}`
    pub fn rack_name(site_code: &str, row: &str, number: u32) -> String {
        format!(
            "{}-{}{:02}",
            site_code.to_uppercase(),
            row.to_uppercase(),
            number
        )
    }

    /// `{role}-{site}-{number:02}`, role and site lower-cased
    pub fn device_name(role: &str, site_code: &str, number: u32) -> String {
        format!(
            "{}-{}-{:02}",
            role.to_lowercase(),
            site_code.to_lowercase(),
            number
        )
    }

    /// `{type}{slot}/{number}`, or `{type}{number}` without a slot
    pub fn interface_name(interface_type: &str, number: u32, slot: Option<u32>) -> String {
        match slot {
            Some(slot) => format!("{interface_type}{slot}/{number}"),
            None => format!("{interface_type}{number}"),
        }
    }

    pub fn parse_tenant_name(name: &str) -> Option<TenantName> {
        TenantName::parse(name)
    }

    pub fn parse_facility_code(code: &str) -> Option<FacilityCode> {
        FacilityCode::parse(code)
    }

    /// Whether `vid` lies in the catalog range for `category`.
    ///
    /// `category` must be a canonical lower-case name (`management`, `data`).
    /// Any other string, including a differently cased one, is an unknown
    /// category; unknown categories are unconstrained and always pass.
    pub fn vid_in_range(catalog: &VlanCatalog, vid: u16, category: &str) -> bool {
        catalog
            .ranges()
            .values()
            .find(|range| range.category.as_str() == category)
            .map_or(true, |range| range.contains(vid))
    }
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("br", "ne", 1, "br-ne-1")]
    #[test_case("BR", "SE", 12, "br-se-12")]
    #[test_case("br", "s", 3, "br-s-3")]
    fn test_tenant_name(country: &str, region: &str, number: u32, expected: &str) {
        assert_eq!(NamingConvention::tenant_name(country, region, number), expected);
    }

    #[test_case("rj", 1, "RJ-DC-01")]
    #[test_case("SP", 2, "SP-DC-02")]
    #[test_case("bsb", 15, "BSB-DC-15")]
    fn test_facility_code(city: &str, number: u32, expected: &str) {
        assert_eq!(NamingConvention::facility_code(city, number), expected);
    }

    #[test]
    fn test_one_way_labels() {
        assert_eq!(NamingConvention::vlan_name(100, "OOB/BMC"), "VLAN 100 - OOB/BMC");
        assert_eq!(NamingConvention::rack_name("ne1", "a", 1), "NE1-A01");
        assert_eq!(NamingConvention::device_name("Spine", "NE1", 1), "spine-ne1-01");
        assert_eq!(NamingConvention::interface_name("Ethernet", 1, Some(1)), "Ethernet1/1");
        assert_eq!(NamingConvention::interface_name("Management", 0, None), "Management0");
    }

    #[test]
    fn test_site_name() {
        assert_eq!(NamingConvention::site_name("nordeste", None), "Site Nordeste");
        assert_eq!(NamingConvention::site_name("ne", Some("Recife")), "Site Recife");
        assert_eq!(NamingConvention::site_name("centro oeste", None), "Site Centro Oeste");
    }

    #[test]
    fn test_parse_tenant_name() {
        let tenant = NamingConvention::parse_tenant_name("br-ne-1").unwrap();
        assert_eq!(tenant.country, "br");
        assert_eq!(tenant.region, "ne");
        assert_eq!(tenant.number, 1);

        let shouted = NamingConvention::parse_tenant_name("BR-CO-42").unwrap();
        assert_eq!(shouted.to_string(), "br-co-42");
    }

    #[test_case("brazil-ne-1" ; "country too long")]
    #[test_case("br-nne-1" ; "region too long")]
    #[test_case("br-ne-" ; "missing number")]
    #[test_case("br-ne-x" ; "non numeric number")]
    #[test_case("br-ne-1 " ; "trailing space")]
    #[test_case("br-ne-99999999999" ; "number overflows")]
    fn test_parse_tenant_name_rejects(name: &str) {
        assert_eq!(NamingConvention::parse_tenant_name(name), None);
    }

    #[test]
    fn test_parse_facility_code() {
        assert_eq!(
            NamingConvention::parse_facility_code("RJ-DC-01"),
            Some(FacilityCode {
                city_code: "RJ".to_string(),
                dc_number: 1,
            })
        );
        let lower = NamingConvention::parse_facility_code("sp-dc-02").unwrap();
        assert_eq!(lower.city_code, "SP");
        assert_eq!(lower.to_string(), "SP-DC-02");
    }

    #[test_case("R-DC-01" ; "city too short")]
    #[test_case("RJABC-DC-01" ; "city too long")]
    #[test_case("RJ-DC-1" ; "single digit")]
    #[test_case("RJ-DC-100" ; "three digits")]
    #[test_case("RJ-XX-01" ; "wrong infix")]
    fn test_parse_facility_code_rejects(code: &str) {
        assert_eq!(NamingConvention::parse_facility_code(code), None);
    }

    #[test]
    fn test_round_trip() {
        let name = NamingConvention::tenant_name("br", "ne", 7);
        let parsed = TenantName::parse(&name).unwrap();
        assert_eq!((parsed.country.as_str(), parsed.region.as_str(), parsed.number), ("br", "ne", 7));

        let code = NamingConvention::facility_code("rj", 1);
        let parsed = FacilityCode::parse(&code).unwrap();
        assert_eq!((parsed.city_code.as_str(), parsed.dc_number), ("RJ", 1));
    }

    #[test]
    fn test_vid_in_range() {
        let catalog = VlanCatalog::standard();
        assert!(NamingConvention::vid_in_range(&catalog, 150, "management"));
        assert!(!NamingConvention::vid_in_range(&catalog, 250, "management"));
        assert!(NamingConvention::vid_in_range(&catalog, 299, "data"));
        assert!(!NamingConvention::vid_in_range(&catalog, 300, "data"));
        // Unknown categories are unconstrained
        assert!(NamingConvention::vid_in_range(&catalog, 4000, "storage"));
    }

    #[test_case("Management" ; "title case")]
    #[test_case("DATA" ; "upper case")]
    #[test_case(" management" ; "leading space")]
    fn test_vid_in_range_matches_category_exactly(category: &str) {
        let catalog = VlanCatalog::standard();
        assert!(NamingConvention::vid_in_range(&catalog, 4000, category));
    }

    #[test]
    fn test_region_codes() {
        assert_eq!("NE".parse::<RegionCode>().unwrap(), RegionCode::Nordeste);
        assert_eq!(RegionCode::CentroOeste.to_string(), "co");
        assert!("xx".parse::<RegionCode>().is_err());
    }
}
