// Copyright (c) 2025 - Cowboy AI, Inc.
//! VLAN Catalog
//!
//! The predefined VLAN identifiers a site is provisioned with and the numeric
//! band each category of traffic owns. The catalog is plain configuration:
//! it is constructed once, validated, and handed to the planner by value.
//!
//! # Reference Catalog
//!
//! ```text
//! management  100-199  Management Fabric
//!   100 oob_bmc   101 pxe   102 oam   103 bgp
//! data        250-299  Data Networks
//!   250 overlay   251 api_internal   252 api_access   253 block_storage
//!   254 object_storage_access   255 object_storage_replicate
//!   256 data_management
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::network::VlanId;

/// Catalog construction error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("VLAN ranges for {first} and {second} overlap")]
    OverlappingRanges {
        first: VlanCategory,
        second: VlanCategory,
    },

    #[error("Range for {category} is empty or inverted: {start}-{end}")]
    InvertedRange {
        category: VlanCategory,
        start: u16,
        end: u16,
    },

    #[error("Duplicate range for category {0}")]
    DuplicateRange(VlanCategory),

    #[error("Duplicate VLAN definition for VID {0}")]
    DuplicateVid(VlanId),

    #[error("VLAN {vid} ({name}) lies outside the {category} range")]
    DefinitionOutOfRange {
        vid: VlanId,
        name: String,
        category: VlanCategory,
    },

    #[error("Unknown VLAN category: {0}")]
    UnknownCategory(String),
}

/// Class of traffic a band of VLAN ids is reserved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VlanCategory {
    /// Out-of-band, provisioning, operations and routing fabric
    Management,
    /// Tenant-facing data networks
    Data,
}

impl VlanCategory {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Management => "management",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for VlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VlanCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "management" => Ok(Self::Management),
            "data" => Ok(Self::Data),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// A predefined VLAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanDefinition {
    pub vid: VlanId,
    /// Short key, e.g. `oob_bmc`
    pub name: String,
    pub description: String,
    pub category: VlanCategory,
}

impl VlanDefinition {
    pub fn new(
        vid: VlanId,
        name: impl Into<String>,
        description: impl Into<String>,
        category: VlanCategory,
    ) -> Self {
        Self {
            vid,
            name: name.into(),
            description: description.into(),
            category,
        }
    }
}

/// Inclusive band of VLAN ids owned by one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRange {
    pub category: VlanCategory,
    pub start: u16,
    pub end: u16,
    pub description: String,
}

impl VlanRange {
    pub fn new(category: VlanCategory, start: u16, end: u16, description: impl Into<String>) -> Self {
        Self {
            category,
            start,
            end,
            description: description.into(),
        }
    }

    pub fn contains(&self, vid: u16) -> bool {
        (self.start..=self.end).contains(&vid)
    }

    fn intersects(&self, other: &VlanRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Validated table of VLAN definitions and category ranges
///
/// Definition order is significant: the planner assigns purpose subnets by
/// position in [`VlanCatalog::definitions`], so reordering the table moves
/// every subnet after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanCatalog {
    definitions: Vec<VlanDefinition>,
    ranges: BTreeMap<VlanCategory, VlanRange>,
}

impl VlanCatalog {
    /// Build a catalog, checking that ranges are disjoint, VIDs are unique and
    /// every definition lies inside its category's range.
    pub fn new(
        definitions: Vec<VlanDefinition>,
        ranges: Vec<VlanRange>,
    ) -> Result<Self, CatalogError> {
        let mut by_category: BTreeMap<VlanCategory, VlanRange> = BTreeMap::new();
        for range in ranges {
            if range.start > range.end {
                return Err(CatalogError::InvertedRange {
                    category: range.category,
                    start: range.start,
                    end: range.end,
                });
            }
            if let Some(clash) = by_category.values().find(|r| r.intersects(&range)) {
                if clash.category == range.category {
                    return Err(CatalogError::DuplicateRange(range.category));
                }
                return Err(CatalogError::OverlappingRanges {
                    first: clash.category,
                    second: range.category,
                });
            }
            if by_category.contains_key(&range.category) {
                return Err(CatalogError::DuplicateRange(range.category));
            }
            by_category.insert(range.category, range);
        }

        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.vid) {
                return Err(CatalogError::DuplicateVid(def.vid));
            }
            let in_range = by_category
                .get(&def.category)
                .is_some_and(|r| r.contains(def.vid.value()));
            if !in_range {
                return Err(CatalogError::DefinitionOutOfRange {
                    vid: def.vid,
                    name: def.name.clone(),
                    category: def.category,
                });
            }
        }

        Ok(Self {
            definitions,
            ranges: by_category,
        })
    }

    /// The reference data-center catalog (see module docs)
    pub fn standard() -> Self {
        use VlanCategory::{Data, Management};

        let table: [(u16, &str, &str, VlanCategory); 11] = [
            (100, "oob_bmc", "OOB/BMC - Out-of-band management", Management),
            (101, "pxe", "PXE - Provisioning/boot network", Management),
            (102, "oam", "OAM - Operations, access, monitoring", Management),
            (103, "bgp", "BGP - Routing network", Management),
            (250, "overlay", "Overlay - Tunneling network", Data),
            (251, "api_internal", "API Internal - Service connectivity", Data),
            (252, "api_access", "API Access - User to Kong", Data),
            (253, "block_storage", "Block Storage - Ceph access/replication", Data),
            (254, "object_storage_access", "Object Storage Access - Swift Proxy", Data),
            (255, "object_storage_replicate", "Object Storage Replicate - Swift data", Data),
            (256, "data_management", "Data Management - Telco rack management", Data),
        ];

        // VIDs above are literals inside 1..=4094 and inside their ranges.
        let definitions = table
            .into_iter()
            .map(|(vid, name, description, category)| VlanDefinition {
                vid: VlanId(vid),
                name: name.to_string(),
                description: description.to_string(),
                category,
            })
            .collect();

        let ranges = BTreeMap::from([
            (Management, VlanRange::new(Management, 100, 199, "Management Fabric")),
            (Data, VlanRange::new(Data, 250, 299, "Data Networks")),
        ]);

        Self {
            definitions,
            ranges,
        }
    }

    /// Definitions in canonical (subnet-assignment) order
    pub fn definitions(&self) -> &[VlanDefinition] {
        &self.definitions
    }

    /// Category ranges, keyed by category
    pub fn ranges(&self) -> &BTreeMap<VlanCategory, VlanRange> {
        &self.ranges
    }

    pub fn range(&self, category: VlanCategory) -> Option<&VlanRange> {
        self.ranges.get(&category)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definition_by_vid(&self, vid: u16) -> Option<&VlanDefinition> {
        self.definitions.iter().find(|def| def.vid.value() == vid)
    }

    /// The category whose range contains `vid`
    pub fn category_of(&self, vid: u16) -> Option<VlanCategory> {
        self.ranges
            .values()
            .find(|range| range.contains(vid))
            .map(|range| range.category)
    }

    /// Lowest id in the category's range that is not in `used_vids`.
    ///
    /// `None` means the range is exhausted (or the catalog has no range for
    /// the category).
    pub fn next_available_vid(
        &self,
        category: VlanCategory,
        used_vids: &HashSet<u16>,
    ) -> Option<VlanId> {
        let range = self.ranges.get(&category)?;
        (range.start..=range.end)
            .find(|vid| !used_vids.contains(vid))
            .and_then(|vid| VlanId::new(vid).ok())
    }
}

impl Default for VlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
