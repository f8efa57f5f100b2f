// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property tests for VLAN id selection

use cim_ipam::domain::{VlanCatalog, VlanCategory};
use proptest::prelude::*;
use std::collections::HashSet;

/// Subsets of the data range, weighted towards the full and nearly full sets
fn used_data_vids() -> impl Strategy<Value = HashSet<u16>> {
    let random = prop::collection::vec(any::<bool>(), 50).prop_map(|mask| {
        (250u16..=299)
            .zip(mask)
            .filter_map(|(vid, used)| used.then_some(vid))
            .collect::<HashSet<u16>>()
    });
    let full = Just((250u16..=299).collect::<HashSet<u16>>());
    let all_but_one = (250u16..=299)
        .prop_map(|free| (250u16..=299).filter(|v| *v != free).collect::<HashSet<u16>>());

    prop_oneof![random, full, all_but_one]
}

proptest! {
    /// Property: next_available_vid is absent iff the used set covers the range
    #[test]
    fn prop_exhausted_iff_range_covered(used in used_data_vids()) {
        let catalog = VlanCatalog::standard();
        let next = catalog.next_available_vid(VlanCategory::Data, &used);

        prop_assert_eq!(next.is_none(), (250..=299).all(|v| used.contains(&v)));
    }

    /// Property: Any returned VID is the smallest free id in the range
    #[test]
    fn prop_returns_smallest_free(used in used_data_vids()) {
        let catalog = VlanCatalog::standard();
        let next = catalog.next_available_vid(VlanCategory::Data, &used);

        let expected = (250u16..=299).find(|v| !used.contains(v));
        prop_assert_eq!(next.map(|v| v.value()), expected);
    }

    /// Property: VIDs outside the range never affect the answer
    #[test]
    fn prop_foreign_vids_ignored(used in used_data_vids(), foreign in prop::collection::hash_set(1u16..250, 0..20)) {
        let catalog = VlanCatalog::standard();
        let mut mixed = used.clone();
        mixed.extend(foreign);

        prop_assert_eq!(
            catalog.next_available_vid(VlanCategory::Data, &mixed),
            catalog.next_available_vid(VlanCategory::Data, &used)
        );
    }
}

/// A fully used range is the only exhausted state
#[test]
fn test_full_range_exhausted() {
    let used: HashSet<u16> = (250..=299).collect();
    assert_eq!(
        VlanCatalog::standard().next_available_vid(VlanCategory::Data, &used),
        None
    );
}
