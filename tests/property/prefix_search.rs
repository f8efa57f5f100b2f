// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property tests for next-available prefix search

use cim_ipam::domain::{overlaps, parse_network, PrefixAllocator};
use proptest::prelude::*;
use std::collections::BTreeSet;

const PARENT: &str = "10.20.30.0/24";

/// The `index`-th block of `bits` inside [`PARENT`]
fn block(bits: u8, index: usize) -> String {
    let size = 1usize << (32 - bits);
    format!("10.20.30.{}/{}", index * size, bits)
}

proptest! {
    /// Property: With same-size used blocks, the answer is the lowest free index
    #[test]
    fn prop_lowest_free_block(used in prop::collection::btree_set(0usize..4, 0..=4)) {
        let used_cidrs: Vec<String> = used.iter().map(|&i| block(26, i)).collect();
        let next = PrefixAllocator::next_available(PARENT, 26, &used_cidrs).unwrap();

        let expected = (0..4).find(|i| !used.contains(i)).map(|i| block(26, i));
        prop_assert_eq!(next.map(|n| n.to_string()), expected);
    }

    /// Property: Smaller used blocks disqualify every /26 that holds one
    #[test]
    fn prop_mixed_sizes_never_overlap(used in prop::collection::btree_set(0usize..16, 0..=16)) {
        let used_cidrs: Vec<String> = used.iter().map(|&i| block(28, i)).collect();
        let next = PrefixAllocator::next_available(PARENT, 26, &used_cidrs).unwrap();

        let busy: BTreeSet<usize> = used.iter().map(|i| i / 4).collect();
        let expected = (0..4).find(|i| !busy.contains(i)).map(|i| block(26, i));
        prop_assert_eq!(next.map(|n| n.to_string()), expected);

        if let Some(found) = next {
            let parent = parse_network(PARENT).unwrap();
            prop_assert!(parent.contains(&found));
            for cidr in &used_cidrs {
                prop_assert!(!overlaps(&found, &parse_network(cidr).unwrap()));
            }
        }
    }

    /// Property: A larger used block hides every candidate inside it
    #[test]
    fn prop_used_supernet_exhausts(bits in 25u8..=30) {
        let next = PrefixAllocator::next_available("10.20.30.0/25", bits, [PARENT]).unwrap();
        prop_assert_eq!(next, None);
    }
}
