//! Crossing counting with a merge-free accumulator tree, after
//! Barth, Jünger & Mutzel, "Simple and Efficient Bilayer Cross Counting".

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

/// Total crossings over all adjacent layer pairs.
pub fn cross_count(segments: &BTreeSet<(u64, u64)>, layers: &[Vec<u64>]) -> usize {
    let mut total = 0;
    for pair in layers.windows(2) {
        total += two_layer_cross_count(segments, &pair[0], &pair[1]);
    }
    total
}

/// Crossings between one layer pair. Segments are walked in north order and
/// their south endpoints fed into an accumulator tree; each insertion adds
/// the number of already-inserted endpoints strictly to its right, which is
/// exactly the number of crossings the segment participates in.
pub(crate) fn two_layer_cross_count(
    segments: &BTreeSet<(u64, u64)>,
    north: &[u64],
    south: &[u64],
) -> usize {
    if south.is_empty() {
        return 0;
    }

    let south_pos: FxHashMap<u64, usize> = south
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i))
        .collect();

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = segments
            .range((v, u64::MIN)..=(v, u64::MAX))
            .filter_map(|&(_, w)| south_pos.get(&w).copied())
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut count = 0;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut right_sum = 0;
        while index > 0 {
            if index % 2 == 1 {
                right_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        count += right_sum;
    }

    count
}
