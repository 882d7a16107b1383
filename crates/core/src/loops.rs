use std::ops::Range;

use crate::types::{LoopInfo, PairTable};

/// Decompose the pair table into its loop tree.
///
/// Index 0 is the exterior loop. Every other loop is created by a pair and
/// appears after the loop that contains that pair (preorder over the tree),
/// with sibling loops in sequence order.
pub fn decompose(pt: &PairTable) -> Vec<LoopInfo> {
    let n = pt.n_bases;
    if n == 0 {
        return vec![];
    }

    // All base pairs (i, j) with i < j, in sequence order
    let mut all_pairs: Vec<(usize, usize)> = Vec::new();
    for i in 0..n {
        let j = pt.pairs[i];
        if j != i && i < j {
            all_pairs.push((i, j));
        }
    }

    // Parent of each pair = its smallest enclosing pair. Pairs with no
    // enclosing pair belong to the exterior loop. Children end up in
    // sequence order because all_pairs is already sorted by first index.
    let mut children_of_pair: Vec<Vec<usize>> = vec![vec![]; all_pairs.len()];
    let mut exterior_children: Vec<usize> = Vec::new();
    for (k, &(ki, kj)) in all_pairs.iter().enumerate() {
        let mut best: Option<usize> = None;
        let mut best_span = usize::MAX;
        for (m, &(mi, mj)) in all_pairs.iter().enumerate() {
            if m != k && mi < ki && kj < mj && mj - mi < best_span {
                best_span = mj - mi;
                best = Some(m);
            }
        }
        match best {
            Some(parent) => children_of_pair[parent].push(k),
            None => exterior_children.push(k),
        }
    }

    // Exterior loop (loop 0). With no pairs at all it still exists and
    // holds every base as unpaired.
    let ext_child_pairs: Vec<(usize, usize)> =
        exterior_children.iter().map(|&k| all_pairs[k]).collect();
    let mut loops = vec![LoopInfo {
        parent_pair: None,
        unpaired_bases: unpaired_in_range(pt, &ext_child_pairs, 0..n),
        child_pairs: ext_child_pairs,
    }];

    // Preorder walk; explicit stack keeps deep stems off the call stack.
    let mut stack: Vec<usize> = exterior_children.iter().rev().copied().collect();
    while let Some(k) = stack.pop() {
        let (i, j) = all_pairs[k];
        let child_pairs: Vec<(usize, usize)> = children_of_pair[k]
            .iter()
            .map(|&c| all_pairs[c])
            .collect();
        loops.push(LoopInfo {
            parent_pair: Some((i, j)),
            unpaired_bases: unpaired_in_range(pt, &child_pairs, i + 1..j),
            child_pairs,
        });
        for &c in children_of_pair[k].iter().rev() {
            stack.push(c);
        }
    }

    loops
}

/// Unpaired bases in `range` not covered by any of the given child pairs.
fn unpaired_in_range(
    pt: &PairTable,
    child_pairs: &[(usize, usize)],
    range: Range<usize>,
) -> Vec<usize> {
    let mut covered = vec![false; pt.n_bases];
    for &(ci, cj) in child_pairs {
        covered[ci..=cj].fill(true);
    }
    range.filter(|&b| !covered[b] && pt.pairs[b] == b).collect()
}
