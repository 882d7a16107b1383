use crate::types::*;
use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_2, PI};

const HALF_PAIR: f64 = 0.5;
const STEM_RADIUS: f64 = 0.6;
const TWO_PI: f64 = 2.0 * PI;

/// Place loops and bases in the plane.
pub fn place(loop_infos: &[LoopInfo], pt: &PairTable) -> (Vec<Loop>, Vec<Base>) {
    let n = pt.n_bases;
    if n == 0 || loop_infos.is_empty() {
        return (vec![], vec![]);
    }

    let mut loops: Vec<Loop> = Vec::with_capacity(loop_infos.len());

    // Step 1: Calculate radius/height/pair_angle/arc_angle per loop
    for info in loop_infos {
        let n_pairs = info.child_pairs.len() + usize::from(info.parent_pair.is_some());
        let n_arcs = (n_pairs + info.unpaired_bases.len()) as f64;

        let (radius, pair_angle, arc_angle) = if n_pairs == 0 {
            // Pair-less exterior loop: unit backbone steps on a closed circle
            (n_arcs / TWO_PI, 0.0, TWO_PI / n_arcs)
        } else if n_pairs == 2 && info.unpaired_bases.is_empty() && !info.child_pairs.is_empty() {
            // Stem: exactly 2 pairs, no unpaired bases
            let pa = 2.0 * (HALF_PAIR / STEM_RADIUS).asin();
            (STEM_RADIUS, pa, (TWO_PI - 2.0 * pa) / 2.0)
        } else {
            // General loop: Newton-Raphson circle closure
            let r = newton_raphson_radius(n_pairs as f64, n_arcs);
            let pa = 2.0 * half_pair_angle(r);
            let aa = (TWO_PI - (n_pairs as f64) * pa) / n_arcs;
            (r, pa, aa)
        };

        // Chord height; pair-less loops can be smaller than a pair chord
        let height = (radius * radius - HALF_PAIR * HALF_PAIR).max(0.0).sqrt();

        loops.push(Loop {
            arc_angle,
            height,
            pair_angle,
            pairs: vec![],
            radius,
            x: 0.0,
            y: 0.0,
        });
    }

    // Step 2: build loop pairs (with correct orientation) and place loop
    // centers via BFS
    let centers = bfs_build_and_place(&mut loops, loop_infos);

    // Step 3: Calculate base coordinates
    let mut bases = compute_bases(&loops, loop_infos, pt, &centers);

    // Step 4: Center everything so the bounding-box center is the origin
    center_coordinates(&mut loops, &mut bases);

    (loops, bases)
}

/// Half the angle subtended by a pair chord on a circle of the given radius.
/// Clamped for radii below the half-chord (pair-less loops only).
fn half_pair_angle(radius: f64) -> f64 {
    let s = HALF_PAIR / radius;
    if s >= 1.0 { FRAC_PI_2 } else { s.asin() }
}

/// Newton-Raphson: solve n_p * 2*asin(0.5/r) + n_arcs/r = 2π
fn newton_raphson_radius(np: f64, n_arcs: f64) -> f64 {
    // Initial guess
    let mut r = (np + n_arcs) / TWO_PI;
    if r < HALF_PAIR + 0.01 {
        r = HALF_PAIR + 0.01;
    }

    for _ in 0..30 {
        let s = HALF_PAIR / r;
        if s.abs() >= 1.0 {
            r *= 1.5;
            continue;
        }
        let asin_s = s.asin();
        let f = np * 2.0 * asin_s + n_arcs / r - TWO_PI;
        let cos_asin = (1.0 - s * s).sqrt();
        let df = np * 2.0 * (-HALF_PAIR / (r * r * cos_asin)) - n_arcs / (r * r);
        if df.abs() < 1e-30 {
            break;
        }
        r -= f / df;
        if r < HALF_PAIR + 1e-10 {
            r = HALF_PAIR + 1e-10;
        }
    }
    r
}

// ── Loop element traversal ──────────────────────────────────────────

#[derive(Debug, Clone)]
enum Elem {
    PairFirst(usize, usize, bool), // (base, partner, is_parent)
    PairLast(usize, usize, bool),
    Unpaired(usize),
}

/// Collect elements on a loop's circle in traversal order.
///
/// Internal loops start at the parent pair's far base and run CW inside the
/// pair; the exterior loop starts at the closing base of its first child
/// pair so the wrap-around lands on that pair's bond.
fn collect_elements(info: &LoopInfo) -> Vec<Elem> {
    let mut items: Vec<(usize, Elem)> = Vec::new();

    if let Some((pi, pj)) = info.parent_pair {
        items.push((pj, Elem::PairFirst(pj, pi, true)));
        items.push((pi, Elem::PairLast(pi, pj, true)));
    }

    for &(ci, cj) in &info.child_pairs {
        items.push((ci, Elem::PairFirst(ci, cj, false)));
        items.push((cj, Elem::PairLast(cj, ci, false)));
    }

    for &b in &info.unpaired_bases {
        items.push((b, Elem::Unpaired(b)));
    }

    if items.is_empty() {
        return vec![];
    }

    items.sort_by_key(|&(idx, _)| idx);

    let ordered: Vec<Elem> = if let Some((_pi, pj)) = info.parent_pair {
        // Internal: start at pj, go decreasing (CW inside pair)
        let pj_pos = items.iter().position(|(idx, _)| *idx == pj).unwrap_or(0);
        let n = items.len();
        (0..n)
            .map(|i| items[(pj_pos + n - i) % n].1.clone())
            .collect()
    } else {
        // Exterior: start at PairLast of the first child pair (cj), sequence
        // order, so PairFirst ends up at the bottom of the angle range
        // (wrap-around = pair bond).
        let start = if let Some(&(_ci, cj)) = info.child_pairs.first() {
            items.iter().position(|(idx, _)| *idx == cj).unwrap_or(0)
        } else {
            0
        };
        let n = items.len();
        (0..n).map(|i| items[(start + i) % n].1.clone()).collect()
    };

    ordered
}

/// BFS: build loop pairs with correct orientation, then place loop centers.
///
/// For the root loop (exterior), center = π/2.
/// For each child loop visited via BFS, center = incoming_angle + π,
/// where incoming_angle is the pair angle in the parent loop.
/// This ensures multiloop branches are correctly rotated.
fn bfs_build_and_place(loops: &mut [Loop], infos: &[LoopInfo]) -> Vec<f64> {
    let n = loops.len();
    if n == 0 {
        return vec![];
    }

    let mut centers = vec![0.0f64; n];

    // Build pairs for loop 0 (exterior) with center = π/2
    centers[0] = PI / 2.0;
    build_loop_pairs(loops, infos, 0, centers[0]);
    loops[0].x = 0.0;
    loops[0].y = 0.0;

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut queue = VecDeque::new();
    queue.push_back(0usize);

    while let Some(li) = queue.pop_front() {
        let pairs = loops[li].pairs.clone();
        for lp in &pairs {
            let ni = lp.neighbor;
            if ni >= n || visited[ni] {
                continue;
            }
            visited[ni] = true;

            // The child loop's parent pair should point back towards us.
            let child_center = lp.angle + PI;
            centers[ni] = child_center;

            build_loop_pairs(loops, infos, ni, child_center);

            // Place child: pair midpoint in parent loop
            let mx = loops[li].x + loops[li].height * lp.angle.cos();
            let my = loops[li].y + loops[li].height * lp.angle.sin();

            // Find angle of parent pair in child loop
            let ni_angle = loops[ni]
                .pairs
                .iter()
                .find(|p| p.first == lp.last && p.last == lp.first)
                .map(|p| p.angle)
                .unwrap_or(child_center);

            // Child center = midpoint - child.height * direction
            loops[ni].x = mx - loops[ni].height * ni_angle.cos();
            loops[ni].y = my - loops[ni].height * ni_angle.sin();

            queue.push_back(ni);
        }
    }

    centers
}

/// Build LoopPair entries for a single loop with the given center angle.
fn build_loop_pairs(loops: &mut [Loop], infos: &[LoopInfo], li: usize, center: f64) {
    loops[li].pairs.clear();
    let info = &infos[li];
    let elements = collect_elements(info);
    if elements.is_empty() {
        return;
    }

    let half_pa = half_pair_angle(loops[li].radius);
    let pair_a = 2.0 * half_pa;
    let arc_a = loops[li].arc_angle;
    let is_external = info.parent_pair.is_none();

    let angles = assign_angles(&elements, half_pa, pair_a, arc_a, is_external, center);

    // Extract pairs: pair center = PairLast_angle + half_pa
    for (i, elem) in elements.iter().enumerate() {
        if let Elem::PairFirst(first, last, _) = elem {
            let last_idx = elements
                .iter()
                .position(|e| matches!(e, Elem::PairLast(b, _, _) if *b == *last))
                .unwrap_or(i);
            let pair_center = angles[last_idx] + half_pa;
            let neighbor = find_neighbor_loop(infos, li, *first, *last);
            loops[li].pairs.push(LoopPair {
                angle: pair_center,
                first: *first,
                last: *last,
                neighbor,
            });
        }
    }
}

/// Assign angles to loop elements.
///
/// Exterior loop: CW (decreasing) from center - half_pa.
/// Internal loops: CCW (increasing) from center + half_pa - 2π.
///
/// `center` is the angle of the parent pair (for internal) or the first
/// child pair direction (for the exterior loop). For internal loops in
/// multiloop branches, this is rotated to match the incoming direction.
fn assign_angles(
    elements: &[Elem],
    half_pa: f64,
    pair_a: f64,
    arc_a: f64,
    is_external: bool,
    center: f64,
) -> Vec<f64> {
    let n = elements.len();
    let mut angles = vec![0.0f64; n];

    let first_angle = if is_external {
        center - half_pa
    } else {
        center + half_pa - TWO_PI
    };

    let mut cur = first_angle;
    for i in 0..n {
        if i > 0 {
            let step = step_between(&elements[i - 1], &elements[i], pair_a, arc_a, is_external);
            if is_external {
                cur -= step;
            } else {
                cur += step;
            }
        }
        angles[i] = cur;
    }
    angles
}

/// Angular step between consecutive elements in the traversal.
///
/// PF→PL of same child pair: always pair_a (entering pair bond).
/// PL→PF of same child pair: depends on direction.
///   - Exterior (CW): arc_a (going the long way around)
///   - Internal (CCW): pair_a (going the short way = pair bond)
fn step_between(prev: &Elem, curr: &Elem, pair_a: f64, arc_a: f64, is_external: bool) -> f64 {
    // PF→PL: always pair bond
    if matches!(
        (prev, curr),
        (Elem::PairFirst(_, l1, false), Elem::PairLast(f2, _, false)) if *l1 == *f2
    ) {
        return pair_a;
    }
    // PL→PF: pair bond only for internal loops (CCW direction)
    if matches!(
        (prev, curr),
        (Elem::PairLast(_, l1, false), Elem::PairFirst(f2, _, false)) if *l1 == *f2
    ) {
        return if is_external { arc_a } else { pair_a };
    }
    arc_a
}

// ── Base coordinate computation ─────────────────────────────────────

fn compute_bases(loops: &[Loop], infos: &[LoopInfo], pt: &PairTable, centers: &[f64]) -> Vec<Base> {
    let n = pt.n_bases;
    let mut bases = vec![
        Base {
            angle: 0.0,
            loop_index: 0,
            x: 0.0,
            y: 0.0,
        };
        n
    ];

    for (li, info) in infos.iter().enumerate() {
        let lp = &loops[li];
        let elements = collect_elements(info);
        if elements.is_empty() {
            continue;
        }

        let half_pa = half_pair_angle(lp.radius);
        let pair_a = 2.0 * half_pa;
        let arc_a = lp.arc_angle;
        let is_external = info.parent_pair.is_none();

        let angles = assign_angles(&elements, half_pa, pair_a, arc_a, is_external, centers[li]);

        // A paired base shows up in two loops; the later (inner) loop wins,
        // and both placements agree because the shared pair chord does.
        for (i, elem) in elements.iter().enumerate() {
            let base_idx = match elem {
                Elem::PairFirst(b, _, _) | Elem::PairLast(b, _, _) | Elem::Unpaired(b) => *b,
            };

            let angle = angles[i];
            bases[base_idx].x = lp.x + lp.radius * angle.cos();
            bases[base_idx].y = lp.y + lp.radius * angle.sin();
            bases[base_idx].angle = angle;
            bases[base_idx].loop_index = li;
        }
    }

    bases
}

// ── Bounding box centering ──────────────────────────────────────────

fn center_coordinates(loops: &mut [Loop], bases: &mut [Base]) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for lp in loops.iter() {
        min_x = min_x.min(lp.x);
        max_x = max_x.max(lp.x);
        min_y = min_y.min(lp.y);
        max_y = max_y.max(lp.y);
    }

    for b in bases.iter() {
        min_x = min_x.min(b.x);
        max_x = max_x.max(b.x);
        min_y = min_y.min(b.y);
        max_y = max_y.max(b.y);
    }

    let shift_x = -0.5 * (min_x + max_x);
    let shift_y = -0.5 * (min_y + max_y);

    for lp in loops.iter_mut() {
        lp.x += shift_x;
        lp.y += shift_y;
    }
    for b in bases.iter_mut() {
        b.x += shift_x;
        b.y += shift_y;
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn find_neighbor_loop(infos: &[LoopInfo], current: usize, first: usize, last: usize) -> usize {
    // If this pair is the parent pair of the current loop, find the loop
    // holding it as a child pair
    if let Some((pi, pj)) = infos[current].parent_pair {
        if (first == pj && last == pi) || (first == pi && last == pj) {
            for (li, info) in infos.iter().enumerate() {
                if li == current {
                    continue;
                }
                for &(ci, cj) in &info.child_pairs {
                    if (ci == pi && cj == pj) || (ci == pj && cj == pi) {
                        return li;
                    }
                }
            }
            return 0;
        }
    }
    // Otherwise find the loop that has (first, last) as parent pair
    for (li, info) in infos.iter().enumerate() {
        if let Some((a, b)) = info.parent_pair {
            if (a == first && b == last) || (a == last && b == first) {
                return li;
            }
        }
    }
    0
}
