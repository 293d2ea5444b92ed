// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 7: line simplification (Visvalingam–Whyatt).
//!
//! Each canonical arc is simplified independently: interior points are
//! removed least-significant first, where significance is the area of the
//! triangle a point forms with its surviving neighbors. Removing a point
//! re-evaluates its neighbors, with the effective area clamped so it never
//! drops below the area of the last removed point (keeps the removal order
//! monotone). Endpoints are junctions shared with other objects and are
//! never touched; a 2-point arc has no interior and passes through.
//!
//! An arc whose surviving points all coincide carries no geometry anymore;
//! such arcs are deleted from the table, and every unit's references are
//! remapped onto the compacted table with their direction signs intact.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::{Point2, Vector2};

use topo_lite_geojson::Position;

use crate::builder::Builder;
use crate::topology::ArcIndex;

/// Area of the triangle spanned by three points.
fn triangle_area(a: &Position, b: &Position, c: &Position) -> f64 {
    let a = Point2::new(a[0], a[1]);
    let b = Point2::new(b[0], b[1]);
    let c = Point2::new(c[0], c[1]);
    let ab: Vector2<f64> = b - a;
    let ac: Vector2<f64> = c - a;
    0.5 * ab.perp(&ac).abs()
}

/// A heap entry: the candidate interior point `index` with its effective
/// area at `version`. Stale versions are skipped on pop (lazy deletion).
#[derive(Debug)]
struct Candidate {
    area: f64,
    index: usize,
    version: u32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for a min-heap; ties break on index so the
        // removal order is deterministic
        other
            .area
            .total_cmp(&self.area)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Removes interior points whose effective area stays below `tolerance`.
/// The first and last point always survive.
fn simplify_arc(points: &[Position], tolerance: f64) -> Vec<Position> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut prev: Vec<usize> = (0..n).map(|i| i.wrapping_sub(1)).collect();
    let mut next: Vec<usize> = (1..=n).collect();
    let mut alive = vec![true; n];
    let mut version = vec![0u32; n];

    let mut heap = BinaryHeap::with_capacity(n - 2);
    for i in 1..n - 1 {
        heap.push(Candidate {
            area: triangle_area(&points[i - 1], &points[i], &points[i + 1]),
            index: i,
            version: 0,
        });
    }

    // effective-area floor: once a point is removed, no later removal may
    // report a smaller significance
    let mut floor = 0.0f64;

    while let Some(candidate) = heap.pop() {
        if candidate.version != version[candidate.index] || !alive[candidate.index] {
            continue; // stale entry
        }
        if candidate.area >= tolerance {
            break;
        }

        let i = candidate.index;
        alive[i] = false;
        floor = floor.max(candidate.area);

        let p = prev[i];
        let nx = next[i];
        next[p] = nx;
        prev[nx] = p;

        for j in [p, nx] {
            if j == 0 || j == n - 1 {
                continue; // endpoints stay exact
            }
            version[j] += 1;
            let area = triangle_area(&points[prev[j]], &points[j], &points[next[j]]).max(floor);
            heap.push(Candidate {
                area,
                index: j,
                version: version[j],
            });
        }
    }

    points
        .iter()
        .zip(alive)
        .filter_map(|(p, keep)| keep.then_some(*p))
        .collect()
}

/// `true` when every point of the arc coincides with the first.
fn zero_extent(arc: &[Position]) -> bool {
    arc.iter().all(|p| *p == arc[0])
}

impl Builder {
    pub(crate) fn simplify(&mut self) {
        let Some(tolerance) = self.opts.simplify_tolerance() else {
            return;
        };

        let mut deleted = vec![false; self.arcs.len()];
        for (arc, gone) in self.arcs.iter_mut().zip(deleted.iter_mut()) {
            *arc = simplify_arc(arc, tolerance);
            *gone = zero_extent(arc);
        }

        if !deleted.iter().any(|d| *d) {
            return;
        }

        // compact the table and remap every reference, keeping direction
        let mut remap = vec![usize::MAX; deleted.len()];
        let mut kept: Vec<Vec<Position>> = Vec::with_capacity(self.arcs.len());
        for (i, arc) in self.arcs.drain(..).enumerate() {
            if !deleted[i] {
                remap[i] = kept.len();
                kept.push(arc);
            }
        }
        self.arcs = kept;

        for unit in self.lines.iter_mut().chain(self.rings.iter_mut()) {
            unit.refs = unit
                .refs
                .iter()
                .filter_map(|r| {
                    let old = r.index();
                    if deleted[old] {
                        None
                    } else if r.is_reversed() {
                        Some(ArcIndex::reversed(remap[old]))
                    } else {
                        Some(ArcIndex::forward(remap[old]))
                    }
                })
                .collect();
        }
    }
}
