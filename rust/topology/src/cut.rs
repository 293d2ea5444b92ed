// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 5: cutting at junctions.
//!
//! Every line is split at its interior junction coordinates, producing
//! consecutive pieces whose endpoints are all junctions (line endpoints are
//! junctions by construction). A ring containing a junction is first
//! rotated in place so traversal starts there, then split the same way. A
//! junction-free ring stays whole but is rotated to a canonical start — the
//! lexicographically smallest coordinate of its traversal — so that
//! geometrically identical rings from any input order produce identical
//! coordinate sequences for the deduplicator.

use smallvec::SmallVec;

use topo_lite_geojson::Position;

use crate::builder::{Builder, PointKey, Segment};

impl Builder {
    pub(crate) fn cut(&mut self) {
        let coords = &mut self.coords;
        let junctions = &self.junctions;

        for line in &mut self.lines {
            let mut pieces: SmallVec<[Segment; 2]> = SmallVec::new();
            let mut piece_start = line.start;
            for i in line.start + 1..line.end {
                if junctions.contains(&PointKey::of(&coords[i])) {
                    pieces.push(Segment {
                        start: piece_start,
                        end: i,
                    });
                    piece_start = i;
                }
            }
            pieces.push(Segment {
                start: piece_start,
                end: line.end,
            });
            line.pieces = pieces;
        }

        for ring in &mut self.rings {
            // positions excluding the closing copy of the seam coordinate
            let len = ring.end - ring.start;
            let offset = (0..len)
                .find(|&k| junctions.contains(&PointKey::of(&coords[ring.start + k])));

            match offset {
                Some(k) => {
                    rotate_ring(coords, ring.start, ring.end, k);
                    let mut pieces: SmallVec<[Segment; 2]> = SmallVec::new();
                    let mut piece_start = ring.start;
                    for i in ring.start + 1..ring.end {
                        if junctions.contains(&PointKey::of(&coords[i])) {
                            pieces.push(Segment {
                                start: piece_start,
                                end: i,
                            });
                            piece_start = i;
                        }
                    }
                    pieces.push(Segment {
                        start: piece_start,
                        end: ring.end,
                    });
                    ring.pieces = pieces;
                }
                None => {
                    // one closed arc, canonically rotated
                    let k = minimum_offset(coords, ring.start, len);
                    rotate_ring(coords, ring.start, ring.end, k);
                    ring.pieces.push(Segment {
                        start: ring.start,
                        end: ring.end,
                    });
                }
            }
        }
    }
}

/// Rotates the ring occupying `coords[start..=end]` left by `k` positions
/// and restores the closing coordinate. `end - start` positions rotate; the
/// coordinate at `end` is the seam copy.
fn rotate_ring(coords: &mut [Position], start: usize, end: usize, k: usize) {
    if k == 0 || end <= start {
        return;
    }
    coords[start..end].rotate_left(k);
    coords[end] = coords[start];
}

/// Index of the lexicographically smallest coordinate (x, then y) among the
/// ring's `len` distinct positions. In a junction-free ring no coordinate
/// repeats, so the minimum is unique and the rotation deterministic.
fn minimum_offset(coords: &[Position], start: usize, len: usize) -> usize {
    let mut best = 0;
    for k in 1..len {
        let p = &coords[start + k];
        let q = &coords[start + best];
        if p[0].total_cmp(&q[0]).then(p[1].total_cmp(&q[1])).is_lt() {
            best = k;
        }
    }
    best
}
