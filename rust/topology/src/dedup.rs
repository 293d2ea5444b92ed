// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 6: arc deduplication.
//!
//! Every cut piece gets a direction-canonical key: its coordinate sequence
//! or the reversal, whichever is smaller under the fixed bit-pattern order.
//! The first piece with a given key is materialized into the arc table and
//! becomes canonical; every later equal piece is replaced by a signed
//! reference to it, negative when its forward direction runs against the
//! stored arc.
//!
//! The map is keyed by the full canonical sequence, so a hash collision is
//! resolved by structural equality inside the map — a matching hash alone
//! never merges two arcs. Orientation is likewise decided by comparing the
//! piece against the stored arc coordinate by coordinate, which stays
//! correct even for closed arcs whose endpoints cannot disambiguate
//! direction.

use log::debug;
use rustc_hash::FxHashMap;

use crate::builder::{Builder, PointKey};
use crate::topology::ArcIndex;

impl Builder {
    pub(crate) fn dedup(&mut self) {
        let mut index: FxHashMap<Vec<PointKey>, usize> = FxHashMap::default();
        let mut pieces = 0usize;

        let coords = &self.coords;
        let arcs = &mut self.arcs;

        // lines first, then rings, in extraction order: the arc table order
        // is a pure function of the input, never of hash iteration
        for unit in self.lines.iter_mut().chain(self.rings.iter_mut()) {
            for piece in &unit.pieces {
                pieces += 1;
                let slice = &coords[piece.start..=piece.end];
                let forward: Vec<PointKey> = slice.iter().map(PointKey::of).collect();
                let mut reversed = forward.clone();
                reversed.reverse();
                let canonical = forward.min(reversed);

                let reference = match index.get(&canonical).copied() {
                    None => {
                        let idx = arcs.len();
                        arcs.push(slice.to_vec());
                        index.insert(canonical, idx);
                        ArcIndex::forward(idx)
                    }
                    Some(idx) => {
                        let stored = &arcs[idx];
                        let same_direction = stored.len() == slice.len()
                            && stored
                                .iter()
                                .zip(slice.iter())
                                .all(|(a, b)| PointKey::of(a) == PointKey::of(b));
                        if same_direction {
                            ArcIndex::forward(idx)
                        } else {
                            ArcIndex::reversed(idx)
                        }
                    }
                };
                unit.refs.push(reference);
            }
        }

        debug!("deduplicated {pieces} pieces into {} arcs", arcs.len());
    }
}
