// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 4: junction detection.
//!
//! A coordinate is a junction when
//! (a) it is an endpoint of any extracted line,
//! (b) it occurs more than once among a single ring's traversal positions
//!     (a self-touch; the closing repetition of the seam coordinate does
//!     not count), or
//! (c) it is visited by two or more distinct lines/rings.
//!
//! One pass over all units aggregates visits into a coordinate → first
//! visitor map; classification depends only on the multiset of visits,
//! never on iteration order.

use rustc_hash::FxHashMap;

use crate::builder::{Builder, PointKey};

impl Builder {
    pub(crate) fn join(&mut self) {
        // unit id of the first visitor per coordinate
        let mut first_visitor: FxHashMap<PointKey, u32> = FxHashMap::default();
        let mut unit: u32 = 0;

        let coords = &self.coords;
        let junctions = &mut self.junctions;

        for line in &self.lines {
            // (a) line endpoints are always junctions
            junctions.insert(PointKey::of(&coords[line.start]));
            junctions.insert(PointKey::of(&coords[line.end]));

            for i in line.start..=line.end {
                let key = PointKey::of(&coords[i]);
                match first_visitor.get(&key).copied() {
                    None => {
                        first_visitor.insert(key, unit);
                    }
                    // (c) shared with another unit; a revisit within the
                    // same open line is not a junction
                    Some(visitor) if visitor != unit => {
                        junctions.insert(key);
                    }
                    Some(_) => {}
                }
            }
            unit += 1;
        }

        for ring in &self.rings {
            // the closing coordinate repeats the seam; skip it so closure
            // alone does not read as a self-touch
            for i in ring.start..ring.end {
                let key = PointKey::of(&coords[i]);
                if first_visitor.insert(key, unit).is_some() {
                    // (b) same ring again, or (c) any other unit
                    junctions.insert(key);
                }
            }
            unit += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use topo_lite_geojson::{Feature, Geometry};

    use crate::builder::Builder;
    use crate::options::TopologyOptions;

    fn joined(features: Vec<Feature>) -> Builder {
        let mut builder = Builder::new(features, TopologyOptions::default());
        builder.extract();
        builder.join();
        builder
    }

    #[test]
    fn line_endpoints_are_junctions() {
        let builder = joined(vec![Feature::new(Geometry::line_string(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
        ]))]);

        assert!(builder.is_junction(&[0.0, 0.0]));
        assert!(builder.is_junction(&[2.0, 0.0]));
        assert!(!builder.is_junction(&[1.0, 0.0]));
    }

    #[test]
    fn shared_interior_point_is_a_junction() {
        let builder = joined(vec![
            Feature::new(Geometry::line_string(vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
            ])),
            Feature::new(Geometry::line_string(vec![
                [0.0, 1.0],
                [1.0, 0.0],
                [2.0, 1.0],
            ])),
        ]);

        assert!(builder.is_junction(&[1.0, 0.0]));
    }

    #[test]
    fn ring_closure_is_not_a_junction() {
        let builder = joined(vec![Feature::new(Geometry::polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
        ]]))]);

        assert!(builder.junctions.is_empty());
    }

    #[test]
    fn ring_self_touch_is_a_junction() {
        // A figure-eight: the waist coordinate appears twice in traversal.
        let builder = joined(vec![Feature::new(Geometry::polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 1.0],
            [2.0, 0.0],
            [1.0, 1.0],
            [0.0, 2.0],
            [0.0, 0.0],
        ]]))]);

        assert!(builder.is_junction(&[1.0, 1.0]));
        assert!(!builder.is_junction(&[0.0, 0.0]));
    }

    #[test]
    fn adjoining_rings_share_a_junction() {
        let left = Feature::new(Geometry::polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ]]));
        let right = Feature::new(Geometry::polygon(vec![vec![
            [1.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.0],
        ]]));
        let builder = joined(vec![left, right]);

        assert!(builder.is_junction(&[1.0, 0.0]));
        assert!(builder.is_junction(&[1.0, 1.0]));
        assert!(!builder.is_junction(&[0.0, 0.0]));
        assert!(!builder.is_junction(&[2.0, 1.0]));
    }

    #[test]
    fn junction_set_is_order_independent() {
        let a = Feature::new(Geometry::line_string(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
        ]));
        let b = Feature::new(Geometry::line_string(vec![
            [2.0, 2.0],
            [1.0, 0.0],
            [0.0, 2.0],
        ]));

        let forward = joined(vec![a.clone(), b.clone()]);
        let backward = joined(vec![b, a]);
        assert_eq!(forward.junctions, backward.junctions);
    }

    #[test]
    fn isolated_points_never_join() {
        let builder = joined(vec![
            Feature::new(Geometry::point([1.0, 0.0])),
            Feature::new(Geometry::line_string(vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
            ])),
        ]);

        // the point feature coincides with a line interior; points are not
        // part of the topology and do not create junctions
        assert!(!builder.is_junction(&[1.0, 0.0]));
    }
}
