// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 1: bounding-box computation.

use crate::builder::Builder;

impl Builder {
    /// Widens the build bounding box over every coordinate of every input
    /// geometry, nested collections included. Order-independent: the result
    /// is the component-wise min/max of the coordinate multiset.
    pub(crate) fn compute_bounds(&mut self) {
        let bbox = &mut self.bbox;
        for feature in &self.features {
            if let Some(geometry) = &feature.geometry {
                geometry.each_position(&mut |p| bbox.expand(p));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use topo_lite_geojson::{BoundingBox, Feature, Geometry};

    use crate::builder::Builder;
    use crate::options::TopologyOptions;

    fn bounds_of(features: Vec<Feature>) -> BoundingBox {
        let mut builder = Builder::new(features, TopologyOptions::default());
        builder.compute_bounds();
        builder.bbox
    }

    #[test]
    fn covers_all_lines() {
        let bbox = bounds_of(vec![
            Feature::new(Geometry::line_string(vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
            ])),
            Feature::new(Geometry::line_string(vec![
                [-1.0, 0.0],
                [1.0, 0.0],
                [-2.0, 3.0],
            ])),
        ]);

        assert_eq!(
            bbox,
            BoundingBox {
                min_x: -2.0,
                min_y: 0.0,
                max_x: 2.0,
                max_y: 3.0
            }
        );
    }

    #[test]
    fn is_invariant_to_feature_order() {
        let a = Feature::new(Geometry::point([5.0, -5.0]));
        let b = Feature::new(Geometry::multi_polygon(vec![vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
        ]]]));

        assert_eq!(
            bounds_of(vec![a.clone(), b.clone()]),
            bounds_of(vec![b, a])
        );
    }

    #[test]
    fn recurses_into_collections() {
        let bbox = bounds_of(vec![Feature::new(Geometry::collection(vec![
            Geometry::point([10.0, 10.0]),
            Geometry::collection(vec![Geometry::point([-10.0, 20.0])]),
        ]))]);

        assert_eq!(bbox.min_x, -10.0);
        assert_eq!(bbox.max_x, 10.0);
        assert_eq!(bbox.max_y, 20.0);
    }

    #[test]
    fn features_without_geometry_contribute_nothing() {
        let mut f = Feature::new(Geometry::point([1.0, 1.0]));
        f.geometry = None;
        assert!(bounds_of(vec![f]).is_empty());
    }
}
