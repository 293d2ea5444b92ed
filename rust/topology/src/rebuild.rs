// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 8: object rebuilding.
//!
//! Re-expands the extraction-time line/ring placeholders into output
//! objects whose geometries hold the deduplicated signed arc references.
//! The nested shape of the input geometry is preserved exactly; malformed
//! parts (empty slots) become empty reference lists for the pruner to
//! judge.

use crate::builder::{BuildGeometry, BuildObject, Builder};
use crate::topology::{ArcIndex, ObjectGeometry, TopologyObject};

impl Builder {
    pub(crate) fn rebuild_objects(&mut self) -> Vec<TopologyObject> {
        let objects = std::mem::take(&mut self.objects);
        objects
            .into_iter()
            .filter_map(|o| self.rebuild_object(o))
            .collect()
    }

    fn rebuild_object(&self, object: BuildObject) -> Option<TopologyObject> {
        let geometry = self.rebuild_geometry(object.geometry?);
        Some(TopologyObject {
            id: object.id,
            properties: object.properties,
            geometry,
        })
    }

    fn rebuild_geometry(&self, geometry: BuildGeometry) -> ObjectGeometry {
        match geometry {
            BuildGeometry::Point(coordinates) => ObjectGeometry::Point { coordinates },
            BuildGeometry::MultiPoint(coordinates) => ObjectGeometry::MultiPoint { coordinates },
            BuildGeometry::LineString(slot) => ObjectGeometry::LineString {
                arcs: self.line_refs(slot),
            },
            BuildGeometry::MultiLineString(slots) => ObjectGeometry::MultiLineString {
                arcs: slots.into_iter().map(|s| self.line_refs(s)).collect(),
            },
            BuildGeometry::Polygon(slots) => ObjectGeometry::Polygon {
                arcs: slots.into_iter().map(|s| self.ring_refs(s)).collect(),
            },
            BuildGeometry::MultiPolygon(polygons) => ObjectGeometry::MultiPolygon {
                arcs: polygons
                    .into_iter()
                    .map(|slots| slots.into_iter().map(|s| self.ring_refs(s)).collect())
                    .collect(),
            },
            BuildGeometry::Collection(members) => ObjectGeometry::GeometryCollection {
                geometries: members
                    .into_iter()
                    .filter_map(|m| self.rebuild_object(m))
                    .collect(),
            },
        }
    }

    fn line_refs(&self, slot: Option<usize>) -> Vec<ArcIndex> {
        slot.map(|i| self.lines[i].refs.to_vec()).unwrap_or_default()
    }

    fn ring_refs(&self, slot: Option<usize>) -> Vec<ArcIndex> {
        slot.map(|i| self.rings[i].refs.to_vec()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use topo_lite_geojson::{Feature, Geometry};

    use crate::builder::Builder;
    use crate::options::TopologyOptions;
    use crate::topology::{ArcIndex, ObjectGeometry, TopologyObject};

    fn rebuilt(features: Vec<Feature>) -> Vec<TopologyObject> {
        let mut builder = Builder::new(features, TopologyOptions::default());
        builder.extract();
        builder.join();
        builder.cut();
        builder.dedup();
        builder.rebuild_objects()
    }

    #[test]
    fn line_object_references_its_arcs_in_order() {
        let objects = rebuilt(vec![
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

        match &objects[0].geometry {
            ObjectGeometry::LineString { arcs } => {
                assert_eq!(arcs, &vec![ArcIndex::forward(0), ArcIndex::forward(1)]);
            }
            other => panic!("unexpected geometry: {other:?}"),
        }
    }

    #[test]
    fn nested_shape_is_preserved() {
        let objects = rebuilt(vec![Feature::new(Geometry::collection(vec![
            Geometry::point([9.0, 9.0]),
            Geometry::multi_polygon(vec![vec![vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 0.0],
            ]]]),
        ]))]);

        match &objects[0].geometry {
            ObjectGeometry::GeometryCollection { geometries } => {
                assert_eq!(geometries.len(), 2);
                assert_eq!(geometries[0].geometry.kind(), "Point");
                assert_eq!(geometries[1].geometry.kind(), "MultiPolygon");
            }
            other => panic!("unexpected geometry: {other:?}"),
        }
    }

    #[test]
    fn skipped_parts_become_empty_reference_lists() {
        let objects = rebuilt(vec![Feature::new(Geometry::multi_line_string(vec![
            vec![[0.0, 0.0]],
            vec![[0.0, 0.0], [1.0, 1.0]],
        ]))]);

        match &objects[0].geometry {
            ObjectGeometry::MultiLineString { arcs } => {
                assert!(arcs[0].is_empty());
                assert_eq!(arcs[1].len(), 1);
            }
            other => panic!("unexpected geometry: {other:?}"),
        }
    }
}
