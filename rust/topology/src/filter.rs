// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Filtering a built topology down to a subset of its objects.
//!
//! Keeps only the objects whose identifier is in the requested set, then
//! compacts the arc table to the arcs those objects still reference.
//! Surviving references are renumbered in first-seen order with their
//! direction signs preserved; orphaned arcs are dropped. No topology
//! inference happens here — it is a pure re-indexing.

use rustc_hash::FxHashMap;

use crate::topology::{ArcIndex, ObjectGeometry, Topology, TopologyObject};

/// Old arc index → new arc index, plus the first-seen order for rebuilding
/// the table.
#[derive(Default)]
struct ArcRemap {
    indices: FxHashMap<usize, usize>,
    order: Vec<usize>,
}

impl ArcRemap {
    fn remap(&mut self, reference: ArcIndex) -> ArcIndex {
        let old = reference.index();
        let new = *self.indices.entry(old).or_insert_with(|| {
            self.order.push(old);
            self.order.len() - 1
        });
        if reference.is_reversed() {
            ArcIndex::reversed(new)
        } else {
            ArcIndex::forward(new)
        }
    }

    fn remap_all(&mut self, refs: &[ArcIndex]) -> Vec<ArcIndex> {
        refs.iter().map(|&r| self.remap(r)).collect()
    }
}

impl Topology {
    /// Returns a new topology containing only the objects whose id matches
    /// one of `ids`, with the arc table compacted to what they reference.
    ///
    /// Matching applies to top-level objects; a matched collection keeps
    /// all of its members.
    pub fn filter<S: AsRef<str>>(&self, ids: &[S]) -> Topology {
        let mut remap = ArcRemap::default();

        let objects: Vec<TopologyObject> = self
            .objects
            .iter()
            .filter(|o| {
                o.id.as_deref()
                    .map(|id| ids.iter().any(|want| want.as_ref() == id))
                    .unwrap_or(false)
            })
            .map(|o| TopologyObject {
                id: o.id.clone(),
                properties: o.properties.clone(),
                geometry: remap_geometry(&o.geometry, &mut remap),
            })
            .collect();

        let arcs = remap
            .order
            .iter()
            .map(|&old| self.arcs[old].clone())
            .collect();

        Topology {
            transform: self.transform,
            bounding_box: self.bounding_box,
            objects,
            arcs,
        }
    }
}

fn remap_geometry(geometry: &ObjectGeometry, remap: &mut ArcRemap) -> ObjectGeometry {
    match geometry {
        ObjectGeometry::Point { coordinates } => ObjectGeometry::Point {
            coordinates: *coordinates,
        },
        ObjectGeometry::MultiPoint { coordinates } => ObjectGeometry::MultiPoint {
            coordinates: coordinates.clone(),
        },
        ObjectGeometry::LineString { arcs } => ObjectGeometry::LineString {
            arcs: remap.remap_all(arcs),
        },
        ObjectGeometry::MultiLineString { arcs } => ObjectGeometry::MultiLineString {
            arcs: arcs.iter().map(|line| remap.remap_all(line)).collect(),
        },
        ObjectGeometry::Polygon { arcs } => ObjectGeometry::Polygon {
            arcs: arcs.iter().map(|ring| remap.remap_all(ring)).collect(),
        },
        ObjectGeometry::MultiPolygon { arcs } => ObjectGeometry::MultiPolygon {
            arcs: arcs
                .iter()
                .map(|polygon| polygon.iter().map(|ring| remap.remap_all(ring)).collect())
                .collect(),
        },
        ObjectGeometry::GeometryCollection { geometries } => {
            ObjectGeometry::GeometryCollection {
                geometries: geometries
                    .iter()
                    .map(|member| TopologyObject {
                        id: member.id.clone(),
                        properties: member.properties.clone(),
                        geometry: remap_geometry(&member.geometry, remap),
                    })
                    .collect(),
            }
        }
    }
}
